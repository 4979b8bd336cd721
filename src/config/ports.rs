use std::io;
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_BLENDER_COMMAND: &str = "blender";

// 解析後的橋接配置，封裝與單次命令無關的參數
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub converter_path: PathBuf,
    pub blender_path: PathBuf,
    pub timeout_secs: u64,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<BridgeConfig>;
}

// 持久化的偏好設定，對應宿主的附加元件偏好機制
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgePreferences {
    pub superbmd_path: Option<String>,
    pub blender_path: Option<String>,
}

// 偏好設定儲存的 Port
pub trait PreferenceStoreTrait: Send + Sync {
    fn load(&self) -> io::Result<BridgePreferences>;
    fn save(&self, prefs: &BridgePreferences) -> io::Result<()>;
}
