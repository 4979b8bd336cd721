use std::io;
use std::path::{Path, PathBuf};
use crate::config::ports::{
    BridgeConfig, ConfigPort, PreferenceStoreTrait, DEFAULT_BLENDER_COMMAND, DEFAULT_TIMEOUT_SECS,
};

// 配置服務，取得配置後先驗證轉換器路徑再交給呼叫端
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<BridgeConfig> {
        let config = self.config_port.get_config()?;
        validate_converter_path(&config.converter_path)?;
        Ok(config)
    }
}

// 轉換器路徑必須在任何程序啟動前驗證，配置錯誤不得延後成啟動錯誤
pub fn validate_converter_path(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "尚未設定 SuperBMD 路徑，請以 --superbmd 指定或在互動模式的設定中填入".to_string(),
        ));
    }
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("SuperBMD 路徑不存在：{}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("SuperBMD 路徑不是可執行檔：{}", path.display()),
        ));
    }
    Ok(())
}

// 偏好設定配置適配器，路徑取自偏好設定，其餘使用預設值（互動模式用）
pub struct PreferenceConfigAdapter {
    store: Box<dyn PreferenceStoreTrait>,
}

impl PreferenceConfigAdapter {
    pub fn new(store: Box<dyn PreferenceStoreTrait>) -> Self {
        PreferenceConfigAdapter { store }
    }
}

impl ConfigPort for PreferenceConfigAdapter {
    fn get_config(&self) -> io::Result<BridgeConfig> {
        let prefs = self.store.load()?;
        Ok(BridgeConfig {
            converter_path: PathBuf::from(prefs.superbmd_path.unwrap_or_default()),
            blender_path: PathBuf::from(
                prefs
                    .blender_path
                    .unwrap_or_else(|| DEFAULT_BLENDER_COMMAND.to_string()),
            ),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            no_progress: false,
        })
    }
}

// 已解析配置的適配器，把一份現成的 BridgeConfig 包成 ConfigPort
pub struct ResolvedConfigAdapter {
    config: BridgeConfig,
}

impl ResolvedConfigAdapter {
    pub fn new(config: BridgeConfig) -> Self {
        ResolvedConfigAdapter { config }
    }
}

impl ConfigPort for ResolvedConfigAdapter {
    fn get_config(&self) -> io::Result<BridgeConfig> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blender_md_cfgsvc_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn empty_converter_path_is_a_config_error() {
        let err = validate_converter_path(Path::new("")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_converter_path_is_rejected() {
        let err = validate_converter_path(Path::new("/no/such/SuperBMD.exe")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_converter_path_is_rejected() {
        let dir = test_dir("dir_path");
        let err = validate_converter_path(&dir).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn existing_file_passes_validation() {
        let dir = test_dir("file_ok");
        let exe = dir.join("SuperBMD.exe");
        fs::write(&exe, b"bin").unwrap();
        assert!(validate_converter_path(&exe).is_ok());
    }

    #[test]
    fn config_service_rejects_unset_converter_before_launch() {
        let config = BridgeConfig {
            converter_path: PathBuf::new(),
            blender_path: PathBuf::from(DEFAULT_BLENDER_COMMAND),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            no_progress: true,
        };
        let service = ConfigService::new(Box::new(ResolvedConfigAdapter::new(config)));
        let err = service.get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
