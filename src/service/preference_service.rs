use std::io;
use std::path::{Path, PathBuf};
use crate::config::ports::{BridgePreferences, PreferenceStoreTrait};

// 檔案式偏好設定儲存，格式為一行一個 key=value
#[derive(Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        FilePreferenceStore { path }
    }

    pub fn at_default_location() -> Self {
        FilePreferenceStore::new(default_preference_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn default_preference_path() -> PathBuf {
    if let Ok(custom) = std::env::var("BLENDER_MD_CONFIG") {
        return PathBuf::from(custom);
    }
    match std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        Ok(home) => Path::new(&home).join(".blender_md.conf"),
        Err(_) => std::env::temp_dir().join(".blender_md.conf"),
    }
}

impl PreferenceStoreTrait for FilePreferenceStore {
    fn load(&self) -> io::Result<BridgePreferences> {
        if !self.path.exists() {
            return Ok(BridgePreferences::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("讀取偏好設定失敗（{}）：{}", self.path.display(), e),
            )
        })?;

        let mut prefs = BridgePreferences::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // 未知鍵直接略過，保留和舊版設定檔的相容性
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                match key.trim() {
                    "superbmd_path" => prefs.superbmd_path = Some(value.to_string()),
                    "blender_path" => prefs.blender_path = Some(value.to_string()),
                    _ => {}
                }
            }
        }
        Ok(prefs)
    }

    fn save(&self, prefs: &BridgePreferences) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut content = String::new();
        if let Some(path) = &prefs.superbmd_path {
            content.push_str(&format!("superbmd_path={}\n", path));
        }
        if let Some(path) = &prefs.blender_path {
            content.push_str(&format!("blender_path={}\n", path));
        }
        std::fs::write(&self.path, content).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("寫入偏好設定失敗（{}）：{}", self.path.display(), e),
            )
        })
    }
}
