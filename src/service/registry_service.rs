use crate::models::menu::{MenuEntry, MenuLocation};
use crate::service::traits::i_service::MenuHostTrait;

pub const EXPORT_COMMAND_ID: &str = "export_mesh.bmd";
pub const IMPORT_COMMAND_ID: &str = "import_mesh.bmd";

// 命令註冊表：啟動時把命令掛上宿主選單，結束時以相反順序拆除
pub struct CommandRegistry {
    entries: Vec<MenuEntry>,
    installed: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            entries: Vec::new(),
            installed: Vec::new(),
        }
    }

    // 相同 id 重複註冊視為無效操作
    pub fn register(&mut self, entry: MenuEntry) {
        if self.entries.iter().any(|e| e.id == entry.id) {
            log::warn!("命令已註冊，略過：{}", entry.id);
            return;
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn install(&mut self, host: &mut dyn MenuHostTrait) {
        for entry in &self.entries {
            if self.installed.contains(&entry.id) {
                continue;
            }
            host.append_entry(entry.clone());
            self.installed.push(entry.id.clone());
        }
    }

    // 相反順序移除，拆除後宿主選單不得殘留任何項目
    pub fn uninstall(&mut self, host: &mut dyn MenuHostTrait) {
        while let Some(id) = self.installed.pop() {
            host.remove_entry(&id);
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        CommandRegistry::new()
    }
}

pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(MenuEntry {
        id: EXPORT_COMMAND_ID.to_string(),
        label: "Gamecube/Wii 模型 (.bmd)".to_string(),
        location: MenuLocation::FileExport,
    });
    registry.register(MenuEntry {
        id: IMPORT_COMMAND_ID.to_string(),
        label: "Gamecube/Wii 模型 (.bmd)".to_string(),
        location: MenuLocation::FileImport,
    });
    registry
}
