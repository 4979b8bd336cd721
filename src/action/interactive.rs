use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ports::PreferenceStoreTrait;
use crate::facade::bridge_facade::BridgeFacade;
use crate::facade::traits::i_bridge::BridgeFacadeTrait;
use crate::models::menu::{MenuEntry, MenuLocation};
use crate::models::request::{ExportInput, ImportInput};
use crate::service::config_service::{ConfigService, PreferenceConfigAdapter, ResolvedConfigAdapter};
use crate::service::converter_service::SuperBmdService;
use crate::service::host_service::BlenderHostService;
use crate::service::preference_service::FilePreferenceStore;
use crate::service::registry_service::{default_registry, EXPORT_COMMAND_ID, IMPORT_COMMAND_ID};
use crate::service::traits::i_service::MenuHostTrait;
use crate::utils::utils::setup_logging;

// 互動模式的主選單，掛載來自命令註冊表的項目
struct InteractiveMenuHost {
    items: Vec<(String, String)>,
}

impl MenuHostTrait for InteractiveMenuHost {
    fn append_entry(&mut self, entry: MenuEntry) {
        let label = match entry.location {
            MenuLocation::FileExport => format!("匯出 {}", entry.label),
            MenuLocation::FileImport => format!("匯入 {}", entry.label),
        };
        self.items.push((entry.id, label));
    }

    fn remove_entry(&mut self, id: &str) {
        self.items.retain(|(item_id, _)| item_id != id);
    }
}

pub fn process_interactive_mode() -> io::Result<String> {
    setup_logging("info")?;
    println!("=== 歡迎使用 BMD 橋接互動模式 ===");

    let store = FilePreferenceStore::at_default_location();
    ensure_converter_configured(&store)?;

    let mut registry = default_registry();
    let mut menu_host = InteractiveMenuHost { items: Vec::new() };
    registry.install(&mut menu_host);

    let mut labels: Vec<String> = menu_host
        .items
        .iter()
        .map(|(_, label)| label.clone())
        .collect();
    labels.push("重新設定路徑".to_string());

    let selection = Select::new()
        .with_prompt("選擇操作（使用方向鍵選擇，按 Enter 確認）")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("操作選擇失敗: {}", e)))?;

    let result = if selection < menu_host.items.len() {
        let id = menu_host.items[selection].0.clone();
        match id.as_str() {
            EXPORT_COMMAND_ID => run_export(&store),
            IMPORT_COMMAND_ID => run_import(&store),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("未知的命令：{}", id),
            )),
        }
    } else {
        configure_paths(&store).map(|_| store.path().display().to_string())
    };

    registry.uninstall(&mut menu_host);
    result
}

fn run_export(store: &FilePreferenceStore) -> io::Result<String> {
    let scene = prompt_existing_path("請輸入 .blend 場景路徑（例如：./model.blend）")?;
    let default_output = Path::new(&scene).with_extension("bmd").display().to_string();
    let output: String = Input::new()
        .with_prompt("輸入 .bmd 目的路徑")
        .default(default_output)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let rotate = Confirm::new()
        .with_prompt("是否以 Z 軸朝上（--rotate）？")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("旋轉選項選擇失敗: {}", e)))?;
    let params: String = Input::new()
        .with_prompt("其他 SuperBMD 參數（例如：-t -s，可留空）")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let facade = build_facade(store)?;
    let output = facade.execute_export(ExportInput {
        scene_path: PathBuf::from(scene),
        output_path: PathBuf::from(output),
        rotate,
        extra_params: params,
    })?;
    Ok(output.bmd_path.display().to_string())
}

fn run_import(store: &FilePreferenceStore) -> io::Result<String> {
    let source = prompt_existing_path("請輸入 .bmd 模型路徑（例如：./model.bmd）")?;
    let default_output = Path::new(&source)
        .with_extension("blend")
        .display()
        .to_string();
    let output: String = Input::new()
        .with_prompt("輸入 .blend 目的路徑")
        .default(default_output)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let facade = build_facade(store)?;
    let output = facade.execute_import(ImportInput {
        source_path: PathBuf::from(source),
        output_path: Some(PathBuf::from(output)),
    })?;
    Ok(output.scene_path.display().to_string())
}

fn build_facade(store: &FilePreferenceStore) -> io::Result<Box<dyn BridgeFacadeTrait>> {
    let adapter = PreferenceConfigAdapter::new(Box::new(store.clone()));
    let config = ConfigService::new(Box::new(adapter)).get_config()?;
    Ok(Box::new(BridgeFacade::new(
        Box::new(ResolvedConfigAdapter::new(config.clone())),
        Box::new(BlenderHostService::new(config.blender_path.clone())),
        Box::new(SuperBmdService::new()?),
    )))
}

fn ensure_converter_configured(store: &FilePreferenceStore) -> io::Result<()> {
    let prefs = store.load()?;
    let valid = prefs
        .superbmd_path
        .as_deref()
        .map(|path| Path::new(path).is_file())
        .unwrap_or(false);
    if valid {
        return Ok(());
    }
    println!("尚未設定有效的 SuperBMD 路徑");
    configure_paths(store)
}

// 偏好設定面板的互動版：編輯並持久化轉換器與 Blender 路徑
fn configure_paths(store: &FilePreferenceStore) -> io::Result<()> {
    let mut prefs = store.load()?;

    let superbmd: String = Input::new()
        .with_prompt("請輸入 SuperBMD 執行檔路徑（例如：C:/tools/SuperBMD.exe）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).is_file() {
                Ok(())
            } else {
                Err(format!("路徑 '{}' 不是存在的執行檔", input))
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    prefs.superbmd_path = Some(superbmd);

    let blender_default = prefs
        .blender_path
        .clone()
        .unwrap_or_else(|| "blender".to_string());
    let blender: String = Input::new()
        .with_prompt("請輸入 Blender 執行檔路徑（已在 PATH 上可直接用 blender）")
        .default(blender_default)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    prefs.blender_path = Some(blender);

    store.save(&prefs)?;
    println!("偏好設定已儲存至：{}", store.path().display());
    Ok(())
}

fn prompt_existing_path(prompt: &str) -> io::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() {
                Ok(())
            } else {
                Err(format!("路徑 '{}' 不存在", input))
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
