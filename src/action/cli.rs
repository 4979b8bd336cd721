use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_cli_args, Cli, Mode};
use crate::config::ports::{
    BridgeConfig, ConfigPort, PreferenceStoreTrait, DEFAULT_BLENDER_COMMAND,
};
use crate::facade::bridge_facade::BridgeFacade;
use crate::facade::traits::i_bridge::BridgeFacadeTrait;
use crate::models::request::{ExportInput, ImportInput};
use crate::service::config_service::{ConfigService, ResolvedConfigAdapter};
use crate::service::converter_service::SuperBmdService;
use crate::service::host_service::BlenderHostService;
use crate::service::preference_service::FilePreferenceStore;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;
    validate_cli_args(&cli)?;

    let store = FilePreferenceStore::at_default_location();
    if cli.save_config {
        save_path_overrides(&store, &cli)?;
    }

    let adapter = CliConfigAdapter::new(cli.clone(), Box::new(store));
    let config = ConfigService::new(Box::new(adapter)).get_config()?;
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    let facade: Box<dyn BridgeFacadeTrait> = Box::new(BridgeFacade::new(
        Box::new(ResolvedConfigAdapter::new(config.clone())),
        Box::new(BlenderHostService::new(config.blender_path.clone())),
        Box::new(SuperBmdService::new()?),
    ));

    let input_path = PathBuf::from(&cli.input);
    match cli.mode {
        Mode::Export => {
            let output_path = cli
                .output
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| input_path.with_extension("bmd"));
            log::info!(
                "CLI 匯出，場景：{}，目的：{}",
                input_path.display(),
                output_path.display()
            );
            let output = facade.execute_export(ExportInput {
                scene_path: input_path,
                output_path,
                rotate: cli.rotate,
                extra_params: cli.params.clone(),
            })?;
            Ok(output.bmd_path.display().to_string())
        }
        Mode::Import => {
            log::info!("CLI 匯入，來源：{}", input_path.display());
            let output = facade.execute_import(ImportInput {
                source_path: input_path,
                output_path: cli.output.as_ref().map(PathBuf::from),
            })?;
            Ok(output.scene_path.display().to_string())
        }
    }
}

fn save_path_overrides(store: &FilePreferenceStore, cli: &Cli) -> io::Result<()> {
    let mut prefs = store.load()?;
    if let Some(path) = &cli.superbmd {
        prefs.superbmd_path = Some(path.clone());
    }
    if let Some(path) = &cli.blender {
        prefs.blender_path = Some(path.clone());
    }
    store.save(&prefs)?;
    log::info!("已儲存路徑偏好設定：{}", store.path().display());
    Ok(())
}

// CLI 配置適配器：命令列覆寫優先於偏好設定
pub struct CliConfigAdapter {
    cli: Cli,
    store: Box<dyn PreferenceStoreTrait>,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli, store: Box<dyn PreferenceStoreTrait>) -> Self {
        CliConfigAdapter { cli, store }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<BridgeConfig> {
        let prefs = self.store.load()?;
        let converter_path = self
            .cli
            .superbmd
            .clone()
            .or(prefs.superbmd_path)
            .unwrap_or_default();
        let blender_path = self
            .cli
            .blender
            .clone()
            .or(prefs.blender_path)
            .unwrap_or_else(|| DEFAULT_BLENDER_COMMAND.to_string());
        Ok(BridgeConfig {
            converter_path: PathBuf::from(converter_path),
            blender_path: PathBuf::from(blender_path),
            timeout_secs: self.cli.timeout,
            no_progress: self.cli.no_progress,
        })
    }
}
