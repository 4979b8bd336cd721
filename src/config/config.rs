use clap::{Parser, ValueEnum};
use std::io;
use std::path::Path;

use crate::config::ports::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Clone)]
#[command(
    name = "blender_md",
    about = "透過 SuperBMD 在 Blender 場景與 GameCube/Wii BMD 模型之間轉換",
    long_about = "一個以 SuperBMD 為後端的 BMD 橋接工具：匯出時先將 .blend 場景輸出為 FBX 中繼檔，再交給 SuperBMD 產出 .bmd；匯入時先以 SuperBMD 將 .bmd 轉成 Collada 中繼檔，再匯入場景並另存為 .blend。\n不帶任何參數執行會進入互動模式。SuperBMD 路徑可用 --superbmd 指定，或先以 --save-config 存入偏好設定。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    pub input: String,
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(long, default_value = "export")]
    pub mode: Mode,
    /// 以 Z 軸朝上（傳入 SuperBMD 的 --rotate），匯出模式限定
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub rotate: bool,
    /// 附加給 SuperBMD 的其他參數，例如 "-t -s"
    #[arg(long, default_value = "")]
    pub params: String,
    #[arg(long)]
    pub superbmd: Option<String>,
    #[arg(long)]
    pub blender: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub save_config: bool,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

#[derive(Clone, ValueEnum)]
#[derive(PartialEq)]
#[derive(Debug)]
pub enum Mode {
    Export,
    Import,
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input),
        ));
    }
    Ok(path)
}

pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

pub fn validate_cli_args(cli: &Cli) -> io::Result<()> {
    let input = validate_input_path(&cli.input)?;
    match cli.mode {
        Mode::Export => {
            if !has_extension(input, "blend") {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("匯出模式的輸入必須是 .blend 場景檔：{}", cli.input),
                ));
            }
            if let Some(output) = &cli.output {
                if !has_extension(Path::new(output), "bmd") {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("匯出目的路徑必須以 .bmd 結尾：{}", output),
                    ));
                }
            }
        }
        Mode::Import => {
            if !has_extension(input, "bmd") {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("匯入模式的輸入必須是 .bmd 模型檔：{}", cli.input),
                ));
            }
            if let Some(output) = &cli.output {
                if !has_extension(Path::new(output), "blend") {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("匯入目的路徑必須以 .blend 結尾：{}", output),
                    ));
                }
            }
        }
    }
    if cli.timeout == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "逾時秒數必須大於 0".to_string(),
        ));
    }
    Ok(())
}
