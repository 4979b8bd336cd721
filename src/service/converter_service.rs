use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::models::convert::{ConvertInput, ConvertOutput};
use crate::service::traits::i_service::ConverterServiceTrait;
use crate::utils::args::tokenize_params;
use crate::utils::utils::ProgressManager;

// 組出匯出時傳給 SuperBMD 的參數列表：中繼檔在前，旋轉旗標與使用者附加參數在後。
// 目的檔名不需要傳，SuperBMD 會從輸入檔名推導輸出名稱。
pub fn build_export_args(fbx_path: &Path, rotate: bool, extra_params: &str) -> io::Result<Vec<String>> {
    let mut args = vec![fbx_path.display().to_string()];
    if rotate {
        args.push("--rotate".to_string());
    }
    args.extend(tokenize_params(extra_params)?);
    Ok(args)
}

pub fn build_import_args(source_path: &Path, dae_path: &Path) -> Vec<String> {
    vec![
        source_path.display().to_string(),
        dae_path.display().to_string(),
    ]
}

// SuperBMD 轉換器服務：啟動外部程序、在逾時上限內等待結束、檢查結束碼。
// 等待一定發生在任何後續清理之前，沒有射後不理的路徑。
pub struct SuperBmdService {
    runtime: tokio::runtime::Runtime,
}

impl SuperBmdService {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(SuperBmdService { runtime })
    }
}

impl ConverterServiceTrait for SuperBmdService {
    fn convert(&self, input: ConvertInput) -> io::Result<ConvertOutput> {
        log::info!(
            "啟動轉換器：{} {}",
            input.converter_path.display(),
            input.args.join(" ")
        );
        let progress = ProgressManager::new_spinner("SuperBMD 轉換中", input.no_progress);
        let result = self.runtime.block_on(run_converter(&input));
        match &result {
            Ok(output) => progress.finish(&format!("轉換器結束，結束碼 {}", output.exit_code)),
            Err(_) => progress.finish_and_clear(),
        }
        result
    }
}

async fn run_converter(input: &ConvertInput) -> io::Result<ConvertOutput> {
    let mut child = Command::new(&input.converter_path)
        .args(&input.args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => io::Error::new(
                io::ErrorKind::NotFound,
                format!("找不到轉換器執行檔：{}", input.converter_path.display()),
            ),
            _ => io::Error::new(e.kind(), format!("轉換器啟動失敗：{}", e)),
        })?;

    // stderr 要持續讀走，否則管線塞滿會讓子程序卡住
    let mut stderr_pipe = child.stderr.take();
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stderr_pipe.as_mut() {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout(input.timeout, child.wait()).await {
        Ok(status) => status?,
        Err(_) => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!(
                    "轉換器超過 {} 秒未結束，已強制終止",
                    input.timeout.as_secs()
                ),
            ));
        }
    };

    let stderr = stderr_task.await.unwrap_or_default();
    if !status.success() {
        let code = status.code().unwrap_or(-1);
        let detail = String::from_utf8_lossy(&stderr);
        let detail = detail.trim();
        let message = if detail.is_empty() {
            format!("轉換器以非零結束碼 {} 結束", code)
        } else {
            format!("轉換器以非零結束碼 {} 結束：{}", code, detail)
        };
        return Err(io::Error::new(io::ErrorKind::Other, message));
    }

    Ok(ConvertOutput {
        exit_code: status.code().unwrap_or(0),
    })
}
