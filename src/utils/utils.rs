use std::io;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();
    Ok(())
}

pub struct ProgressManager {
    pb: ProgressBar,
    start: Instant,
}

impl ProgressManager {
    // 外部程序執行期間的轉圈提示，終端仍保持回應
    pub fn new_spinner(message: &str, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg} 已等待 {elapsed_precise}")
                    .unwrap(),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        };
        pb.set_message(message.to_string());
        ProgressManager {
            pb,
            start: Instant::now(),
        }
    }

    pub fn finish(&self, action: &str) {
        let elapsed = self.start.elapsed().as_secs_f64();
        self.pb
            .finish_with_message(format!("{}，耗時 {:.1} 秒", action, elapsed));
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
