use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct ConvertInput {
    pub converter_path: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
    pub no_progress: bool,
}

#[derive(Debug)]
pub struct ConvertOutput {
    pub exit_code: i32,
}
