use std::path::PathBuf;

#[derive(Clone)]
pub struct ExportInput {
    pub scene_path: PathBuf,
    pub output_path: PathBuf,
    pub rotate: bool,
    // TODO: 材質預設選項
    pub extra_params: String,
}

#[derive(Debug)]
pub struct ExportOutput {
    pub bmd_path: PathBuf,
}

#[derive(Clone)]
pub struct ImportInput {
    pub source_path: PathBuf,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ImportOutput {
    pub scene_path: PathBuf,
}
