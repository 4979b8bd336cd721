use std::path::PathBuf;

#[derive(Clone)]
pub struct ExportSceneInput {
    pub scene_path: PathBuf,
    pub fbx_path: PathBuf,
}

#[derive(Clone)]
pub struct ImportSceneInput {
    pub dae_path: PathBuf,
    pub scene_path: PathBuf,
}
