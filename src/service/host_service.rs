use std::io;
use std::path::PathBuf;
use std::process::Command;

use crate::models::host::{ExportSceneInput, ImportSceneInput};
use crate::service::traits::i_service::HostServiceTrait;

// Blender 宿主服務，以無介面模式委派場景的匯出與匯入。
// FBX/Collada 的編解碼完全由 Blender 負責，這裡只負責呼叫。
pub struct BlenderHostService {
    blender_path: PathBuf,
}

impl BlenderHostService {
    pub fn new(blender_path: PathBuf) -> Self {
        BlenderHostService { blender_path }
    }

    fn run_blender(&self, args: &[String], step: &str) -> io::Result<()> {
        log::info!(
            "呼叫 Blender：{} {}",
            self.blender_path.display(),
            args.join(" ")
        );
        let output = Command::new(&self.blender_path)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "找不到 Blender 執行檔：{}，可用 --blender 指定",
                        self.blender_path.display()
                    ),
                ),
                _ => io::Error::new(e.kind(), format!("{}時啟動 Blender 失敗：{}", step, e)),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{}失敗，Blender 結束碼 {}：{}",
                    step,
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }
        Ok(())
    }
}

impl HostServiceTrait for BlenderHostService {
    fn export_scene(&self, input: ExportSceneInput) -> io::Result<()> {
        let expr = format!(
            "import bpy; bpy.ops.export_scene.fbx(filepath=r'{}', path_mode='ABSOLUTE')",
            input.fbx_path.display()
        );
        let args = vec![
            "--background".to_string(),
            input.scene_path.display().to_string(),
            "--python-expr".to_string(),
            expr,
        ];
        self.run_blender(&args, "場景匯出")
    }

    fn import_scene(&self, input: ImportSceneInput) -> io::Result<()> {
        let expr = format!(
            "import bpy; bpy.ops.wm.read_homefile(use_empty=True); bpy.ops.wm.collada_import(filepath=r'{}'); bpy.ops.wm.save_as_mainfile(filepath=r'{}')",
            input.dae_path.display(),
            input.scene_path.display()
        );
        let args = vec![
            "--background".to_string(),
            "--factory-startup".to_string(),
            "--python-expr".to_string(),
            expr,
        ];
        self.run_blender(&args, "場景匯入")
    }
}
