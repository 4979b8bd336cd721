use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use crate::config::config::has_extension;
use crate::config::ports::ConfigPort;
use crate::facade::traits::i_bridge::BridgeFacadeTrait;
use crate::models::convert::ConvertInput;
use crate::models::host::{ExportSceneInput, ImportSceneInput};
use crate::models::request::{ExportInput, ExportOutput, ImportInput, ImportOutput};
use crate::service::config_service::ConfigService;
use crate::service::converter_service::{build_export_args, build_import_args};
use crate::service::traits::i_service::{ConverterServiceTrait, HostServiceTrait};

// 匯入中繼檔存放的暫存子目錄
const TEMP_SUBDIR: &str = "BlenderMD";

pub struct BridgeFacade {
    config_service: ConfigService,
    host_service: Box<dyn HostServiceTrait>,
    converter_service: Box<dyn ConverterServiceTrait>,
}

impl BridgeFacade {
    pub fn new(
        config_port: Box<dyn ConfigPort>,
        host_service: Box<dyn HostServiceTrait>,
        converter_service: Box<dyn ConverterServiceTrait>,
    ) -> Self {
        let config_service = ConfigService::new(config_port);
        BridgeFacade {
            config_service,
            host_service,
            converter_service,
        }
    }
}

impl BridgeFacadeTrait for BridgeFacade {
    fn execute_export(&self, input: ExportInput) -> io::Result<ExportOutput> {
        let config = self.config_service.get_config()?;

        if !input.scene_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("場景檔案不存在：{}", input.scene_path.display()),
            ));
        }
        if !has_extension(&input.output_path, "bmd") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("匯出目的路徑必須以 .bmd 結尾：{}", input.output_path.display()),
            ));
        }

        let fbx_path = input.output_path.with_extension("fbx");
        if fbx_path.exists() {
            log::warn!("同名 FBX 檔案已存在，將被覆寫：{}", fbx_path.display());
        }

        info!(
            "開始匯出，場景：{}，目的：{}",
            input.scene_path.display(),
            input.output_path.display()
        );
        self.host_service.export_scene(ExportSceneInput {
            scene_path: input.scene_path.clone(),
            fbx_path: fbx_path.clone(),
        })?;

        let args = build_export_args(&fbx_path, input.rotate, &input.extra_params)?;
        let convert_result = self.converter_service.convert(ConvertInput {
            converter_path: config.converter_path.clone(),
            args,
            timeout: Duration::from_secs(config.timeout_secs),
            no_progress: config.no_progress,
        });
        if let Err(e) = convert_result {
            // 失敗時保留中繼檔，讓使用者可以直接檢查轉換器的輸入
            log::error!("轉換器執行失敗，保留中繼檔：{}", fbx_path.display());
            return Err(e);
        }

        if !input.output_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "轉換器未產生預期的 BMD 檔案：{}",
                    input.output_path.display()
                ),
            ));
        }

        // 轉換器確定結束後才能刪中繼檔
        if fbx_path.exists() {
            std::fs::remove_file(&fbx_path)
                .map_err(|e| io::Error::new(e.kind(), format!("刪除中繼檔失敗：{}", e)))?;
        }

        info!("匯出完成：{}", input.output_path.display());
        Ok(ExportOutput {
            bmd_path: input.output_path,
        })
    }

    fn execute_import(&self, input: ImportInput) -> io::Result<ImportOutput> {
        let config = self.config_service.get_config()?;

        if !has_extension(&input.source_path, "bmd") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("匯入來源必須以 .bmd 結尾：{}", input.source_path.display()),
            ));
        }
        if !input.source_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("匯入來源不存在：{}", input.source_path.display()),
            ));
        }

        let dae_path = import_intermediate_path(&input.source_path)?;
        if let Some(parent) = dae_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("暫存目錄不可寫（{}）：{}", parent.display(), e),
                )
            })?;
        }

        let scene_path = match input.output_path {
            Some(path) => path,
            None => input.source_path.with_extension("blend"),
        };

        info!(
            "開始匯入，來源：{}，中繼檔：{}",
            input.source_path.display(),
            dae_path.display()
        );
        self.converter_service.convert(ConvertInput {
            converter_path: config.converter_path.clone(),
            args: build_import_args(&input.source_path, &dae_path),
            timeout: Duration::from_secs(config.timeout_secs),
            no_progress: config.no_progress,
        })?;

        // 結束碼為零不代表檔案真的產生了，匯入前要先確認
        if !dae_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("轉換器未產生預期的中繼檔：{}", dae_path.display()),
            ));
        }

        self.host_service.import_scene(ImportSceneInput {
            dae_path: dae_path.clone(),
            scene_path: scene_path.clone(),
        })?;

        info!("匯入完成：{}", scene_path.display());
        Ok(ImportOutput { scene_path })
    }
}

// 匯入中繼檔路徑由來源檔名決定，同一來源在單次執行內必然相同
pub fn import_intermediate_path(source_path: &Path) -> io::Result<PathBuf> {
    let stem = source_path.file_stem().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無法取得來源檔名：{}", source_path.display()),
        )
    })?;
    let mut dae_path = std::env::temp_dir().join(TEMP_SUBDIR).join(stem);
    dae_path.set_extension("dae");
    Ok(dae_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ports::BridgeConfig;
    use crate::models::convert::ConvertOutput;
    use crate::service::config_service::ResolvedConfigAdapter;
    use std::fs;
    use std::sync::{Arc, Mutex};

    struct RecordingHost {
        exports: Mutex<Vec<ExportSceneInput>>,
        imports: Mutex<Vec<ImportSceneInput>>,
    }

    impl RecordingHost {
        fn new() -> Arc<Self> {
            Arc::new(RecordingHost {
                exports: Mutex::new(Vec::new()),
                imports: Mutex::new(Vec::new()),
            })
        }
    }

    impl HostServiceTrait for Arc<RecordingHost> {
        fn export_scene(&self, input: ExportSceneInput) -> io::Result<()> {
            fs::write(&input.fbx_path, b"fbx")?;
            self.exports.lock().unwrap().push(input);
            Ok(())
        }

        fn import_scene(&self, input: ImportSceneInput) -> io::Result<()> {
            self.imports.lock().unwrap().push(input);
            Ok(())
        }
    }

    struct RecordingConverter {
        calls: Mutex<Vec<ConvertInput>>,
        produce: Vec<PathBuf>,
        fail_with: Option<io::ErrorKind>,
    }

    impl RecordingConverter {
        fn new(produce: Vec<PathBuf>) -> Arc<Self> {
            Arc::new(RecordingConverter {
                calls: Mutex::new(Vec::new()),
                produce,
                fail_with: None,
            })
        }

        fn failing(kind: io::ErrorKind) -> Arc<Self> {
            Arc::new(RecordingConverter {
                calls: Mutex::new(Vec::new()),
                produce: Vec::new(),
                fail_with: Some(kind),
            })
        }
    }

    impl ConverterServiceTrait for Arc<RecordingConverter> {
        fn convert(&self, input: ConvertInput) -> io::Result<ConvertOutput> {
            self.calls.lock().unwrap().push(input);
            if let Some(kind) = self.fail_with {
                return Err(io::Error::new(kind, "轉換器測試失敗"));
            }
            for path in &self.produce {
                fs::write(path, b"out").unwrap();
            }
            Ok(ConvertOutput { exit_code: 0 })
        }
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blender_md_facade_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fake_converter_exe(dir: &Path) -> PathBuf {
        let exe = dir.join("SuperBMD.exe");
        fs::write(&exe, b"bin").unwrap();
        exe
    }

    fn facade_with(
        converter_path: PathBuf,
        host: Arc<RecordingHost>,
        converter: Arc<RecordingConverter>,
    ) -> BridgeFacade {
        let config = BridgeConfig {
            converter_path,
            blender_path: PathBuf::from("blender"),
            timeout_secs: 300,
            no_progress: true,
        };
        BridgeFacade::new(
            Box::new(ResolvedConfigAdapter::new(config)),
            Box::new(host),
            Box::new(converter),
        )
    }

    #[test]
    fn export_invokes_converter_then_deletes_intermediate() {
        let dir = test_dir("export_ok");
        let exe = fake_converter_exe(&dir);
        let scene = dir.join("model.blend");
        fs::write(&scene, b"scene").unwrap();
        let output = dir.join("model.bmd");
        let fbx = dir.join("model.fbx");

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(vec![output.clone()]);
        let facade = facade_with(exe, host.clone(), converter.clone());

        let result = facade
            .execute_export(ExportInput {
                scene_path: scene.clone(),
                output_path: output.clone(),
                rotate: true,
                extra_params: "-t".to_string(),
            })
            .unwrap();

        let calls = converter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec![fbx.display().to_string(), "--rotate".to_string(), "-t".to_string()]
        );
        let exports = host.exports.lock().unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].fbx_path, fbx);
        assert_eq!(result.bmd_path, output);
        assert!(output.exists());
        assert!(!fbx.exists(), "中繼檔應在轉換器結束後被刪除");
    }

    #[test]
    fn export_without_rotate_omits_the_flag() {
        let dir = test_dir("export_no_rotate");
        let exe = fake_converter_exe(&dir);
        let scene = dir.join("model.blend");
        fs::write(&scene, b"scene").unwrap();
        let output = dir.join("model.bmd");

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(vec![output.clone()]);
        let facade = facade_with(exe, host, converter.clone());

        facade
            .execute_export(ExportInput {
                scene_path: scene,
                output_path: output,
                rotate: false,
                extra_params: String::new(),
            })
            .unwrap();

        let calls = converter.calls.lock().unwrap();
        assert_eq!(calls[0].args.len(), 1);
        assert!(!calls[0].args.contains(&"--rotate".to_string()));
    }

    #[test]
    fn export_keeps_intermediate_when_converter_fails() {
        let dir = test_dir("export_fail");
        let exe = fake_converter_exe(&dir);
        let scene = dir.join("model.blend");
        fs::write(&scene, b"scene").unwrap();
        let output = dir.join("model.bmd");
        let fbx = dir.join("model.fbx");

        let host = RecordingHost::new();
        let converter = RecordingConverter::failing(io::ErrorKind::Other);
        let facade = facade_with(exe, host, converter);

        let err = facade
            .execute_export(ExportInput {
                scene_path: scene,
                output_path: output.clone(),
                rotate: true,
                extra_params: String::new(),
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(fbx.exists(), "轉換失敗時必須保留中繼檔");
        assert!(!output.exists());
    }

    #[test]
    fn export_fails_when_converter_produces_no_bmd() {
        let dir = test_dir("export_missing_bmd");
        let exe = fake_converter_exe(&dir);
        let scene = dir.join("model.blend");
        fs::write(&scene, b"scene").unwrap();
        let output = dir.join("model.bmd");
        let fbx = dir.join("model.fbx");

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(Vec::new());
        let facade = facade_with(exe, host, converter);

        let err = facade
            .execute_export(ExportInput {
                scene_path: scene,
                output_path: output,
                rotate: true,
                extra_params: String::new(),
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fbx.exists());
    }

    #[test]
    fn unset_converter_is_rejected_before_any_launch() {
        let dir = test_dir("config_error");
        let scene = dir.join("model.blend");
        fs::write(&scene, b"scene").unwrap();

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(Vec::new());
        let facade = facade_with(PathBuf::new(), host.clone(), converter.clone());

        let err = facade
            .execute_export(ExportInput {
                scene_path: scene,
                output_path: dir.join("model.bmd"),
                rotate: true,
                extra_params: String::new(),
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(converter.calls.lock().unwrap().is_empty());
        assert!(host.exports.lock().unwrap().is_empty());
    }

    #[test]
    fn import_uses_deterministic_temp_path_and_invokes_host() {
        let dir = test_dir("import_ok");
        let exe = fake_converter_exe(&dir);
        let source = dir.join("model.bmd");
        fs::write(&source, b"bmd").unwrap();

        let dae = import_intermediate_path(&source).unwrap();
        assert_eq!(
            dae,
            std::env::temp_dir().join("BlenderMD").join("model.dae")
        );
        let _ = fs::remove_file(&dae);

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(vec![dae.clone()]);
        let facade = facade_with(exe, host.clone(), converter.clone());

        let result = facade
            .execute_import(ImportInput {
                source_path: source.clone(),
                output_path: None,
            })
            .unwrap();

        let calls = converter.calls.lock().unwrap();
        assert_eq!(
            calls[0].args,
            vec![source.display().to_string(), dae.display().to_string()]
        );
        let imports = host.imports.lock().unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].dae_path, dae);
        assert_eq!(result.scene_path, source.with_extension("blend"));
    }

    #[test]
    fn import_intermediate_path_is_stable_per_source() {
        let source = Path::new("/models/enemy.bmd");
        assert_eq!(
            import_intermediate_path(source).unwrap(),
            import_intermediate_path(source).unwrap()
        );
    }

    #[test]
    fn import_fails_when_intermediate_is_missing() {
        let dir = test_dir("import_missing_dae");
        let exe = fake_converter_exe(&dir);
        let source = dir.join("ghost.bmd");
        fs::write(&source, b"bmd").unwrap();
        let dae = import_intermediate_path(&source).unwrap();
        let _ = fs::remove_file(&dae);

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(Vec::new());
        let facade = facade_with(exe, host.clone(), converter);

        let err = facade
            .execute_import(ImportInput {
                source_path: source,
                output_path: None,
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(
            host.imports.lock().unwrap().is_empty(),
            "中繼檔不存在時不得呼叫匯入"
        );
    }

    #[test]
    fn import_rejects_non_bmd_source() {
        let dir = test_dir("import_bad_ext");
        let exe = fake_converter_exe(&dir);
        let source = dir.join("model.fbx");
        fs::write(&source, b"x").unwrap();

        let host = RecordingHost::new();
        let converter = RecordingConverter::new(Vec::new());
        let facade = facade_with(exe, host, converter.clone());

        let err = facade
            .execute_import(ImportInput {
                source_path: source,
                output_path: None,
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(converter.calls.lock().unwrap().is_empty());
    }
}
