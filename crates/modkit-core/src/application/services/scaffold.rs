//! Scaffold service - generates starter files for a new module.
//!
//! Generation order is significant: the module config file is written last
//! because its content cross-references the paths produced by the earlier
//! steps, and the overwrite guard runs before any file is written so an
//! early rejection never leaves partial output behind.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::FileSystem;
use crate::application::services::FileGenerator;
use crate::domain::{
    ARG_DEFAULT_CR_FILE, ARG_MANIFEST_FILE, ARG_MODULE_CHANNEL, ARG_MODULE_NAME,
    ARG_MODULE_VERSION, ARG_SECURITY_CONFIG_FILE, KeyValueArgs, validate_channel,
};
use crate::error::CoreResult;

/// Options for one scaffold run.
///
/// The default CR and security config file names are optional; an absent name
/// skips that generation step and the module config cross-references an empty
/// path instead.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub directory: PathBuf,
    pub module_name: String,
    pub module_version: String,
    pub module_channel: String,
    pub manifest_file: String,
    pub default_cr_file: Option<String>,
    pub security_config_file: Option<String>,
    pub module_config_file: String,
    pub overwrite: bool,
}

impl ScaffoldOptions {
    fn validate(&self) -> Result<(), ApplicationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ApplicationError::invalid_option(
                "directory",
                "must not be empty",
            ));
        }
        if self.module_name.is_empty() {
            return Err(ApplicationError::invalid_option(
                "module_name",
                "must not be empty",
            ));
        }
        if self.module_version.is_empty() {
            return Err(ApplicationError::invalid_option(
                "module_version",
                "must not be empty",
            ));
        }
        validate_channel(&self.module_channel)
            .map_err(|reason| ApplicationError::invalid_option("module_channel", reason))?;
        if self.manifest_file.is_empty() {
            return Err(ApplicationError::invalid_option(
                "manifest_file",
                "must not be empty",
            ));
        }
        if self.module_config_file.is_empty() {
            return Err(ApplicationError::invalid_option(
                "module_config_file",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Composes the per-file generators into one "create scaffold" operation.
pub struct ScaffoldService {
    filesystem: Arc<dyn FileSystem>,
    manifest: FileGenerator,
    default_cr: FileGenerator,
    security_config: FileGenerator,
    module_config: FileGenerator,
}

impl ScaffoldService {
    pub fn new(
        filesystem: Arc<dyn FileSystem>,
        manifest: FileGenerator,
        default_cr: FileGenerator,
        security_config: FileGenerator,
        module_config: FileGenerator,
    ) -> Self {
        Self {
            filesystem,
            manifest,
            default_cr,
            security_config,
            module_config,
        }
    }

    /// Generate the scaffold file set.
    ///
    /// Already-written files are not rolled back when a later step fails;
    /// this is accepted lossy behavior, not an atomic operation.
    #[instrument(skip_all, fields(module = %opts.module_name, directory = %opts.directory.display()))]
    pub fn create_scaffold(&self, opts: &ScaffoldOptions) -> CoreResult<()> {
        opts.validate()?;

        let module_config_path = opts.directory.join(&opts.module_config_file);
        if self.filesystem.file_exists(&module_config_path) && !opts.overwrite {
            return Err(ApplicationError::FileOverwrite {
                path: module_config_path,
            }
            .into());
        }

        let manifest_path = opts.directory.join(&opts.manifest_file);
        self.generate(&self.manifest, &manifest_path, &opts.manifest_file, None)?;
        info!(file = %manifest_path.display(), "generated manifest file");

        // Skipped steps resolve to an empty path so the module config can
        // still cross-reference them uniformly.
        let mut default_cr_path = String::new();
        if let Some(name) = opts.default_cr_file.as_deref().filter(|n| !n.is_empty()) {
            let path = opts.directory.join(name);
            self.generate(&self.default_cr, &path, name, None)?;
            info!(file = %path.display(), "generated default CR file");
            default_cr_path = path.display().to_string();
        }

        let mut security_config_path = String::new();
        if let Some(name) = opts
            .security_config_file
            .as_deref()
            .filter(|n| !n.is_empty())
        {
            let path = opts.directory.join(name);
            let args = KeyValueArgs::new().with(ARG_MODULE_NAME, &opts.module_name);
            self.generate(&self.security_config, &path, name, Some(&args))?;
            info!(file = %path.display(), "generated security config file");
            security_config_path = path.display().to_string();
        }

        let args = KeyValueArgs::new()
            .with(ARG_MODULE_NAME, &opts.module_name)
            .with(ARG_MODULE_VERSION, &opts.module_version)
            .with(ARG_MODULE_CHANNEL, &opts.module_channel)
            .with(ARG_MANIFEST_FILE, &opts.manifest_file)
            .with(ARG_DEFAULT_CR_FILE, default_cr_path)
            .with(ARG_SECURITY_CONFIG_FILE, security_config_path);
        self.generate(
            &self.module_config,
            &module_config_path,
            &opts.module_config_file,
            Some(&args),
        )?;
        info!(file = %module_config_path.display(), "generated module config file");

        Ok(())
    }

    fn generate(
        &self,
        generator: &FileGenerator,
        path: &std::path::Path,
        name: &str,
        args: Option<&KeyValueArgs>,
    ) -> CoreResult<()> {
        generator.generate(path, args).map_err(|err| {
            ApplicationError::GenerateFile {
                name: name.to_owned(),
                source: Box::new(err),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ContentProvider;
    use crate::error::{CoreError, PortError};
    use std::path::Path;
    use std::sync::Mutex;

    /// Records writes in order; reports configurable pre-existing files.
    #[derive(Default)]
    struct FakeFileSystem {
        existing: Vec<PathBuf>,
        writes: Mutex<Vec<(PathBuf, String)>>,
        fail_on: Option<PathBuf>,
    }

    impl FileSystem for FakeFileSystem {
        fn write_file(&self, path: &Path, content: &str) -> Result<(), PortError> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(PortError::msg("disk full"));
            }
            self.writes
                .lock()
                .unwrap()
                .push((path.to_path_buf(), content.to_owned()));
            Ok(())
        }

        fn file_exists(&self, path: &Path) -> bool {
            self.existing.iter().any(|p| p == path)
        }
    }

    fn service_with(fs: Arc<FakeFileSystem>) -> ScaffoldService {
        ScaffoldService::new(
            fs.clone(),
            FileGenerator::new(ContentProvider::fixed("# manifest\n"), fs.clone()),
            FileGenerator::new(ContentProvider::fixed("# default CR\n"), fs.clone()),
            FileGenerator::new(
                ContentProvider::templated("module-name: {{ModuleName}}\n"),
                fs.clone(),
            ),
            FileGenerator::new(
                ContentProvider::templated(
                    "name: {{ModuleName}}\nversion: {{ModuleVersion}}\nchannel: {{ModuleChannel}}\nmanifest: {{ManifestFile}}\ndefaultCR: {{DefaultCRFile}}\nsecurity: {{SecurityConfigFile}}\n",
                ),
                fs,
            ),
        )
    }

    fn options() -> ScaffoldOptions {
        ScaffoldOptions {
            directory: PathBuf::from("/tmp/mod"),
            module_name: "template-operator".into(),
            module_version: "1.0.0".into(),
            module_channel: "regular".into(),
            manifest_file: "manifest.yaml".into(),
            default_cr_file: None,
            security_config_file: None,
            module_config_file: "module-config.yaml".into(),
            overwrite: false,
        }
    }

    #[test]
    fn minimal_scaffold_writes_two_files_config_last() {
        let fs = Arc::new(FakeFileSystem::default());
        let service = service_with(fs.clone());

        service.create_scaffold(&options()).unwrap();

        let writes = fs.writes.lock().unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].0, PathBuf::from("/tmp/mod/manifest.yaml"));
        assert_eq!(writes[1].0, PathBuf::from("/tmp/mod/module-config.yaml"));
        // Skipped steps cross-reference as empty strings.
        assert!(writes[1].1.contains("manifest: manifest.yaml"));
        assert!(writes[1].1.contains("defaultCR: \n"));
        assert!(writes[1].1.contains("security: \n"));
    }

    #[test]
    fn full_scaffold_writes_four_files_and_cross_references() {
        let fs = Arc::new(FakeFileSystem::default());
        let service = service_with(fs.clone());

        let mut opts = options();
        opts.default_cr_file = Some("default-cr.yaml".into());
        opts.security_config_file = Some("sec-scan.yaml".into());
        service.create_scaffold(&opts).unwrap();

        let writes = fs.writes.lock().unwrap();
        let paths: Vec<_> = writes.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/tmp/mod/manifest.yaml"),
                PathBuf::from("/tmp/mod/default-cr.yaml"),
                PathBuf::from("/tmp/mod/sec-scan.yaml"),
                PathBuf::from("/tmp/mod/module-config.yaml"),
            ]
        );
        // Security config had the module name substituted.
        assert_eq!(writes[2].1, "module-name: template-operator\n");
        // Module config cross-references the generated paths.
        assert!(writes[3].1.contains("defaultCR: /tmp/mod/default-cr.yaml"));
        assert!(writes[3].1.contains("security: /tmp/mod/sec-scan.yaml"));
    }

    #[test]
    fn existing_module_config_blocks_everything() {
        let fs = Arc::new(FakeFileSystem {
            existing: vec![PathBuf::from("/tmp/mod/module-config.yaml")],
            ..Default::default()
        });
        let service = service_with(fs.clone());

        let err = service.create_scaffold(&options()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::FileOverwrite { .. })
        ));
        assert!(fs.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn overwrite_flag_bypasses_guard() {
        let fs = Arc::new(FakeFileSystem {
            existing: vec![PathBuf::from("/tmp/mod/module-config.yaml")],
            ..Default::default()
        });
        let service = service_with(fs.clone());

        let mut opts = options();
        opts.overwrite = true;
        service.create_scaffold(&opts).unwrap();
        assert_eq!(fs.writes.lock().unwrap().len(), 2);
    }

    #[test]
    fn generation_failure_names_the_file() {
        let fs = Arc::new(FakeFileSystem {
            fail_on: Some(PathBuf::from("/tmp/mod/manifest.yaml")),
            ..Default::default()
        });
        let service = service_with(fs.clone());

        let err = service.create_scaffold(&options()).unwrap_err();
        assert!(err.to_string().contains("failed generating file manifest.yaml"));
        // Underlying cause preserved in the chain.
        let mut source = std::error::Error::source(&err);
        let mut found = false;
        while let Some(inner) = source {
            if inner.to_string().contains("disk full") {
                found = true;
                break;
            }
            source = inner.source();
        }
        assert!(found, "expected 'disk full' in the error chain");
    }

    #[test]
    fn empty_module_config_file_name_is_invalid() {
        let fs = Arc::new(FakeFileSystem::default());
        let service = service_with(fs.clone());

        let mut opts = options();
        opts.module_config_file = String::new();
        let err = service.create_scaffold(&opts).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::InvalidOption {
                field: "module_config_file",
                ..
            })
        ));
        assert!(fs.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn bad_channel_is_invalid() {
        let fs = Arc::new(FakeFileSystem::default());
        let service = service_with(fs);

        let mut opts = options();
        opts.module_channel = "Hourly".into();
        let err = service.create_scaffold(&opts).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::InvalidOption {
                field: "module_channel",
                ..
            })
        ));
    }
}
