//! Module config parsing, validation, and default CR resolution.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;
use url::Url;

use modkit_core::application::ports::ModuleConfigProvider;
use modkit_core::domain::{DefaultCr, ModuleConfig, validate_channel};
use modkit_core::error::PortError;

#[derive(Debug, Error)]
pub enum ModuleConfigError {
    #[error("failed to read module config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse module config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid module config: {0}")]
    Validate(String),

    #[error("failed to read default CR file {path}")]
    ReadDefaultCr {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to download default CR from {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to store downloaded default CR")]
    StoreDownload(#[source] io::Error),

    #[error("failed to remove temp file {path}")]
    RemoveTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Production [`ModuleConfigProvider`] backed by local files and HTTP.
///
/// A default CR referenced by URL is downloaded to a temp file the service
/// owns; the file stays on disk until [`cleanup_temp_files`] runs so later
/// pipeline steps can read it by path.
///
/// [`cleanup_temp_files`]: ModuleConfigProvider::cleanup_temp_files
pub struct YamlModuleConfigService {
    http: reqwest::blocking::Client,
    temp_files: Mutex<Vec<PathBuf>>,
}

impl YamlModuleConfigService {
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            temp_files: Mutex::new(Vec::new()),
        }
    }

    fn validate(config: &ModuleConfig) -> Result<(), ModuleConfigError> {
        if config.name.is_empty() {
            return Err(ModuleConfigError::Validate("name must not be empty".into()));
        }
        if !config.name.contains('/') {
            return Err(ModuleConfigError::Validate(format!(
                "name {} must be a fully qualified component name, e.g. example.io/module/sample",
                config.name
            )));
        }
        if let Err(err) = semver::Version::parse(&config.version) {
            return Err(ModuleConfigError::Validate(format!(
                "version {} is not a valid semantic version: {err}",
                config.version
            )));
        }
        if let Err(reason) = validate_channel(&config.channel) {
            return Err(ModuleConfigError::Validate(reason));
        }
        if config.manifest.is_empty() {
            return Err(ModuleConfigError::Validate(
                "manifest must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn download_default_cr(&self, url: &Url) -> Result<DefaultCr, ModuleConfigError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|source| ModuleConfigError::Download {
                url: url.to_string(),
                source,
            })?;
        let data = response
            .bytes()
            .map_err(|source| ModuleConfigError::Download {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        let temp = tempfile::Builder::new()
            .prefix("modkit-default-cr-")
            .suffix(".yaml")
            .tempfile()
            .map_err(ModuleConfigError::StoreDownload)?;
        std::fs::write(temp.path(), &data).map_err(ModuleConfigError::StoreDownload)?;
        let (_, path) = temp.keep().map_err(|err| {
            ModuleConfigError::StoreDownload(io::Error::other(err.to_string()))
        })?;

        debug!(url = %url, path = %path.display(), "downloaded default CR");
        self.temp_files.lock().unwrap().push(path.clone());

        Ok(DefaultCr { path, data })
    }
}

impl Default for YamlModuleConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleConfigProvider for YamlModuleConfigService {
    fn parse_and_validate(&self, path: &Path) -> Result<ModuleConfig, PortError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            PortError::new(ModuleConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let config: ModuleConfig = serde_yaml::from_str(&raw).map_err(|source| {
            PortError::new(ModuleConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::validate(&config).map_err(PortError::new)?;
        debug!(name = %config.name, version = %config.version, "parsed module config");
        Ok(config)
    }

    fn default_cr(&self, reference: &str) -> Result<DefaultCr, PortError> {
        if let Ok(url) = Url::parse(reference) {
            if matches!(url.scheme(), "http" | "https") {
                return self.download_default_cr(&url).map_err(PortError::new);
            }
        }

        let path = PathBuf::from(reference);
        let data = std::fs::read(&path).map_err(|source| {
            PortError::new(ModuleConfigError::ReadDefaultCr {
                path: path.clone(),
                source,
            })
        })?;
        Ok(DefaultCr { path, data })
    }

    fn cleanup_temp_files(&self) -> Vec<PortError> {
        let paths: Vec<PathBuf> = self.temp_files.lock().unwrap().drain(..).collect();
        let mut failures = Vec::new();
        for path in paths {
            if let Err(source) = std::fs::remove_file(&path) {
                failures.push(PortError::new(ModuleConfigError::RemoveTemp {
                    path,
                    source,
                }));
            }
        }
        failures
    }
}
