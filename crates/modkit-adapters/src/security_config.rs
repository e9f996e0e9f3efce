//! Security scan configuration parsing and descriptor labelling.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use modkit_core::application::ports::SecurityConfig;
use modkit_core::domain::{ComponentDescriptor, SecurityScanConfig};
use modkit_core::error::PortError;

const LABEL_SCAN: &str = "security.modkit.io/scan";
const LABEL_RC_TAG: &str = "security.modkit.io/rc-tag";
const LABEL_DEV_BRANCH: &str = "security.modkit.io/dev-branch";
const LABEL_MEND_LANGUAGE: &str = "security.modkit.io/mend-language";
const LABEL_MEND_EXCLUDE: &str = "security.modkit.io/mend-exclude";

#[derive(Debug, Error)]
pub enum SecurityConfigError {
    #[error("failed to read security config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse security config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid security config: {0}")]
    Validate(String),
}

/// Production [`SecurityConfig`] implementation reading YAML scan configs.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSecurityConfigService;

impl YamlSecurityConfigService {
    pub fn new() -> Self {
        Self
    }
}

impl SecurityConfig for YamlSecurityConfigService {
    fn parse_security_config(
        &self,
        path: &Path,
        module_version: &str,
    ) -> Result<SecurityScanConfig, PortError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            PortError::new(SecurityConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let mut config: SecurityScanConfig = serde_yaml::from_str(&raw).map_err(|source| {
            PortError::new(SecurityConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
        })?;

        if config.module_name.is_empty() {
            return Err(PortError::new(SecurityConfigError::Validate(
                "module-name must not be empty".into(),
            )));
        }
        // Scanners pin to the released tag unless the config overrides it.
        if config.rc_tag.is_empty() {
            config.rc_tag = module_version.to_owned();
        }

        debug!(module = %config.module_name, rc_tag = %config.rc_tag, "parsed security config");
        Ok(config)
    }

    fn append_security_scan_config(
        &self,
        descriptor: &mut ComponentDescriptor,
        config: &SecurityScanConfig,
    ) -> Result<(), PortError> {
        descriptor.add_label(LABEL_SCAN, serde_json::json!("enabled"));
        descriptor.add_label(LABEL_RC_TAG, serde_json::json!(config.rc_tag));
        descriptor.add_label(LABEL_DEV_BRANCH, serde_json::json!(config.dev_branch));

        if let Some(mend) = &config.mend {
            for source in &mut descriptor.sources {
                source.labels.push(modkit_core::domain::Label {
                    name: LABEL_MEND_LANGUAGE.to_owned(),
                    value: serde_json::json!(mend.language),
                });
                source.labels.push(modkit_core::domain::Label {
                    name: LABEL_MEND_EXCLUDE.to_owned(),
                    value: serde_json::json!(mend.exclude.join(",")),
                });
            }
        }
        Ok(())
    }
}
