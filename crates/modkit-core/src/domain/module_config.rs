//! The user-supplied module configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Parsed representation of the module configuration file.
///
/// Immutable after parse: the config service hands it to the create pipeline
/// and nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Component name, e.g. `example.io/module/template-operator`.
    pub name: String,
    /// Semver module version.
    pub version: String,
    /// Release channel, e.g. `regular` or `fast`.
    pub channel: String,
    /// Path to the manifest holding all module resources, relative to the
    /// module config file.
    pub manifest: String,
    /// Path or URL of the default custom resource. Optional.
    #[serde(default, rename = "defaultCR", skip_serializing_if = "Option::is_none")]
    pub default_cr: Option<String>,
    /// Path of the security scan configuration. Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    /// Free-form annotations propagated into the module template.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ModuleConfig {
    /// `true` when the config references a default CR.
    pub fn has_default_cr(&self) -> bool {
        self.default_cr.as_deref().is_some_and(|cr| !cr.is_empty())
    }

    /// `true` when the config references a security scan configuration.
    pub fn has_security_config(&self) -> bool {
        self.security.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Default CR content resolved by the module config service.
///
/// `path` is always a readable local file: when the config references a URL,
/// the service downloads it to a temp file it owns until cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCr {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Validate a release channel name: 3 to 32 lowercase letters.
///
/// Shared between scaffold option validation and module config parsing.
pub fn validate_channel(channel: &str) -> Result<(), String> {
    if channel.len() < 3 || channel.len() > 32 {
        return Err(format!(
            "channel length must be between 3 and 32, got {}",
            channel.len()
        ));
    }
    if !channel.chars().all(|c| c.is_ascii_lowercase()) {
        return Err("channel must consist of lowercase letters only".to_owned());
    }
    Ok(())
}
