//! Substitution arguments for templated content generation.

use std::collections::BTreeMap;

// Placeholder names are the contract between the services and the shipped
// default content. A template using `{{ModuleName}}` can expect it to exist.
pub const ARG_MODULE_NAME: &str = "ModuleName";
pub const ARG_MODULE_VERSION: &str = "ModuleVersion";
pub const ARG_MODULE_CHANNEL: &str = "ModuleChannel";
pub const ARG_MANIFEST_FILE: &str = "ManifestFile";
pub const ARG_DEFAULT_CR_FILE: &str = "DefaultCRFile";
pub const ARG_SECURITY_CONFIG_FILE: &str = "SecurityConfigFile";

/// Mapping from placeholder name to substitution value.
///
/// Transient: scoped to a single generation call. Keys are unique; inserting
/// a key twice keeps the latest value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueArgs(BTreeMap<String, String>);

impl KeyValueArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, consuming self for fluent construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_builds_fluently() {
        let args = KeyValueArgs::new()
            .with(ARG_MODULE_NAME, "template-operator")
            .with(ARG_MODULE_VERSION, "1.0.0");

        assert_eq!(args.get(ARG_MODULE_NAME), Some("template-operator"));
        assert_eq!(args.get(ARG_MODULE_VERSION), Some("1.0.0"));
        assert_eq!(args.get(ARG_MODULE_CHANNEL), None);
    }

    #[test]
    fn duplicate_key_keeps_latest() {
        let args = KeyValueArgs::new().with("K", "first").with("K", "second");
        assert_eq!(args.get("K"), Some("second"));
    }
}
