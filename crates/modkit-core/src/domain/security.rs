//! Security scan configuration.

use serde::{Deserialize, Serialize};

/// Parsed security-scan metadata.
///
/// Independent lifecycle: parsed from its own file, attached to the
/// descriptor as labels, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SecurityScanConfig {
    pub module_name: String,
    /// Release candidate tag the scanners pin to.
    #[serde(default)]
    pub rc_tag: String,
    /// Branch the scanners track for development findings.
    #[serde(default)]
    pub dev_branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mend: Option<ScannerConfig>,
}

/// Per-scanner settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}
