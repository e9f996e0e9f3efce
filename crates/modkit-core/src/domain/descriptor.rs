//! Component descriptor and archive entities.
//!
//! The [`ComponentDescriptor`] is created once per create run, enriched in
//! place by successive pipeline steps (git sources, security scan labels,
//! scope label), then moved into the [`ComponentArchive`] when the archive is
//! materialized. The archive owns the descriptor from that point on.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Provider stamped into every descriptor built by this tool.
pub const PROVIDER: &str = "modkit";

/// Metadata record describing a module's identity, version, and resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    pub version: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl ComponentDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            provider: PROVIDER.to_owned(),
            labels: Vec::new(),
            sources: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn add_label(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.labels.push(Label {
            name: name.into(),
            value,
        });
    }

    pub fn add_source(&mut self, source: Source) {
        self.sources.push(source);
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }
}

/// A named, JSON-valued label on a descriptor, source, or resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: serde_json::Value,
}

/// Provenance entry, e.g. the git repository the module was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub version: String,
    pub access: SourceAccess,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAccess {
    #[serde(rename = "type")]
    pub access_type: String,
    pub repo_url: String,
    pub commit: String,
}

/// A resource reference recorded in the descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub version: String,
    pub relation: String,
    pub access: ResourceAccess,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAccess {
    #[serde(rename = "type")]
    pub access_type: String,
    /// Blob digest, e.g. `sha256:<hex>`.
    pub local_reference: String,
    pub media_type: String,
}

/// Kinds of module files attached to an archive as resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleResourceKind {
    RawManifest,
    DefaultCr,
    SecurityScanConfig,
}

impl ModuleResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RawManifest => "raw-manifest",
            Self::DefaultCr => "default-cr",
            Self::SecurityScanConfig => "security-scan-config",
        }
    }
}

/// A local file to be attached to the archive as a content-addressed blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleResource {
    pub kind: ModuleResourceKind,
    pub path: PathBuf,
}

impl ModuleResource {
    pub fn new(kind: ModuleResourceKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// The materialized, content-addressable artifact.
///
/// Built from a descriptor plus a set of resources; lives in a directory
/// managed by the archiver adapter. Logically read-only after push.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentArchive {
    descriptor: ComponentDescriptor,
    root: PathBuf,
}

impl ComponentArchive {
    pub fn new(descriptor: ComponentDescriptor, root: impl Into<PathBuf>) -> Self {
        Self {
            descriptor,
            root: root.into(),
        }
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    /// Mutable access for the archiver while resources are being attached.
    pub fn descriptor_mut(&mut self) -> &mut ComponentDescriptor {
        &mut self.descriptor
    }

    /// On-disk location of the archive contents.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A component version fetched from a remote registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteComponentVersion {
    pub name: String,
    pub version: String,
    pub descriptor: ComponentDescriptor,
}
