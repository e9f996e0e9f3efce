//! CRD scope introspection over multi-document manifests.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use modkit_core::application::ports::CrdParser;
use modkit_core::error::PortError;

#[derive(Debug, Error)]
pub enum CrdParserError {
    #[error("failed to read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CrdDocument {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    spec: CrdSpec,
}

#[derive(Debug, Default, Deserialize)]
struct CrdSpec {
    #[serde(default)]
    scope: String,
    #[serde(default)]
    names: CrdNames,
}

#[derive(Debug, Default, Deserialize)]
struct CrdNames {
    #[serde(default)]
    kind: String,
}

/// Scans a multi-document manifest for the CustomResourceDefinition matching
/// a given kind and reports whether it declares `Cluster` scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCrdParser;

impl YamlCrdParser {
    pub fn new() -> Self {
        Self
    }
}

impl CrdParser for YamlCrdParser {
    fn is_crd_cluster_scoped(&self, crd_path: &Path, kind: &str) -> Result<bool, PortError> {
        let raw = std::fs::read_to_string(crd_path).map_err(|source| {
            PortError::new(CrdParserError::Read {
                path: crd_path.to_path_buf(),
                source,
            })
        })?;

        for document in serde_yaml::Deserializer::from_str(&raw) {
            // Manifests mix CRDs with deployments, RBAC, and other kinds
            // whose shapes don't match; skip documents that don't fit.
            let Ok(doc) = CrdDocument::deserialize(document) else {
                continue;
            };
            if doc.kind == "CustomResourceDefinition" && doc.spec.names.kind == kind {
                return Ok(doc.spec.scope == "Cluster");
            }
        }

        debug!(kind, path = %crd_path.display(), "no matching CRD found in manifest");
        Ok(false)
    }
}
