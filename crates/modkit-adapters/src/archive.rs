//! Directory-based content-addressable component archives.
//!
//! Layout:
//!
//! ```text
//! <root>/<name>-<version>/
//!   component-descriptor.yaml
//!   blobs/
//!     sha256.<hex>
//! ```
//!
//! Blobs are keyed by their SHA-256 digest; the descriptor references them
//! through `localBlob` access entries.

use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use modkit_core::application::ports::ComponentArchiver;
use modkit_core::domain::{
    ComponentArchive, ComponentDescriptor, ModuleResource, Resource, ResourceAccess,
};
use modkit_core::error::PortError;

const DESCRIPTOR_FILE: &str = "component-descriptor.yaml";
const BLOBS_DIR: &str = "blobs";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to create archive directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write archive descriptor {path}")]
    WriteDescriptor {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize archive descriptor")]
    SerializeDescriptor(#[source] serde_yaml::Error),

    #[error("failed to read resource file {path}")]
    ReadResource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write blob {path}")]
    WriteBlob {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Builds component archives under a base directory.
#[derive(Debug, Clone)]
pub struct DirComponentArchiver {
    base_dir: PathBuf,
}

impl DirComponentArchiver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn archive_dir(&self, descriptor: &ComponentDescriptor) -> PathBuf {
        // Component names contain slashes; flatten them for the directory name.
        let name = descriptor.name.replace('/', "_");
        self.base_dir
            .join(format!("{name}-{}", descriptor.version))
    }

    fn write_descriptor(root: &Path, descriptor: &ComponentDescriptor) -> Result<(), ArchiveError> {
        let yaml =
            serde_yaml::to_string(descriptor).map_err(ArchiveError::SerializeDescriptor)?;
        let path = root.join(DESCRIPTOR_FILE);
        std::fs::write(&path, yaml)
            .map_err(|source| ArchiveError::WriteDescriptor { path, source })
    }
}

impl ComponentArchiver for DirComponentArchiver {
    fn create_component_archive(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<ComponentArchive, PortError> {
        let root = self.archive_dir(&descriptor);
        let blobs = root.join(BLOBS_DIR);
        std::fs::create_dir_all(&blobs).map_err(|source| {
            PortError::new(ArchiveError::CreateDir {
                path: blobs.clone(),
                source,
            })
        })?;

        Self::write_descriptor(&root, &descriptor).map_err(PortError::new)?;
        debug!(path = %root.display(), "created component archive");
        Ok(ComponentArchive::new(descriptor, root))
    }

    fn add_module_resources(
        &self,
        archive: &mut ComponentArchive,
        resources: Vec<ModuleResource>,
    ) -> Result<(), PortError> {
        let root = archive.root().to_path_buf();
        for resource in resources {
            let data = std::fs::read(&resource.path).map_err(|source| {
                PortError::new(ArchiveError::ReadResource {
                    path: resource.path.clone(),
                    source,
                })
            })?;

            let digest = hex::encode(Sha256::digest(&data));
            let blob_path = root.join(BLOBS_DIR).join(format!("sha256.{digest}"));
            std::fs::write(&blob_path, &data).map_err(|source| {
                PortError::new(ArchiveError::WriteBlob {
                    path: blob_path.clone(),
                    source,
                })
            })?;

            let version = archive.descriptor().version.clone();
            archive.descriptor_mut().add_resource(Resource {
                name: resource.kind.as_str().to_owned(),
                resource_type: "yaml".to_owned(),
                version,
                relation: "local".to_owned(),
                access: ResourceAccess {
                    access_type: "localBlob".to_owned(),
                    local_reference: format!("sha256:{digest}"),
                    media_type: "application/x-yaml".to_owned(),
                },
            });
        }

        // Resources changed the descriptor; refresh the on-disk copy.
        Self::write_descriptor(&root, archive.descriptor()).map_err(PortError::new)
    }
}
