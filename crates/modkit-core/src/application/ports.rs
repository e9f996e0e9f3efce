//! Capability ports (traits) for external collaborators.
//!
//! The `modkit-adapters` crate provides the production implementations; unit
//! tests substitute `mockall` mocks so the orchestration logic is exercised
//! without touching disk, git, or the network.
//!
//! All ports return [`PortError`] so the core never depends on adapter
//! crates; services wrap these with stage context where the spec requires it
//! and propagate them verbatim otherwise.

use std::path::Path;

use crate::domain::{
    ComponentArchive, ComponentDescriptor, Credentials, DefaultCr, ModuleConfig, ModuleResource,
    RemoteComponentVersion, SecurityScanConfig,
};
use crate::error::PortError;

/// Port for filesystem operations used by file generation.
///
/// Implemented by:
/// - `modkit_adapters::filesystem::LocalFileSystem` (production)
/// - `modkit_adapters::filesystem::MemoryFileSystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Write content to a file, creating or overwriting it. Parent
    /// directories are not created.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), PortError>;

    /// Check whether a file exists.
    fn file_exists(&self, path: &Path) -> bool;
}

/// Port for parsing and validating the module configuration.
///
/// The implementation owns any temp files it creates (e.g. a downloaded
/// default CR) until [`ModuleConfigProvider::cleanup_temp_files`] is called.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleConfigProvider: Send + Sync {
    /// Parse and validate the module config file.
    fn parse_and_validate(&self, path: &Path) -> Result<ModuleConfig, PortError>;

    /// Resolve the default CR referenced by the module config. `reference`
    /// may be a local path or an `http(s)` URL.
    fn default_cr(&self, reference: &str) -> Result<DefaultCr, PortError>;

    /// Remove temp files created during parsing. Returns every removal
    /// failure; callers log them and never fail on them.
    fn cleanup_temp_files(&self) -> Vec<PortError>;
}

/// Port for enriching a descriptor with git provenance.
#[cfg_attr(test, mockall::automock)]
pub trait GitSources: Send + Sync {
    fn add_git_sources(
        &self,
        descriptor: &mut ComponentDescriptor,
        git_remote: &str,
        local_path: &Path,
    ) -> Result<(), PortError>;
}

/// Port for parsing and attaching security scan metadata.
#[cfg_attr(test, mockall::automock)]
pub trait SecurityConfig: Send + Sync {
    fn parse_security_config(
        &self,
        path: &Path,
        module_version: &str,
    ) -> Result<SecurityScanConfig, PortError>;

    fn append_security_scan_config(
        &self,
        descriptor: &mut ComponentDescriptor,
        config: &SecurityScanConfig,
    ) -> Result<(), PortError>;
}

/// Port for CRD cluster-scope introspection.
#[cfg_attr(test, mockall::automock)]
pub trait CrdParser: Send + Sync {
    /// Whether the CRD for `kind` found at `crd_path` declares cluster scope.
    fn is_crd_cluster_scoped(&self, crd_path: &Path, kind: &str) -> Result<bool, PortError>;
}

/// Port for building the content-addressable component archive.
#[cfg_attr(test, mockall::automock)]
pub trait ComponentArchiver: Send + Sync {
    /// Materialize an archive from the descriptor. Takes ownership: the
    /// descriptor lives inside the archive from here on.
    fn create_component_archive(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<ComponentArchive, PortError>;

    /// Attach module files as content-addressed archive resources.
    fn add_module_resources(
        &self,
        archive: &mut ComponentArchive,
        resources: Vec<ModuleResource>,
    ) -> Result<(), PortError>;
}

/// Port for the remote component registry.
#[cfg_attr(test, mockall::automock)]
pub trait Registry: Send + Sync {
    fn push_component_version(
        &self,
        archive: &ComponentArchive,
        overwrite: bool,
        registry_url: &str,
        credentials: &Credentials,
    ) -> Result<(), PortError>;

    fn get_component_version(
        &self,
        name: &str,
        version: &str,
        registry_url: &str,
        credentials: &Credentials,
    ) -> Result<RemoteComponentVersion, PortError>;
}

/// Port for rendering the final module template document.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleTemplate: Send + Sync {
    fn generate_module_template(
        &self,
        config: &ModuleConfig,
        descriptor: &ComponentDescriptor,
        default_cr: &[u8],
        template_output_only: bool,
        output_path: &Path,
    ) -> Result<(), PortError>;
}
