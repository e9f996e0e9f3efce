//! # modkit-adapters
//!
//! Infrastructure implementations of the `modkit-core` ports:
//!
//! - [`filesystem`]: local (`std::fs`) and in-memory filesystems
//! - [`defaults`]: the default content shipped for scaffolded files
//! - [`module_config`]: YAML module config parsing and default CR resolution
//! - [`git_sources`]: git provenance via `git2`
//! - [`security_config`]: security scan config parsing and descriptor labels
//! - [`crd_parser`]: CRD cluster-scope introspection
//! - [`archive`]: directory-based content-addressed component archives
//! - [`registry`]: HTTP registry client
//! - [`module_template`]: module template document rendering

pub mod archive;
pub mod crd_parser;
pub mod defaults;
pub mod filesystem;
pub mod git_sources;
pub mod module_config;
pub mod module_template;
pub mod registry;
pub mod security_config;

pub use archive::DirComponentArchiver;
pub use crd_parser::YamlCrdParser;
pub use filesystem::{LocalFileSystem, MemoryFileSystem};
pub use git_sources::GitSourcesService;
pub use module_config::YamlModuleConfigService;
pub use module_template::YamlModuleTemplateService;
pub use registry::HttpRegistry;
pub use security_config::YamlSecurityConfigService;
