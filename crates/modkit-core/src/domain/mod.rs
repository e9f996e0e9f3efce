//! Core domain layer for modkit.
//!
//! Pure data and validation rules — no I/O, no network, no filesystem.
//! Everything here is request-scoped: no entity survives past a single
//! `create_module` or `create_scaffold` invocation.

pub mod args;
pub mod credentials;
pub mod descriptor;
pub mod module_config;
pub mod security;

pub use args::{
    ARG_DEFAULT_CR_FILE, ARG_MANIFEST_FILE, ARG_MODULE_CHANNEL, ARG_MODULE_NAME,
    ARG_MODULE_VERSION, ARG_SECURITY_CONFIG_FILE, KeyValueArgs,
};
pub use credentials::{Credentials, CredentialsError};
pub use descriptor::{
    ComponentArchive, ComponentDescriptor, Label, ModuleResource, ModuleResourceKind,
    RemoteComponentVersion, Resource, ResourceAccess, Source, SourceAccess,
};
pub use module_config::{DefaultCr, ModuleConfig, validate_channel};
pub use security::SecurityScanConfig;
