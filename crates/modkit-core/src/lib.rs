//! # modkit-core
//!
//! Domain and application layers for the modkit module-packaging tool,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           modkit-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, CreateService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileSystem, Registry, GitSources, …)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     modkit-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The two entry points are deliberately independent: [`application::ScaffoldService`]
//! generates starter files for a new module, [`application::CreateService`]
//! packages an existing module into a component archive and pushes it to a
//! registry. They share only the content-provider/file-generator abstraction.

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ContentProvider, CreateOptions, CreateService, FileGenerator, ScaffoldOptions,
        ScaffoldService,
        ports::{
            ComponentArchiver, CrdParser, FileSystem, GitSources, ModuleConfigProvider,
            ModuleTemplate, Registry, SecurityConfig,
        },
    };
    pub use crate::domain::{
        ComponentArchive, ComponentDescriptor, Credentials, KeyValueArgs, ModuleConfig,
        ModuleResource, SecurityScanConfig,
    };
    pub use crate::error::{CoreError, CoreResult, PortError};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
