//! Application layer for modkit.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ScaffoldService, CreateService)
//! - **Ports**: trait definitions for external collaborators
//! - **Errors**: application-specific error types
//!
//! The services coordinate the domain layer but contain no infrastructure
//! concerns; everything that touches disk, git, or the network sits behind a
//! port implemented in `modkit-adapters`.

pub mod content;
pub mod error;
pub mod ports;
pub mod services;

pub use content::ContentProvider;
pub use error::ApplicationError;
pub use services::{
    CreateOptions, CreateService, CreateServiceBuilder, FileGenerator, ScaffoldOptions,
    ScaffoldService,
};
