//! Application services.

pub mod create;
pub mod file_generator;
pub mod scaffold;

pub use create::{CreateOptions, CreateService, CreateServiceBuilder};
pub use file_generator::FileGenerator;
pub use scaffold::{ScaffoldOptions, ScaffoldService};
