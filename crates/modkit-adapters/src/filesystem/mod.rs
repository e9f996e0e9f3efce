//! Filesystem adapters.

pub mod local;
pub mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
