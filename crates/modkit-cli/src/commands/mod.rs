//! Command handlers.
//!
//! Each handler wires the adapters into the core services and translates
//! the parsed arguments into service options.

pub mod completions;
pub mod create;
pub mod scaffold;
