//! Unified error handling for modkit-core.
//!
//! Three distinct failure classes flow through the pipelines, and callers
//! must be able to tell them apart:
//!
//! - [`crate::application::ApplicationError`]: option validation failures and
//!   missing collaborators, raised before any side effect occurs.
//! - Port errors propagated verbatim (e.g. a module config that fails to
//!   parse) — the adapter's message is the user-facing message.
//! - Stage errors: a collaborator failed mid-pipeline; wrapped with the
//!   stage's identifying context while preserving the cause as `source()`.
//!
//! Cleanup errors are deliberately *not* represented here: temp-file cleanup
//! is non-fatal and only logged (see `CreateService::create_module`).

use thiserror::Error;

use crate::application::ApplicationError;

/// Error type returned by infrastructure implementing the application ports.
///
/// Adapters wrap whatever concrete error they hit (I/O, YAML, HTTP, git) into
/// this opaque carrier so the core never depends on adapter crates. The inner
/// error stays reachable through `source()` for chain inspection.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PortError(Box<dyn std::error::Error + Send + Sync>);

impl PortError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// A port error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }
}

/// Root error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Option validation or service construction failure.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A port error propagated verbatim (no masking).
    #[error(transparent)]
    Port(#[from] PortError),

    /// A pipeline stage failed; `context` identifies the stage.
    #[error("{context}")]
    Stage {
        context: String,
        #[source]
        source: PortError,
    },
}

impl CoreError {
    /// Wrap a port error with the failing stage's context.
    pub fn stage(context: impl Into<String>, source: PortError) -> Self {
        Self::Stage {
            context: context.into(),
            source,
        }
    }

    /// `true` if this error was raised before any side effect occurred.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::InvalidOption { .. }
                    | ApplicationError::MissingCollaborator { .. }
            )
        )
    }
}

/// Convenient result type alias.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn stage_error_preserves_cause() {
        let err = CoreError::stage("failed to push component version", PortError::msg("boom"));
        assert_eq!(err.to_string(), "failed to push component version");
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }

    #[test]
    fn port_error_is_transparent() {
        let err = CoreError::from(PortError::msg("failed to read module config file"));
        assert!(err.to_string().contains("failed to read module config file"));
    }

    #[test]
    fn validation_classification() {
        let err = CoreError::from(ApplicationError::MissingCollaborator { name: "registry" });
        assert!(err.is_validation());

        let err = CoreError::stage("stage", PortError::msg("x"));
        assert!(!err.is_validation());
    }
}
