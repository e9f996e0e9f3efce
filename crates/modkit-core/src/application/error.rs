//! Application layer errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::CoreError;

/// Errors raised by option validation, service construction, and file
/// generation — everything that is not a collaborator failure.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A required collaborator was not supplied at construction time.
    /// Fatal: the service is never built.
    #[error("missing required collaborator: {name}")]
    MissingCollaborator { name: &'static str },

    /// A user-supplied option failed validation. Reported before any side
    /// effect occurs.
    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    /// A generation step failed; `name` is the target file name.
    #[error("failed generating file {name}")]
    GenerateFile {
        name: String,
        #[source]
        source: Box<CoreError>,
    },

    /// The target file exists and overwrite is disabled. Raised before any
    /// file is written, distinct from generation errors.
    #[error("file {path} already exists, use overwrite to regenerate the file")]
    FileOverwrite { path: PathBuf },

    /// A templated content provider referenced a placeholder with no
    /// corresponding argument.
    #[error("missing substitution argument '{key}'")]
    MissingArgument { key: String },
}

impl ApplicationError {
    pub fn invalid_option(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            reason: reason.into(),
        }
    }
}
