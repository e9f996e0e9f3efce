//! Comprehensive error handling for the modkit CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use modkit_core::application::ApplicationError;
use modkit_core::error::CoreError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `modkit-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's shape without touching core internals.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An I/O operation failed at the CLI layer (e.g. writing output).
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(CoreError::Application(app)) => match app {
                ApplicationError::InvalidOption { field, .. } => vec![
                    format!("Check the value supplied for '{}'", field.replace('_', "-")),
                    "Use --help for flag documentation".into(),
                ],
                ApplicationError::FileOverwrite { path } => vec![
                    format!("The file '{}' already exists", path.display()),
                    "Use --overwrite to regenerate it".into(),
                    "Or scaffold into a different --directory".into(),
                ],
                ApplicationError::MissingArgument { key } => vec![
                    format!("The template references '{{{{{key}}}}}' with no value supplied"),
                    "This is a defect in the content template".into(),
                ],
                ApplicationError::GenerateFile { name, .. } => vec![
                    format!("Generation of '{name}' failed"),
                    "Check that the target directory exists and is writable".into(),
                ],
                ApplicationError::MissingCollaborator { .. } => vec![
                    "This is an internal wiring defect, not a usage error".into(),
                ],
            },
            Self::Core(CoreError::Port(_)) => vec![
                "Check the module config file referenced by --config-file".into(),
                "Scaffold a fresh one with: modkit scaffold".into(),
            ],
            Self::Core(CoreError::Stage { context, .. }) => {
                let mut suggestions = vec![format!("Pipeline stage failed: {context}")];
                if context.contains("push") || context.contains("component version") {
                    suggestions.push("Check the --registry URL and --credentials".into());
                }
                if context.contains("git") {
                    suggestions
                        .push("Run from inside the module's git repository checkout".into());
                }
                suggestions.push("Use -v / --verbose to see the underlying cause".into());
                suggestions
            }
            Self::Io { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(CoreError::Application(app)) => match app {
                ApplicationError::InvalidOption { .. }
                | ApplicationError::FileOverwrite { .. } => ErrorCategory::UserError,
                ApplicationError::MissingArgument { .. }
                | ApplicationError::MissingCollaborator { .. }
                | ApplicationError::GenerateFile { .. } => ErrorCategory::Internal,
            },
            // Port errors surface config file problems verbatim.
            Self::Core(CoreError::Port(_)) => ErrorCategory::Configuration,
            Self::Core(CoreError::Stage { context, .. }) => {
                if context.contains("get component version") {
                    ErrorCategory::NotFound
                } else {
                    ErrorCategory::Internal
                }
            }
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(output, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = write!(output, "\n  {} {}\n", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(output, "\n{}", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            output.push('\n');
            let _ = writeln!(
                output,
                "{} {}",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, overwrite refusal).
    UserError,
    /// Resource not found in the registry.
    NotFound,
    /// Module configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::error::PortError;
    use std::io;
    use std::path::PathBuf;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn overwrite_error_suggests_overwrite_flag() {
        let err = CliError::Core(
            ApplicationError::FileOverwrite {
                path: PathBuf::from("/tmp/scaffold-module-config.yaml"),
            }
            .into(),
        );
        assert!(err.suggestions().iter().any(|s| s.contains("--overwrite")));
    }

    #[test]
    fn push_stage_error_suggests_registry_check() {
        let err = CliError::Core(CoreError::stage(
            "failed to push component version",
            PortError::msg("connection refused"),
        ));
        assert!(err.suggestions().iter().any(|s| s.contains("--registry")));
    }

    #[test]
    fn port_error_suggests_config_file_check() {
        let err = CliError::Core(CoreError::from(PortError::msg(
            "failed to read module config file module-config.yaml",
        )));
        assert!(err.suggestions().iter().any(|s| s.contains("--config-file")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        let err = CliError::Core(
            ApplicationError::invalid_option("module_channel", "must be lowercase").into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_overwrite_refusal() {
        let err = CliError::Core(
            ApplicationError::FileOverwrite {
                path: PathBuf::from("/tmp/x"),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_configuration() {
        let err = CliError::Core(CoreError::from(PortError::msg("bad config")));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_code_not_found() {
        let err = CliError::Core(CoreError::stage(
            "failed to get component version",
            PortError::msg("404"),
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_internal() {
        let err = CliError::Io {
            message: "x".into(),
            source: io::Error::other("e"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::Core(
            ApplicationError::FileOverwrite {
                path: PathBuf::from("/tmp/x"),
            }
            .into(),
        );
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_chain() {
        let err = CliError::Core(CoreError::stage(
            "failed to push component version",
            PortError::msg("connection refused"),
        ));
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: connection refused"));
        assert!(!s.contains("--verbose"));
    }
}
