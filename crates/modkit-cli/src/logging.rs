//! Tracing subscriber setup for the `modkit` binary.
//!
//! The library crates (`modkit-core`, `modkit-adapters`) emit spans and
//! events but never install a subscriber; that happens here, once, at
//! startup. Verbosity starts at WARN and each `-v` raises it one level
//! (INFO, DEBUG, TRACE), while `--quiet` drops it to ERROR. Setting
//! `RUST_LOG` bypasses the flags entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the global tracing subscriber. Call once, before anything logs.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        // No RUST_LOG: apply the flag-derived level to all three crates.
        Err(_) => {
            let level = level_for(args);
            EnvFilter::new(format!(
                "modkit={level},modkit_core={level},modkit_adapters={level}"
            ))
        }
    };

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn level_for(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
