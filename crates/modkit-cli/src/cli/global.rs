//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::Args;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Raise log verbosity; repeatable (-v info, -vv debug, -vvv trace).
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable ANSI colors; also triggered by the NO_COLOR environment
    /// variable (<https://no-color.org>).
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Rendering style for command output.
    #[arg(long = "output-format", global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Always colored.
    Human,
    /// Never colored.
    Plain,
}
