//! Shell completion generation.

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "modkit", &mut std::io::stdout());
    Ok(())
}
