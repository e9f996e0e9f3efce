//! `modkit scaffold` — generate starter files for a new module.

use std::sync::Arc;

use tracing::instrument;

use modkit_adapters::LocalFileSystem;
use modkit_adapters::defaults::{
    default_cr_content_provider, manifest_content_provider, module_config_content_provider,
    security_config_content_provider,
};
use modkit_core::application::services::{FileGenerator, ScaffoldOptions, ScaffoldService};

use crate::cli::ScaffoldArgs;
use crate::error::CliResult;
use crate::output::OutputManager;

#[instrument(skip_all, fields(directory = %args.directory.display()))]
pub fn execute(args: ScaffoldArgs, output: OutputManager) -> CliResult<()> {
    let filesystem = Arc::new(LocalFileSystem::new());

    let service = ScaffoldService::new(
        filesystem.clone(),
        FileGenerator::new(manifest_content_provider(), filesystem.clone()),
        FileGenerator::new(default_cr_content_provider(), filesystem.clone()),
        FileGenerator::new(security_config_content_provider(), filesystem.clone()),
        FileGenerator::new(module_config_content_provider(), filesystem),
    );

    let opts = ScaffoldOptions {
        directory: args.directory,
        module_name: args.module_name,
        module_version: args.module_version,
        module_channel: args.module_channel,
        manifest_file: args.manifest_file,
        default_cr_file: args.default_cr_file,
        security_config_file: args.security_config_file,
        module_config_file: args.module_config_file,
        overwrite: args.overwrite,
    };

    service.create_scaffold(&opts)?;

    output.success(&format!(
        "Scaffold generated in {}",
        opts.directory.display()
    ))?;
    Ok(())
}
