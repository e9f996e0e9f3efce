//! `modkit create` — package a module and push it to a registry.

use tracing::instrument;

use modkit_adapters::{
    DirComponentArchiver, GitSourcesService, HttpRegistry, YamlCrdParser, YamlModuleConfigService,
    YamlModuleTemplateService, YamlSecurityConfigService,
};
use modkit_core::application::services::{CreateOptions, CreateService};

use crate::cli::CreateArgs;
use crate::error::CliResult;
use crate::output::OutputManager;

#[instrument(skip_all, fields(config = %args.config_file))]
pub fn execute(args: CreateArgs, output: OutputManager) -> CliResult<()> {
    // The archive is only an upload staging area; it lives in a temp
    // directory removed when the command finishes.
    let archive_dir = tempfile::tempdir().map_err(|source| crate::error::CliError::Io {
        message: "failed to create archive staging directory".into(),
        source,
    })?;

    let service = CreateService::builder()
        .module_config(YamlModuleConfigService::new())
        .git_sources(GitSourcesService::new())
        .security_config(YamlSecurityConfigService::new())
        .crd_parser(YamlCrdParser::new())
        .component_archiver(DirComponentArchiver::new(archive_dir.path()))
        .registry(HttpRegistry::new())
        .module_template(YamlModuleTemplateService::new())
        .build()
        .map_err(modkit_core::error::CoreError::from)?;

    let opts = CreateOptions {
        module_config_file: args.config_file,
        registry_url: args.registry,
        git_remote: args.git_remote,
        template_output: args.output,
        credentials: args.credentials,
        overwrite: args.overwrite,
        template_output_only: args.template_output_only,
    };

    service.create_module(&opts)?;

    if opts.template_output_only {
        output.success(&format!(
            "Module template generated at {} from the remote component version",
            opts.template_output
        ))?;
    } else {
        output.success(&format!(
            "Module pushed and template generated at {}",
            opts.template_output
        ))?;
    }
    Ok(())
}
