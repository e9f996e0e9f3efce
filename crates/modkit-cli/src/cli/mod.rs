//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "modkit",
    bin_name = "modkit",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "Module scaffolding and packaging",
    long_about = "Modkit scaffolds module projects and packages them into \
                  versioned, content-addressed component archives.",
    after_help = "EXAMPLES:\n\
        \x20 modkit scaffold --directory ./my-module --module-name example.io/module/my-module\n\
        \x20 modkit create --config-file module-config.yaml --registry https://registry.example.com\n\
        \x20 modkit completions bash > /usr/share/bash-completion/completions/modkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate starter files for a new module.
    #[command(
        visible_alias = "s",
        about = "Scaffold a new module",
        after_help = "EXAMPLES:\n\
            \x20 modkit scaffold --directory ./my-module\n\
            \x20 modkit scaffold --module-name example.io/module/my-module --gen-default-cr\n\
            \x20 modkit scaffold --gen-security-config --overwrite"
    )]
    Scaffold(ScaffoldArgs),

    /// Package a module and push it to a registry.
    #[command(
        visible_alias = "c",
        about = "Create and push a module",
        after_help = "EXAMPLES:\n\
            \x20 modkit create --config-file module-config.yaml --registry https://registry.example.com\n\
            \x20 modkit create --config-file module-config.yaml --registry https://registry.example.com --credentials user:password\n\
            \x20 modkit create --config-file module-config.yaml --registry https://registry.example.com --template-output-only"
    )]
    Create(CreateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modkit completions bash > ~/.local/share/bash-completion/completions/modkit\n\
            \x20 modkit completions zsh  > ~/.zfunc/_modkit\n\
            \x20 modkit completions fish > ~/.config/fish/completions/modkit.fish"
    )]
    Completions(CompletionsArgs),
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `modkit scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Directory the scaffold files are written into.
    #[arg(
        short = 'd',
        long = "directory",
        value_name = "DIR",
        default_value = "./",
        help = "Target directory for the generated files"
    )]
    pub directory: PathBuf,

    /// Module name stamped into the generated module config.
    #[arg(
        long = "module-name",
        value_name = "NAME",
        default_value = "example.io/module/mymodule",
        help = "Module name"
    )]
    pub module_name: String,

    /// Module version stamped into the generated module config.
    #[arg(
        long = "module-version",
        value_name = "VERSION",
        default_value = "0.0.1",
        help = "Module version"
    )]
    pub module_version: String,

    /// Release channel stamped into the generated module config.
    #[arg(
        long = "module-channel",
        value_name = "CHANNEL",
        default_value = "regular",
        help = "Release channel"
    )]
    pub module_channel: String,

    /// Name of the manifest file to generate.
    #[arg(
        long = "gen-manifest",
        value_name = "FILE",
        default_value = "manifest.yaml",
        help = "Manifest file name"
    )]
    pub manifest_file: String,

    /// Generate a default CR file.  The flag takes an optional file name.
    #[arg(
        long = "gen-default-cr",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "default-cr.yaml",
        help = "Generate a default CR file (optionally named)"
    )]
    pub default_cr_file: Option<String>,

    /// Generate a security scanners config file.  The flag takes an optional
    /// file name.
    #[arg(
        long = "gen-security-config",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "sec-scanners-config.yaml",
        help = "Generate a security scanners config file (optionally named)"
    )]
    pub security_config_file: Option<String>,

    /// Name of the module config file to generate.
    #[arg(
        long = "config-file",
        value_name = "FILE",
        default_value = "scaffold-module-config.yaml",
        help = "Module config file name"
    )]
    pub module_config_file: String,

    /// Overwrite an existing module config file.
    #[arg(short = 'o', long = "overwrite", help = "Overwrite existing files")]
    pub overwrite: bool,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `modkit create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Path of the module config file describing the module to package.
    #[arg(
        short = 'c',
        long = "config-file",
        value_name = "FILE",
        default_value = "module-config.yaml",
        help = "Module config file path"
    )]
    pub config_file: String,

    /// Base URL of the component registry.
    #[arg(
        short = 'r',
        long = "registry",
        value_name = "URL",
        default_value = "",
        help = "Component registry URL"
    )]
    pub registry: String,

    /// Git remote URL recorded as the module's source.
    #[arg(
        long = "git-remote",
        value_name = "URL",
        default_value = "",
        help = "Git remote URL recorded in the component descriptor"
    )]
    pub git_remote: String,

    /// Path the module template document is written to.
    #[arg(
        short = 'O',
        long = "output",
        value_name = "FILE",
        default_value = "template.yaml",
        help = "Module template output path"
    )]
    pub output: String,

    /// Registry credentials in `user:password` format.
    #[arg(
        long = "credentials",
        value_name = "USER:PASSWORD",
        help = "Registry basic-auth credentials"
    )]
    pub credentials: Option<String>,

    /// Overwrite an existing component version in the registry.
    #[arg(long = "overwrite", help = "Overwrite an existing component version")]
    pub overwrite: bool,

    /// Render the module template from the existing remote component version
    /// instead of pushing a new one.
    #[arg(
        long = "template-output-only",
        help = "Skip the push and render the template from the remote version"
    )]
    pub template_output_only: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to emit a completion script for.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_scaffold_defaults() {
        let cli = Cli::parse_from(["modkit", "scaffold"]);
        let Commands::Scaffold(args) = cli.command else {
            panic!("expected Scaffold command");
        };
        assert_eq!(args.directory, PathBuf::from("./"));
        assert_eq!(args.manifest_file, "manifest.yaml");
        assert_eq!(args.module_config_file, "scaffold-module-config.yaml");
        assert_eq!(args.default_cr_file, None);
        assert_eq!(args.security_config_file, None);
        assert!(!args.overwrite);
    }

    #[test]
    fn gen_default_cr_flag_without_value_uses_default_name() {
        let cli = Cli::parse_from(["modkit", "scaffold", "--gen-default-cr"]);
        let Commands::Scaffold(args) = cli.command else {
            panic!("expected Scaffold command");
        };
        assert_eq!(args.default_cr_file.as_deref(), Some("default-cr.yaml"));
    }

    #[test]
    fn gen_default_cr_flag_accepts_explicit_name() {
        let cli = Cli::parse_from(["modkit", "scaffold", "--gen-default-cr", "cr.yaml"]);
        let Commands::Scaffold(args) = cli.command else {
            panic!("expected Scaffold command");
        };
        assert_eq!(args.default_cr_file.as_deref(), Some("cr.yaml"));
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from([
            "modkit",
            "create",
            "--config-file",
            "module-config.yaml",
            "--registry",
            "https://registry.example.com",
            "--credentials",
            "user:password",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.config_file, "module-config.yaml");
        assert_eq!(args.registry, "https://registry.example.com");
        assert_eq!(args.credentials.as_deref(), Some("user:password"));
        assert_eq!(args.output, "template.yaml");
        assert!(!args.template_output_only);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["modkit", "--quiet", "--verbose", "scaffold"]);
        assert!(result.is_err());
    }
}
