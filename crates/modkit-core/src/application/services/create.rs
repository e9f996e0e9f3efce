//! Create service - packages a module into a component archive and pushes it.
//!
//! The pipeline is single-threaded and sequential; every step gates on the
//! previous one succeeding. The one shared object, the component descriptor,
//! is passed by exclusive mutable reference through each enrichment step and
//! then moved into the archive, so no step can observe a partially enriched
//! descriptor concurrently.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{
    ComponentArchiver, CrdParser, GitSources, ModuleConfigProvider, ModuleTemplate, Registry,
    SecurityConfig,
};
use crate::domain::{
    ComponentDescriptor, Credentials, DefaultCr, ModuleConfig, ModuleResource, ModuleResourceKind,
};
use crate::error::{CoreError, CoreResult};

/// Options for one module-creation run.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Path of the module config file.
    pub module_config_file: String,
    /// Base URL of the component registry.
    pub registry_url: String,
    /// Git remote the module sources are tracked on.
    pub git_remote: String,
    /// Path the module template document is written to.
    pub template_output: String,
    /// Registry credentials in `user:password` format.
    pub credentials: Option<String>,
    /// Overwrite an existing component version in the registry.
    pub overwrite: bool,
    /// Render the module template from the remote component version instead
    /// of pushing a new one.
    pub template_output_only: bool,
}

impl CreateOptions {
    /// Validate required fields and parse credentials. Runs before any
    /// collaborator is invoked.
    fn validate(&self) -> Result<Credentials, ApplicationError> {
        if self.module_config_file.is_empty() {
            return Err(ApplicationError::invalid_option(
                "module_config_file",
                "must not be empty",
            ));
        }
        if self.template_output.is_empty() {
            return Err(ApplicationError::invalid_option(
                "template_output",
                "must not be empty",
            ));
        }
        Credentials::from_option(self.credentials.as_deref())
            .map_err(|err| ApplicationError::invalid_option("credentials", err.to_string()))
    }
}

/// Top-level orchestrator of the module-creation pipeline.
///
/// Construct via [`CreateService::builder`]; construction fails with a
/// missing-collaborator error when any port is absent.
pub struct CreateService {
    module_config: Box<dyn ModuleConfigProvider>,
    git_sources: Box<dyn GitSources>,
    security_config: Box<dyn SecurityConfig>,
    component_archiver: Box<dyn ComponentArchiver>,
    registry: Box<dyn Registry>,
    module_template: Box<dyn ModuleTemplate>,
    crd_parser: Box<dyn CrdParser>,
}

impl CreateService {
    pub fn builder() -> CreateServiceBuilder {
        CreateServiceBuilder::default()
    }

    /// Run the module-creation pipeline.
    ///
    /// Temp files created during parsing are removed unconditionally once
    /// the pipeline finishes, on the success and the failure path alike;
    /// removal failures are logged, never returned.
    #[instrument(skip_all, fields(config = %opts.module_config_file))]
    pub fn create_module(&self, opts: &CreateOptions) -> CoreResult<()> {
        let credentials = opts.validate()?;

        let result = self.run_pipeline(opts, &credentials);

        for err in self.module_config.cleanup_temp_files() {
            warn!(error = %err, "failed to remove temporary file");
        }

        result
    }

    fn run_pipeline(&self, opts: &CreateOptions, credentials: &Credentials) -> CoreResult<()> {
        // Parse errors are propagated verbatim: the config service's message
        // already identifies the file.
        let module_config = self
            .module_config
            .parse_and_validate(Path::new(&opts.module_config_file))?;
        info!(
            module = %module_config.name,
            version = %module_config.version,
            "parsed module config"
        );

        let module_dir = module_directory(&opts.module_config_file);

        let default_cr = match module_config.default_cr.as_deref().filter(|r| !r.is_empty()) {
            Some(reference) => Some(
                self.module_config
                    .default_cr(reference)
                    .map_err(|e| CoreError::stage("failed to get default CR data", e))?,
            ),
            None => None,
        };

        let mut descriptor =
            ComponentDescriptor::new(&module_config.name, &module_config.version);

        self.git_sources
            .add_git_sources(&mut descriptor, &opts.git_remote, &module_dir)
            .map_err(|e| CoreError::stage("failed to add git sources", e))?;

        if let Some(security_path) = module_config.security.as_deref().filter(|s| !s.is_empty()) {
            let path = module_dir.join(security_path);
            let config = self
                .security_config
                .parse_security_config(&path, &module_config.version)
                .map_err(|e| CoreError::stage("failed to parse security config data", e))?;
            self.security_config
                .append_security_scan_config(&mut descriptor, &config)
                .map_err(|e| CoreError::stage("failed to append security scan config", e))?;
            debug!("security scan config appended to descriptor");
        }

        if let Some(cr) = &default_cr {
            self.stamp_scope(&mut descriptor, &module_config, &module_dir, cr)?;
        }

        let resources = module_resources(&module_config, &module_dir, default_cr.as_ref());
        let mut archive = self
            .component_archiver
            .create_component_archive(descriptor)
            .map_err(|e| CoreError::stage("failed to create component archive", e))?;
        self.component_archiver
            .add_module_resources(&mut archive, resources)
            .map_err(|e| {
                CoreError::stage("failed to add module resources to component archive", e)
            })?;

        let remote = if opts.template_output_only {
            // No push side effects: the template embeds the descriptor that
            // already lives in the registry, not the freshly built one.
            let remote = self
                .registry
                .get_component_version(
                    &module_config.name,
                    &module_config.version,
                    &opts.registry_url,
                    credentials,
                )
                .map_err(|e| CoreError::stage("failed to get component version", e))?;
            info!(version = %remote.version, "using existing remote component version");
            Some(remote)
        } else {
            self.registry
                .push_component_version(&archive, opts.overwrite, &opts.registry_url, credentials)
                .map_err(|e| CoreError::stage("failed to push component version", e))?;
            info!(registry = %opts.registry_url, "pushed component version");
            None
        };

        let template_descriptor = remote
            .as_ref()
            .map_or_else(|| archive.descriptor(), |remote| &remote.descriptor);
        let default_cr_data = default_cr.map(|cr| cr.data).unwrap_or_default();
        self.module_template
            .generate_module_template(
                &module_config,
                template_descriptor,
                &default_cr_data,
                opts.template_output_only,
                Path::new(&opts.template_output),
            )
            .map_err(|e| CoreError::stage("failed to generate module template", e))?;
        info!(output = %opts.template_output, "generated module template");

        Ok(())
    }

    /// Record whether the module's default CR is cluster-scoped so downstream
    /// consumers can scope its resources accordingly.
    fn stamp_scope(
        &self,
        descriptor: &mut ComponentDescriptor,
        module_config: &ModuleConfig,
        module_dir: &Path,
        default_cr: &DefaultCr,
    ) -> CoreResult<()> {
        let Some(kind) = resource_kind(&default_cr.data) else {
            debug!("default CR has no kind, skipping CRD scope check");
            return Ok(());
        };

        let crd_path = module_dir.join(&module_config.manifest);
        let cluster_scoped = self
            .crd_parser
            .is_crd_cluster_scoped(&crd_path, &kind)
            .map_err(|e| CoreError::stage("failed to determine CRD scope", e))?;
        descriptor.add_label(
            "scope",
            serde_json::json!(if cluster_scoped { "cluster" } else { "namespaced" }),
        );
        Ok(())
    }
}

/// Directory containing the module config; resource paths resolve against it.
fn module_directory(module_config_file: &str) -> PathBuf {
    Path::new(module_config_file)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Extract the `kind` of a YAML resource, if it has one.
fn resource_kind(data: &[u8]) -> Option<String> {
    let value: serde_yaml::Value = serde_yaml::from_slice(data).ok()?;
    value.get("kind")?.as_str().map(str::to_owned)
}

fn module_resources(
    config: &ModuleConfig,
    module_dir: &Path,
    default_cr: Option<&DefaultCr>,
) -> Vec<ModuleResource> {
    let mut resources = vec![ModuleResource::new(
        ModuleResourceKind::RawManifest,
        module_dir.join(&config.manifest),
    )];
    if let Some(cr) = default_cr {
        resources.push(ModuleResource::new(
            ModuleResourceKind::DefaultCr,
            cr.path.clone(),
        ));
    }
    if let Some(security) = config.security.as_deref().filter(|s| !s.is_empty()) {
        resources.push(ModuleResource::new(
            ModuleResourceKind::SecurityScanConfig,
            module_dir.join(security),
        ));
    }
    resources
}

/// Builder for [`CreateService`].
///
/// `build` fails with [`ApplicationError::MissingCollaborator`] naming the
/// first absent port.
#[derive(Default)]
pub struct CreateServiceBuilder {
    module_config: Option<Box<dyn ModuleConfigProvider>>,
    git_sources: Option<Box<dyn GitSources>>,
    security_config: Option<Box<dyn SecurityConfig>>,
    component_archiver: Option<Box<dyn ComponentArchiver>>,
    registry: Option<Box<dyn Registry>>,
    module_template: Option<Box<dyn ModuleTemplate>>,
    crd_parser: Option<Box<dyn CrdParser>>,
}

impl CreateServiceBuilder {
    pub fn module_config(mut self, provider: impl ModuleConfigProvider + 'static) -> Self {
        self.module_config = Some(Box::new(provider));
        self
    }

    pub fn git_sources(mut self, service: impl GitSources + 'static) -> Self {
        self.git_sources = Some(Box::new(service));
        self
    }

    pub fn security_config(mut self, service: impl SecurityConfig + 'static) -> Self {
        self.security_config = Some(Box::new(service));
        self
    }

    pub fn component_archiver(mut self, service: impl ComponentArchiver + 'static) -> Self {
        self.component_archiver = Some(Box::new(service));
        self
    }

    pub fn registry(mut self, service: impl Registry + 'static) -> Self {
        self.registry = Some(Box::new(service));
        self
    }

    pub fn module_template(mut self, service: impl ModuleTemplate + 'static) -> Self {
        self.module_template = Some(Box::new(service));
        self
    }

    pub fn crd_parser(mut self, service: impl CrdParser + 'static) -> Self {
        self.crd_parser = Some(Box::new(service));
        self
    }

    pub fn build(self) -> Result<CreateService, ApplicationError> {
        Ok(CreateService {
            module_config: self.module_config.ok_or(
                ApplicationError::MissingCollaborator {
                    name: "module_config",
                },
            )?,
            git_sources: self
                .git_sources
                .ok_or(ApplicationError::MissingCollaborator { name: "git_sources" })?,
            security_config: self.security_config.ok_or(
                ApplicationError::MissingCollaborator {
                    name: "security_config",
                },
            )?,
            component_archiver: self.component_archiver.ok_or(
                ApplicationError::MissingCollaborator {
                    name: "component_archiver",
                },
            )?,
            registry: self
                .registry
                .ok_or(ApplicationError::MissingCollaborator { name: "registry" })?,
            module_template: self.module_template.ok_or(
                ApplicationError::MissingCollaborator {
                    name: "module_template",
                },
            )?,
            crd_parser: self
                .crd_parser
                .ok_or(ApplicationError::MissingCollaborator { name: "crd_parser" })?,
        })
    }
}
