//! Module template document rendering.
//!
//! The module template is the Kubernetes-style document operators consume to
//! install a module version in a cluster. It embeds the release channel, the
//! default CR data, and the full component descriptor.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use modkit_core::application::ports::ModuleTemplate;
use modkit_core::domain::{ComponentDescriptor, ModuleConfig};
use modkit_core::error::PortError;

const API_VERSION: &str = "operator.modkit.io/v1beta2";
const KIND: &str = "ModuleTemplate";
const LABEL_MODULE_NAME: &str = "operator.modkit.io/module-name";
const ANNOTATION_MODULE_VERSION: &str = "operator.modkit.io/module-version";
const ANNOTATION_LOCAL_TEMPLATE: &str = "operator.modkit.io/local-template";

#[derive(Debug, Error)]
pub enum ModuleTemplateError {
    #[error("failed to parse default CR data")]
    ParseDefaultCr(#[source] serde_yaml::Error),

    #[error("failed to serialize module template")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write module template {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateDocument<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: TemplateMetadata,
    spec: TemplateSpec<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateMetadata {
    name: String,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct TemplateSpec<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_yaml::Value>,
    descriptor: &'a ComponentDescriptor,
}

/// Production [`ModuleTemplate`] implementation rendering YAML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlModuleTemplateService;

impl YamlModuleTemplateService {
    pub fn new() -> Self {
        Self
    }

    /// The short module name, e.g. `template-operator` out of
    /// `example.io/module/template-operator`.
    fn short_name(name: &str) -> &str {
        name.rsplit('/').next().unwrap_or(name)
    }
}

impl ModuleTemplate for YamlModuleTemplateService {
    fn generate_module_template(
        &self,
        config: &ModuleConfig,
        descriptor: &ComponentDescriptor,
        default_cr: &[u8],
        template_output_only: bool,
        output_path: &Path,
    ) -> Result<(), PortError> {
        let short_name = Self::short_name(&config.name);

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_MODULE_NAME.to_owned(), short_name.to_owned());

        let mut annotations = config.annotations.clone();
        annotations.insert(ANNOTATION_MODULE_VERSION.to_owned(), config.version.clone());
        if template_output_only {
            // Marks templates rendered without a registry push so cluster
            // tooling can tell them apart from released ones.
            annotations.insert(ANNOTATION_LOCAL_TEMPLATE.to_owned(), "true".to_owned());
        }

        let data = if default_cr.is_empty() {
            None
        } else {
            let value: serde_yaml::Value = serde_yaml::from_slice(default_cr)
                .map_err(|source| PortError::new(ModuleTemplateError::ParseDefaultCr(source)))?;
            Some(value)
        };

        let document = TemplateDocument {
            api_version: API_VERSION,
            kind: KIND,
            metadata: TemplateMetadata {
                name: format!("{short_name}-{}", config.channel),
                labels,
                annotations,
            },
            spec: TemplateSpec {
                channel: &config.channel,
                data,
                descriptor,
            },
        };

        let yaml = serde_yaml::to_string(&document)
            .map_err(|source| PortError::new(ModuleTemplateError::Serialize(source)))?;
        std::fs::write(output_path, yaml).map_err(|source| {
            PortError::new(ModuleTemplateError::Write {
                path: output_path.to_path_buf(),
                source,
            })
        })?;

        info!(path = %output_path.display(), "generated module template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;

    fn sample_config() -> ModuleConfig {
        ModuleConfig {
            name: "example.io/module/template-operator".into(),
            version: "1.0.0".into(),
            channel: "regular".into(),
            manifest: "manifest.yaml".into(),
            default_cr: Some("default-cr.yaml".into()),
            security: None,
            annotations: Map::from([("example.io/doc-url".to_owned(), "https://docs".to_owned())]),
        }
    }

    #[test]
    fn renders_template_with_default_cr_data() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("template.yaml");
        let descriptor = ComponentDescriptor::new("example.io/module/template-operator", "1.0.0");

        YamlModuleTemplateService::new()
            .generate_module_template(
                &sample_config(),
                &descriptor,
                b"kind: Sample\nmetadata:\n  name: sample\n",
                false,
                &output,
            )
            .unwrap();

        let rendered = std::fs::read_to_string(&output).unwrap();
        assert!(rendered.contains("apiVersion: operator.modkit.io/v1beta2"));
        assert!(rendered.contains("kind: ModuleTemplate"));
        assert!(rendered.contains("name: template-operator-regular"));
        assert!(rendered.contains("operator.modkit.io/module-version: 1.0.0"));
        assert!(rendered.contains("example.io/doc-url: https://docs"));
        assert!(rendered.contains("channel: regular"));
        assert!(rendered.contains("kind: Sample"));
        assert!(rendered.contains("name: example.io/module/template-operator"));
        assert!(!rendered.contains("local-template"));
    }

    #[test]
    fn empty_default_cr_omits_data() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("template.yaml");
        let descriptor = ComponentDescriptor::new("example.io/module/template-operator", "1.0.0");

        YamlModuleTemplateService::new()
            .generate_module_template(&sample_config(), &descriptor, b"", true, &output)
            .unwrap();

        let rendered = std::fs::read_to_string(&output).unwrap();
        assert!(!rendered.contains("data:"));
        assert!(rendered.contains("operator.modkit.io/local-template: 'true'"));
    }

    #[test]
    fn invalid_default_cr_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("template.yaml");
        let descriptor = ComponentDescriptor::new("example.io/module/template-operator", "1.0.0");

        let err = YamlModuleTemplateService::new()
            .generate_module_template(
                &sample_config(),
                &descriptor,
                b"kind: [unclosed",
                false,
                &output,
            )
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse default CR data"));
        assert!(!output.exists());
    }

    #[test]
    fn short_name_handles_unqualified_names() {
        assert_eq!(YamlModuleTemplateService::short_name("sample"), "sample");
        assert_eq!(
            YamlModuleTemplateService::short_name("example.io/module/sample"),
            "sample"
        );
    }
}
