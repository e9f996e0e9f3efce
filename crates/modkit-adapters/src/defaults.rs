//! Default content shipped with scaffolded files.
//!
//! Providers are constructed here and injected into the scaffold service's
//! file generators, so the textual defaults live in one place.

use modkit_core::application::ContentProvider;

const MANIFEST_CONTENT: &str = "\
# This file holds the Manifest of your module, encompassing all resources installed in the cluster once the module is activated.
# It should include the Custom Resource Definition for your module's default CustomResource, if it exists.

";

const DEFAULT_CR_CONTENT: &str = "\
# This is the file that contains the defaultCR for your module, which is the Custom Resource that will be created upon module enablement.
# Make sure this file contains *ONLY* the Custom Resource (not the Custom Resource Definition, which should be a part of your module manifest)

";

const SECURITY_CONFIG_TEMPLATE: &str = "\
# Configuration of the security scanners
module-name: {{ModuleName}}
# RC Tag of the module to be scanned
rc-tag: 0.0.0
# Dev branch of the module
dev-branch: main
# Mend scanner configuration
mend:
  language: golang-mod
  exclude:
    - \"**/test/**\"
    - \"**/*_test.go\"
";

const MODULE_CONFIG_TEMPLATE: &str = "\
# This file holds the configuration of your module, used when creating the module release artifacts.
name: {{ModuleName}}
version: {{ModuleVersion}}
channel: {{ModuleChannel}}
manifest: {{ManifestFile}}
defaultCR: {{DefaultCRFile}}
security: {{SecurityConfigFile}}
";

/// Default content for a freshly scaffolded manifest.
pub fn manifest_content_provider() -> ContentProvider {
    ContentProvider::fixed(MANIFEST_CONTENT)
}

/// Default content for a freshly scaffolded default CR.
pub fn default_cr_content_provider() -> ContentProvider {
    ContentProvider::fixed(DEFAULT_CR_CONTENT)
}

/// Templated security scan config, parameterized by the module name.
pub fn security_config_content_provider() -> ContentProvider {
    ContentProvider::templated(SECURITY_CONFIG_TEMPLATE)
}

/// Templated module config, cross-referencing the other generated files.
pub fn module_config_content_provider() -> ContentProvider {
    ContentProvider::templated(MODULE_CONFIG_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::domain::{
        ARG_DEFAULT_CR_FILE, ARG_MANIFEST_FILE, ARG_MODULE_CHANNEL, ARG_MODULE_NAME,
        ARG_MODULE_VERSION, ARG_SECURITY_CONFIG_FILE, KeyValueArgs,
    };

    #[test]
    fn manifest_content_is_fixed() {
        let content = manifest_content_provider().default_content(None).unwrap();
        assert!(content.starts_with("# This file holds the Manifest of your module"));
        assert!(content.ends_with("\n\n"));
    }

    #[test]
    fn default_cr_content_is_fixed() {
        let content = default_cr_content_provider().default_content(None).unwrap();
        assert!(content.contains("defaultCR for your module"));
    }

    #[test]
    fn security_config_substitutes_module_name() {
        let args = KeyValueArgs::new().with(ARG_MODULE_NAME, "template-operator");
        let content = security_config_content_provider()
            .default_content(Some(&args))
            .unwrap();
        assert!(content.contains("module-name: template-operator\n"));
        assert!(content.contains("rc-tag: 0.0.0\n"));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn module_config_cross_references_generated_files() {
        let args = KeyValueArgs::new()
            .with(ARG_MODULE_NAME, "example.io/module/sample")
            .with(ARG_MODULE_VERSION, "0.0.1")
            .with(ARG_MODULE_CHANNEL, "regular")
            .with(ARG_MANIFEST_FILE, "manifest.yaml")
            .with(ARG_DEFAULT_CR_FILE, "")
            .with(ARG_SECURITY_CONFIG_FILE, "");
        let content = module_config_content_provider()
            .default_content(Some(&args))
            .unwrap();
        assert!(content.contains("name: example.io/module/sample\n"));
        assert!(content.contains("manifest: manifest.yaml\n"));
        assert!(content.contains("defaultCR: \n"));
        assert!(content.contains("security: \n"));
    }

    #[test]
    fn module_config_requires_all_arguments() {
        let args = KeyValueArgs::new().with(ARG_MODULE_NAME, "sample");
        let err = module_config_content_provider()
            .default_content(Some(&args))
            .unwrap_err();
        assert!(err.to_string().contains("ModuleVersion"));
    }
}
