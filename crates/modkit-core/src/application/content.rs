//! Default content for generated files.
//!
//! One polymorphic provider covers every file the scaffold produces: a
//! `Static` variant returning fixed text (manifest, default CR) and a
//! `Templated` variant performing `{{Key}}` placeholder substitution
//! (security config, module config).

use crate::application::ApplicationError;
use crate::domain::KeyValueArgs;

/// Supplies default textual content for one generated file.
///
/// Pure function of its arguments; no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentProvider {
    /// Fixed text, args are ignored.
    Static(String),
    /// Text with `{{Key}}` placeholders substituted from the supplied args.
    Templated(String),
}

impl ContentProvider {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::Static(text.into())
    }

    pub fn templated(template: impl Into<String>) -> Self {
        Self::Templated(template.into())
    }

    /// Render the default content.
    ///
    /// Errors when a referenced placeholder has no corresponding argument.
    pub fn default_content(
        &self,
        args: Option<&KeyValueArgs>,
    ) -> Result<String, ApplicationError> {
        match self {
            Self::Static(text) => Ok(text.clone()),
            Self::Templated(template) => {
                let empty = KeyValueArgs::new();
                render(template, args.unwrap_or(&empty))
            }
        }
    }
}

/// Replace `{{Key}}` placeholders, then reject any placeholder left over.
///
/// Single-pass replacement; order doesn't matter for independent keys.
fn render(template: &str, args: &KeyValueArgs) -> Result<String, ApplicationError> {
    let mut result = template.to_owned();
    for (key, value) in args.iter() {
        let placeholder = format!("{{{{{key}}}}}");
        result = result.replace(&placeholder, value);
    }

    if let Some(start) = result.find("{{") {
        let rest = &result[start + 2..];
        let key = rest
            .find("}}")
            .map(|end| rest[..end].to_owned())
            .unwrap_or_else(|| rest.to_owned());
        return Err(ApplicationError::MissingArgument { key });
    }

    Ok(result)
}
