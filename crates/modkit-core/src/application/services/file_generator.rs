//! File generation from a bound content provider.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::ContentProvider;
use crate::application::ports::FileSystem;
use crate::domain::KeyValueArgs;
use crate::error::CoreResult;

/// Renders content from its bound [`ContentProvider`] and writes it to a
/// target path.
///
/// One generator instance per file kind; the scaffold service composes four
/// of them. Parent directories are not created — a missing directory is a
/// write failure.
pub struct FileGenerator {
    provider: ContentProvider,
    filesystem: Arc<dyn FileSystem>,
}

impl FileGenerator {
    pub fn new(provider: ContentProvider, filesystem: Arc<dyn FileSystem>) -> Self {
        Self {
            provider,
            filesystem,
        }
    }

    /// Render and write one file.
    pub fn generate(&self, path: &Path, args: Option<&KeyValueArgs>) -> CoreResult<()> {
        let content = self.provider.default_content(args)?;
        self.filesystem.write_file(path, &content)?;
        debug!(path = %path.display(), "wrote generated file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::MockFileSystem;
    use crate::error::{CoreError, PortError};
    use std::path::PathBuf;

    #[test]
    fn generates_static_content() {
        let mut fs = MockFileSystem::new();
        fs.expect_write_file()
            .withf(|path, content| {
                path == PathBuf::from("/tmp/manifest.yaml") && content == "# manifest\n"
            })
            .once()
            .returning(|_, _| Ok(()));

        let generator = FileGenerator::new(ContentProvider::fixed("# manifest\n"), Arc::new(fs));
        generator
            .generate(Path::new("/tmp/manifest.yaml"), None)
            .unwrap();
    }

    #[test]
    fn render_failure_skips_write() {
        // No write expectation set: any write call would panic the mock.
        let fs = MockFileSystem::new();
        let generator =
            FileGenerator::new(ContentProvider::templated("{{Missing}}"), Arc::new(fs));

        let err = generator.generate(Path::new("/tmp/out.yaml"), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::MissingArgument { .. })
        ));
    }

    #[test]
    fn write_failure_is_propagated() {
        let mut fs = MockFileSystem::new();
        fs.expect_write_file()
            .returning(|_, _| Err(PortError::msg("permission denied")));

        let generator = FileGenerator::new(ContentProvider::fixed("x"), Arc::new(fs));
        let err = generator.generate(Path::new("/tmp/out.yaml"), None).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }
}
