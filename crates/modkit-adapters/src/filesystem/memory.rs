//! In-memory filesystem adapter for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use modkit_core::application::ports::FileSystem;
use modkit_core::error::PortError;

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (testing helper).
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().keys().cloned().collect()
    }
}

impl FileSystem for MemoryFileSystem {
    fn write_file(&self, path: &Path, content: &str) -> Result<(), PortError> {
        self.files
            .write()
            .map_err(|_| PortError::msg("filesystem lock poisoned"))?
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_roundtrip() {
        let fs = MemoryFileSystem::new();
        fs.write_file(Path::new("/mod/manifest.yaml"), "# manifest")
            .unwrap();

        assert!(fs.file_exists(Path::new("/mod/manifest.yaml")));
        assert_eq!(
            fs.read_file(Path::new("/mod/manifest.yaml")).as_deref(),
            Some("# manifest")
        );
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFileSystem::new();
        let clone = fs.clone();
        clone.insert("/mod/a.yaml", "a");
        assert!(fs.file_exists(Path::new("/mod/a.yaml")));
    }
}
