//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use modkit_core::application::ports::FileSystem;
use modkit_core::error::PortError;

#[derive(Debug, Error)]
#[error("failed to {operation} {path}")]
struct FsError {
    operation: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Production filesystem implementation using `std::fs`.
///
/// Does not create parent directories: a missing directory is reported as a
/// write failure, matching the generator contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn write_file(&self, path: &Path, content: &str) -> Result<(), PortError> {
        std::fs::write(path, content).map_err(|source| {
            PortError::new(FsError {
                operation: "write file",
                path: path.to_path_buf(),
                source,
            })
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_detects_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let path = dir.path().join("out.yaml");

        assert!(!fs.file_exists(&path));
        fs.write_file(&path, "content\n").unwrap();
        assert!(fs.file_exists(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content\n");
    }

    #[test]
    fn missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let path = dir.path().join("missing").join("out.yaml");

        let err = fs.write_file(&path, "content").unwrap_err();
        assert!(err.to_string().contains("failed to write file"));
    }

    #[test]
    fn directories_are_not_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem::new();
        assert!(!fs.file_exists(dir.path()));
    }
}
