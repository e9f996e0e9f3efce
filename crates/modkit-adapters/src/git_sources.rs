//! Git provenance for component descriptors.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use modkit_core::application::ports::GitSources;
use modkit_core::domain::{ComponentDescriptor, Source, SourceAccess};
use modkit_core::error::PortError;

#[derive(Debug, Error)]
pub enum GitSourcesError {
    #[error("no git repository found at or above {path}")]
    Discover {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to resolve HEAD commit of {path}")]
    Head {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

/// Resolves the HEAD commit of the local repository and records it as a git
/// source on the descriptor. The remote URL comes from the caller, not from
/// the repository config, so CI checkouts with rewritten remotes still record
/// the canonical upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitSourcesService;

impl GitSourcesService {
    pub fn new() -> Self {
        Self
    }

    fn head_commit(local_path: &Path) -> Result<String, GitSourcesError> {
        let repo =
            git2::Repository::discover(local_path).map_err(|source| GitSourcesError::Discover {
                path: local_path.to_path_buf(),
                source,
            })?;
        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|source| GitSourcesError::Head {
                path: local_path.to_path_buf(),
                source,
            })?;
        Ok(commit.id().to_string())
    }
}

impl GitSources for GitSourcesService {
    fn add_git_sources(
        &self,
        descriptor: &mut ComponentDescriptor,
        git_remote: &str,
        local_path: &Path,
    ) -> Result<(), PortError> {
        let commit = Self::head_commit(local_path).map_err(PortError::new)?;
        debug!(%commit, remote = git_remote, "recording git source");

        let version = descriptor.version.clone();
        descriptor.add_source(Source {
            name: "module-sources".to_owned(),
            source_type: "git".to_owned(),
            version,
            access: SourceAccess {
                access_type: "gitHub".to_owned(),
                repo_url: git_remote.to_owned(),
                commit,
            },
            labels: Vec::new(),
        });
        Ok(())
    }
}
