//! Git-backed documentation source.

use async_trait::async_trait;
use git2::build::RepoBuilder;
use git2::{FetchOptions, ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::core::config::DocsConfig;

use super::error::DocsError;
use super::types::{DocFile, DocsResult};

/// Anything that can produce documentation files for a repository URL.
#[async_trait]
pub trait DocsSource: Send + Sync + std::fmt::Debug {
    /// Collect documentation files, optionally limited to the directory
    /// `path_filter`.
    async fn fetch_docs(
        &self,
        repo_url: &str,
        path_filter: Option<&str>,
    ) -> Result<DocsResult, DocsError>;
}

/// Shallow-clones the repository into a temporary directory and reads the
/// matching files from the HEAD tree.
#[derive(Debug, Clone)]
pub struct GitDocsSource {
    config: DocsConfig,
}

impl GitDocsSource {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Whether `path` passes the directory filter and the extension list.
    fn should_include(&self, path: &str, path_filter: Option<&str>) -> bool {
        if let Some(dir) = path_filter.filter(|d| !d.is_empty()) {
            let under_dir = path
                .strip_prefix(dir)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
            if !under_dir {
                return false;
            }
        }

        let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = format!(".{}", ext.to_lowercase());
        self.config.extensions.iter().any(|e| *e == ext)
    }

    fn collect(&self, repo: &Repository, path_filter: Option<&str>) -> Result<Vec<DocFile>, DocsError> {
        let head = repo.head().map_err(DocsError::Head)?;
        let tree = head.peel_to_tree().map_err(DocsError::Tree)?;

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if files.len() >= self.config.max_files || entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            let Some(name) = entry.name() else {
                return TreeWalkResult::Ok;
            };
            let path = format!("{}{}", dir, name);
            if !self.should_include(&path, path_filter) {
                return TreeWalkResult::Ok;
            }

            match repo.find_blob(entry.id()) {
                Ok(blob) => files.push(DocFile {
                    content: String::from_utf8_lossy(blob.content()).into_owned(),
                    path,
                }),
                Err(e) => debug!("Skipping unreadable blob {}: {}", path, e),
            }
            TreeWalkResult::Ok
        })
        .map_err(DocsError::Walk)?;

        Ok(files)
    }

    fn fetch_blocking(&self, repo_url: &str, path_filter: Option<&str>) -> Result<DocsResult, DocsError> {
        let workdir = tempfile::TempDir::new().map_err(DocsError::TempDir)?;

        let mut fetch = FetchOptions::new();
        // libgit2's local transport cannot do shallow fetches.
        if !is_local(repo_url) {
            fetch.depth(1);
        }

        let repo = RepoBuilder::new()
            .fetch_options(fetch)
            .clone(repo_url, workdir.path())
            .map_err(DocsError::Clone)?;

        let files = self.collect(&repo, path_filter)?;
        Ok(DocsResult::new(repo_url, files))
    }
}

fn is_local(repo_url: &str) -> bool {
    repo_url.starts_with("file://") || Path::new(repo_url).exists()
}

#[async_trait]
impl DocsSource for GitDocsSource {
    #[instrument(skip(self))]
    async fn fetch_docs(
        &self,
        repo_url: &str,
        path_filter: Option<&str>,
    ) -> Result<DocsResult, DocsError> {
        if repo_url.is_empty() {
            return Err(DocsError::MissingUrl);
        }

        let source = self.clone();
        let url = repo_url.to_string();
        let filter = path_filter.map(String::from);
        let result =
            tokio::task::spawn_blocking(move || source.fetch_blocking(&url, filter.as_deref()))
                .await??;

        info!("Collected {} documentation files from {}", result.count, repo_url);
        Ok(result)
    }
}
