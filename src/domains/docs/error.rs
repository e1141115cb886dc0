//! Errors raised by the documentation downloader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("repository URL is required")]
    MissingUrl,

    #[error("create temp dir failed: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("clone failed: {0}")]
    Clone(#[source] git2::Error),

    #[error("get HEAD failed: {0}")]
    Head(#[source] git2::Error),

    #[error("get tree failed: {0}")]
    Tree(#[source] git2::Error),

    #[error("walk tree failed: {0}")]
    Walk(#[source] git2::Error),

    /// The blocking clone task panicked or was cancelled.
    #[error("download task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_message() {
        assert_eq!(DocsError::MissingUrl.to_string(), "repository URL is required");
    }
}
