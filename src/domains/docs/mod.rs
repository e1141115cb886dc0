//! Repository documentation downloader.

pub mod error;
pub mod git;
pub mod types;

pub use error::DocsError;
pub use git::{DocsSource, GitDocsSource};
pub use types::{DocFile, DocsResult, parse_owner_repo};
