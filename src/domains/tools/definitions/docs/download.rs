//! Repository documentation download tool definition.
//!
//! Collects `.md`/`.txt` files from a git repository and returns them as JSON.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::docs::DocsSource;
use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};

pub struct DownloadDocsTool;

impl DownloadDocsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "download_docs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Download documentation files (.md, .txt) from a GitHub repository and return their contents.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, repo_params())
    }

    pub fn create(docs: Arc<dyn DocsSource>) -> Tool {
        Tool::new(Self::spec(), move |ctx| Self::execute(ctx, docs.clone()))
    }

    #[instrument(skip_all, fields(repo = %ctx.string("repo")))]
    pub async fn execute(ctx: ToolContext, docs: Arc<dyn DocsSource>) -> ToolResult {
        let repo = ctx.string("repo");
        let path = ctx.string("path");
        info!("Download docs tool called for {}", repo);

        match docs.fetch_docs(&repo, non_empty(&path)).await {
            Ok(result) => ctx.json(&result),
            Err(e) => {
                warn!("Docs download failed for {}: {}", repo, e);
                ctx.error(format!("download failed: {}", e))
            }
        }
    }
}

/// Parameters shared by both docs tools.
pub(super) fn repo_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::string(
            "repo",
            "GitHub repository URL, e.g. https://github.com/user/repo",
            true,
        ),
        ParamSpec::string("path", "Only include files under this directory, e.g. docs", false),
    ]
}

/// An empty path argument means no filter.
pub(super) fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::domains::docs::{DocFile, DocsError, DocsResult};
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::sync::Mutex;

    /// In-memory source recording the filter it was called with.
    #[derive(Debug, Default)]
    pub struct FakeDocs {
        pub seen_filter: Mutex<Option<Option<String>>>,
    }

    #[async_trait]
    impl DocsSource for FakeDocs {
        async fn fetch_docs(
            &self,
            repo_url: &str,
            path_filter: Option<&str>,
        ) -> Result<DocsResult, DocsError> {
            *self.seen_filter.lock().unwrap() = Some(path_filter.map(String::from));
            if repo_url.is_empty() {
                return Err(DocsError::MissingUrl);
            }
            Ok(DocsResult::new(
                repo_url,
                vec![DocFile {
                    path: "README.md".to_string(),
                    content: "Hello".to_string(),
                }],
            ))
        }
    }

    pub fn context(name: &str, repo: &str, path: Option<&str>) -> ToolContext {
        let mut args = Map::new();
        args.insert("repo".to_string(), json!(repo));
        if let Some(path) = path {
            args.insert("path".to_string(), json!(path));
        }
        ToolContext::new(name, args)
    }

    #[test]
    fn test_spec_marks_only_repo_required() {
        let schema = DownloadDocsTool::spec().schema();
        assert_eq!(schema.input_schema.required, vec!["repo"]);
        assert!(schema.input_schema.properties.contains_key("path"));
    }

    #[tokio::test]
    async fn test_download_returns_json() {
        let docs = Arc::new(FakeDocs::default());
        let ctx = context(DownloadDocsTool::NAME, "https://github.com/o/r", Some("docs"));
        let result = DownloadDocsTool::execute(ctx, docs.clone()).await;

        assert!(!result.is_error);
        let body: Value = serde_json::from_str(result.first_text()).unwrap();
        assert_eq!(body["repo_url"], "https://github.com/o/r");
        assert_eq!(body["owner"], "o");
        assert_eq!(body["repo"], "r");
        assert_eq!(body["count"], 1);
        assert_eq!(body["files"][0]["path"], "README.md");
        assert_eq!(
            *docs.seen_filter.lock().unwrap(),
            Some(Some("docs".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_path_means_no_filter() {
        let docs = Arc::new(FakeDocs::default());
        let ctx = context(DownloadDocsTool::NAME, "https://github.com/o/r", Some(""));
        DownloadDocsTool::execute(ctx, docs.clone()).await;
        assert_eq!(*docs.seen_filter.lock().unwrap(), Some(None));
    }

    #[tokio::test]
    async fn test_failure_is_prefixed() {
        let ctx = context(DownloadDocsTool::NAME, "", None);
        let result = DownloadDocsTool::execute(ctx, Arc::new(FakeDocs::default())).await;
        assert!(result.is_error);
        assert_eq!(
            result.first_text(),
            "download failed: repository URL is required"
        );
    }
}
