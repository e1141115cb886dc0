//! Repository documentation download tool, Markdown flavour.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::docs::DocsSource;
use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{Tool, ToolSpec};

use super::download::{non_empty, repo_params};

pub struct DownloadDocsMdTool;

impl DownloadDocsMdTool {
    pub const NAME: &'static str = "download_docs_md";

    pub const DESCRIPTION: &'static str =
        "Download documentation files from a GitHub repository and return them merged into one Markdown text.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, repo_params())
    }

    /// `preview_chars` bounds how much of each file is rendered.
    pub fn create(docs: Arc<dyn DocsSource>, preview_chars: usize) -> Tool {
        Tool::new(Self::spec(), move |ctx| {
            Self::execute(ctx, docs.clone(), preview_chars)
        })
    }

    #[instrument(skip_all, fields(repo = %ctx.string("repo")))]
    pub async fn execute(
        ctx: ToolContext,
        docs: Arc<dyn DocsSource>,
        preview_chars: usize,
    ) -> ToolResult {
        let repo = ctx.string("repo");
        let path = ctx.string("path");
        info!("Download docs (markdown) tool called for {}", repo);

        match docs.fetch_docs(&repo, non_empty(&path)).await {
            Ok(result) => ctx.markdown(result.to_markdown(preview_chars)),
            Err(e) => {
                warn!("Docs download failed for {}: {}", repo, e);
                ctx.error(format!("download failed: {}", e))
            }
        }
    }
}
