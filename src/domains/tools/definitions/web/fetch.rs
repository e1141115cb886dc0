//! Fetch tool definition.
//!
//! Fetches a web page and returns its URL, title and Markdown as JSON.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};
use crate::domains::web::Scraper;

/// Fetch tool - page to JSON `{url, title, markdown}`.
pub struct FetchTool;

impl FetchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fetch";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch a web page and convert its content to Markdown.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            Self::DESCRIPTION,
            vec![ParamSpec::string("url", "URL of the web page to fetch", true)],
        )
    }

    /// Create the registry entry for this tool.
    pub fn create(scraper: Arc<Scraper>) -> Tool {
        Tool::new(Self::spec(), move |ctx| {
            let scraper = scraper.clone();
            async move { Self::execute(ctx, &scraper).await }
        })
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(url = %ctx.string("url")))]
    pub async fn execute(ctx: ToolContext, scraper: &Scraper) -> ToolResult {
        let url = ctx.string("url");
        info!("Fetch tool called for {}", url);

        match scraper.fetch_to_markdown(&url).await {
            Ok(page) => ctx.json(&page),
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                ctx.error(format!("fetch failed: {}", e))
            }
        }
    }
}
