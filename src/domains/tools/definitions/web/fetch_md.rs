//! Fetch-as-Markdown tool definition.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};
use crate::domains::web::Scraper;

/// Like [`super::FetchTool`], but returns the Markdown text only.
pub struct FetchMdTool;

impl FetchMdTool {
    pub const NAME: &'static str = "fetch_md";

    pub const DESCRIPTION: &'static str =
        "Fetch a web page and return only its Markdown content.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            Self::DESCRIPTION,
            vec![ParamSpec::string("url", "URL of the web page to fetch", true)],
        )
    }

    pub fn create(scraper: Arc<Scraper>) -> Tool {
        Tool::new(Self::spec(), move |ctx| {
            let scraper = scraper.clone();
            async move { Self::execute(ctx, &scraper).await }
        })
    }

    #[instrument(skip_all, fields(url = %ctx.string("url")))]
    pub async fn execute(ctx: ToolContext, scraper: &Scraper) -> ToolResult {
        let url = ctx.string("url");
        info!("Fetch (markdown) tool called for {}", url);

        match scraper.fetch_to_markdown(&url).await {
            Ok(page) => ctx.markdown(page.markdown),
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                ctx.error(format!("fetch failed: {}", e))
            }
        }
    }
}
