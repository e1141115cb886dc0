//! Parallel multi-URL fetch tool definition.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};
use crate::domains::web::{FetchItem, Scraper, fetch_multi, parse_url_list};

#[derive(Debug, Serialize)]
struct FetchMultiOutput {
    results: Vec<FetchItem>,
}

/// Fetch several pages concurrently; results keep the input order.
pub struct FetchMultiTool;

impl FetchMultiTool {
    pub const NAME: &'static str = "fetch_multi";

    pub const DESCRIPTION: &'static str = "Fetch several URLs in parallel and return the title and Markdown content of each page.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            Self::DESCRIPTION,
            vec![ParamSpec::string("urls", "Comma-separated list of URLs", true)],
        )
    }

    pub fn create(scraper: Arc<Scraper>) -> Tool {
        Tool::new(Self::spec(), move |ctx| Self::execute(ctx, scraper.clone()))
    }

    #[instrument(skip_all)]
    pub async fn execute(ctx: ToolContext, scraper: Arc<Scraper>) -> ToolResult {
        let urls = parse_url_list(&ctx.string("urls"));
        info!("Fetch multi tool called with {} URLs", urls.len());

        match fetch_multi(scraper, urls).await {
            Ok(results) => ctx.json(&FetchMultiOutput { results }),
            Err(e) => ctx.error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ScraperConfig;
    use serde_json::{Map, Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scraper() -> Arc<Scraper> {
        Arc::new(Scraper::new(ScraperConfig::default()).unwrap())
    }

    fn context(urls: &str) -> ToolContext {
        let mut args = Map::new();
        args.insert("urls".to_string(), json!(urls));
        ToolContext::new(FetchMultiTool::NAME, args)
    }

    #[tokio::test]
    async fn test_blank_list_is_tool_error() {
        let result = FetchMultiTool::execute(context(" , ,"), scraper()).await;
        assert!(result.is_error);
        assert_eq!(result.first_text(), "no valid URLs");
    }

    #[tokio::test]
    async fn test_results_wrapper() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html><body><p>A</p></body></html>", "text/html"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let urls = format!("{0}/a, {0}/b", server.uri());
        let result = FetchMultiTool::execute(context(&urls), scraper()).await;
        assert!(!result.is_error);

        let body: Value = serde_json::from_str(result.first_text()).unwrap();
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["markdown"], "A\n\n");
        assert!(results[0].get("error").is_none());
        assert_eq!(results[1]["url"], format!("{}/b", server.uri()));
        assert_eq!(results[1]["error"], "unexpected status: 404");
    }
}
