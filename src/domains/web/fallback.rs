//! Fallback fetch strategy: a plain GET with a browser identity, followed by
//! the same category extraction over the statically parsed document.

use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::ScrapeError;
use super::extract::{HtmlElement, extract_content, format_markdown};
use super::service::ScrapeResult;

/// User agent presented by the fallback request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Accept header presented by the fallback request.
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Direct HTTP fetcher posing as a desktop browser.
#[derive(Debug, Clone)]
pub struct FallbackFetcher {
    client: Client,
}

impl FallbackFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }

    /// Fetch `url` and convert the page to Markdown.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, BROWSER_ACCEPT)
            .build()
            .map_err(ScrapeError::BuildRequest)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ScrapeError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(ScrapeError::ReadBody)?;
        debug!("Fallback fetched {} bytes from {}", body.len(), url);

        Ok(parse_page(url, &body))
    }
}

/// Extract title and Markdown from a whole HTML document.
pub fn parse_page(url: &str, body: &str) -> ScrapeResult {
    let document = Html::parse_document(body);
    let root = HtmlElement::new(document.root_element());

    let title = root
        .first("title")
        .map(|t| t.text().trim().to_string())
        .unwrap_or_default();
    let content = extract_content(root);

    ScrapeResult {
        url: url.to_string(),
        markdown: format_markdown(&title, &content),
        title,
    }
}

/// Mock matcher comparing a request header against its exact raw value.
///
/// `wiremock::matchers::header` splits values on commas, which never matches
/// the browser user agent or accept list.
#[cfg(test)]
pub(crate) fn raw_header(
    name: &'static str,
    value: &'static str,
) -> impl Fn(&wiremock::Request) -> bool + Send + Sync {
    move |req: &wiremock::Request| {
        req.headers.get(name).and_then(|v| v.to_str().ok()) == Some(value)
    }
}
