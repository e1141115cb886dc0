//! Web page to Markdown pipeline.
//!
//! [`Scraper::fetch_to_markdown`] runs the primary strategy (a [`Collector`]
//! visit) and continues with the [`FallbackFetcher`] when the visit fails or
//! captures no body content. Only the fallback's failure reaches the caller.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::core::config::ScraperConfig;

use super::collector::Collector;
use super::error::ScrapeError;
use super::extract::{extract_content, format_markdown};
use super::fallback::FallbackFetcher;

/// Output of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    /// Empty when the page has no `<title>`.
    pub title: String,
    pub markdown: String,
}

/// Two-strategy page fetcher.
#[derive(Debug, Clone)]
pub struct Scraper {
    crawler: Client,
    fallback: FallbackFetcher,
}

impl Scraper {
    /// Build the HTTP clients for both strategies.
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let crawler = Client::builder()
            .timeout(Duration::from_secs(config.visit_timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(ScrapeError::Client)?;
        let fallback = FallbackFetcher::new(Duration::from_secs(config.fallback_timeout_secs))?;

        Ok(Self { crawler, fallback })
    }

    /// Fetch `url` and convert it to Markdown.
    #[instrument(skip(self))]
    pub async fn fetch_to_markdown(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let mut title: Option<String> = None;
        let mut body = String::new();

        let visited = {
            let mut collector = Collector::new(self.crawler.clone()).allow_url_revisit(true);
            collector.on_html("title", |e| {
                if title.is_none() {
                    title = Some(e.text().trim().to_string());
                }
            });
            collector.on_html("body", |e| body.push_str(&extract_content(e)));
            collector.visit(url).await
        };

        match visited {
            Ok(()) if !body.is_empty() => {
                let title = title.unwrap_or_default();
                info!("Fetched {} with the primary strategy", url);
                return Ok(ScrapeResult {
                    url: url.to_string(),
                    markdown: format_markdown(&title, &body),
                    title,
                });
            }
            Ok(()) => debug!("Primary strategy captured no body content for {}", url),
            Err(e) => warn!("Primary strategy failed for {}: {}", url, e),
        }

        info!("Falling back to direct fetch for {}", url);
        self.fallback.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::web::fallback::{BROWSER_USER_AGENT, raw_header};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scraper() -> Scraper {
        Scraper::new(ScraperConfig::default()).unwrap()
    }

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
    }

    #[tokio::test]
    async fn test_primary_content_skips_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(raw_header("user-agent", BROWSER_USER_AGENT))
            .respond_with(html("<p>fallback</p>"))
            .with_priority(1)
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(html(
                "<html><head><title> Primary </title></head><body><p>B</p><h1>A</h1></body></html>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let page = scraper()
            .fetch_to_markdown(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.title, "Primary");
        assert_eq!(page.markdown, "# Primary\n\n# A\n\nB\n\n");
    }

    #[tokio::test]
    async fn test_empty_primary_triggers_fallback_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spa"))
            .and(raw_header("user-agent", BROWSER_USER_AGENT))
            .respond_with(html(
                "<html><head><title>Rendered</title></head><body><h2>Server side</h2></body></html>",
            ))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spa"))
            .respond_with(html(
                "<html><head><title>Shell</title></head><body><div id=\"app\"></div></body></html>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let page = scraper()
            .fetch_to_markdown(&format!("{}/spa", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.title, "Rendered");
        assert_eq!(page.markdown, "# Rendered\n\n## Server side\n\n");
    }

    #[tokio::test]
    async fn test_primary_failure_triggers_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/guarded"))
            .and(raw_header("user-agent", BROWSER_USER_AGENT))
            .respond_with(html("<p>Welcome, browser</p>"))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/guarded"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let page = scraper()
            .fetch_to_markdown(&format!("{}/guarded", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.title, "");
        assert_eq!(page.markdown, "Welcome, browser\n\n");
    }

    #[tokio::test]
    async fn test_fallback_failure_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let err = scraper()
            .fetch_to_markdown(&format!("{}/gone", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unexpected status: 404");
    }
}
