//! Parallel multi-URL fetch.
//!
//! One task per URL; each outcome lands in the slot matching the URL's
//! input position, so completion order never shows in the output.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ScrapeError;
use super::service::Scraper;

/// Outcome of one URL in a multi-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchItem {
    pub url: String,
    pub title: String,
    pub markdown: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl FetchItem {
    fn failed(url: String, error: impl ToString) -> Self {
        Self {
            url,
            error: error.to_string(),
            ..Default::default()
        }
    }
}

/// Split a comma-separated URL list, trimming entries and dropping empty ones.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .collect()
}

/// Fetch every URL concurrently and return the results in input order.
///
/// Per-URL failures are recorded in that URL's slot; the call itself only
/// fails when `urls` is empty.
pub async fn fetch_multi(
    scraper: Arc<Scraper>,
    urls: Vec<String>,
) -> Result<Vec<FetchItem>, ScrapeError> {
    if urls.is_empty() {
        return Err(ScrapeError::NoUrls);
    }

    info!("Fetching {} URLs concurrently", urls.len());

    let handles: Vec<_> = urls
        .iter()
        .cloned()
        .map(|url| {
            let scraper = Arc::clone(&scraper);
            tokio::spawn(async move { scraper.fetch_to_markdown(&url).await })
        })
        .collect();

    let mut results = vec![FetchItem::default(); urls.len()];
    for ((slot, url), handle) in results.iter_mut().zip(urls).zip(handles) {
        *slot = match handle.await {
            Ok(Ok(page)) => FetchItem {
                url,
                title: page.title,
                markdown: page.markdown,
                error: String::new(),
            },
            Ok(Err(e)) => {
                warn!("Fetch failed for {}: {}", url, e);
                FetchItem::failed(url, e)
            }
            Err(e) => {
                warn!("Fetch task for {} did not complete: {}", url, e);
                FetchItem::failed(url, format!("fetch task failed: {}", e))
            }
        };
    }

    Ok(results)
}
