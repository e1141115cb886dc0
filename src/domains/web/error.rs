//! Errors raised by the content extraction pipeline.

use thiserror::Error;

/// Errors that can occur while fetching and converting a page.
///
/// Display strings carry the failing step as a prefix, so tool handlers can
/// surface them to the caller verbatim.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// An HTTP client could not be constructed.
    #[error("build http client failed: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be built, typically because the URL is invalid.
    #[error("build request failed: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// The request was sent but failed before a response arrived.
    #[error("http fetch failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The response body could not be read.
    #[error("read body failed: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The collector refused to visit a URL it has already seen.
    #[error("URL already visited: {0}")]
    AlreadyVisited(String),

    /// A multi-fetch was requested without a single usable URL.
    #[error("no valid URLs")]
    NoUrls,
}
