//! Web content extraction: fetch a page and turn it into Markdown.

pub mod collector;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod multi;
pub mod service;

pub use collector::Collector;
pub use error::ScrapeError;
pub use extract::{HtmlElement, clean_text, extract_content, format_markdown};
pub use fallback::FallbackFetcher;
pub use multi::{FetchItem, fetch_multi, parse_url_list};
pub use service::{ScrapeResult, Scraper};
