//! Tag-triggered page visitor used by the primary fetch strategy.
//!
//! Callbacks are registered per CSS selector with [`Collector::on_html`].
//! [`Collector::visit`] fetches a single page (links are never followed),
//! and if the response is HTML, invokes each callback for every matching
//! element, in registration order.

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use super::error::ScrapeError;
use super::extract::HtmlElement;

type HtmlCallback<'c> = Box<dyn FnMut(HtmlElement<'_>) + Send + 'c>;

/// Single-page HTML visitor with selector-keyed callbacks.
pub struct Collector<'c> {
    client: Client,
    allow_url_revisit: bool,
    visited: HashSet<String>,
    callbacks: Vec<(Selector, HtmlCallback<'c>)>,
}

impl<'c> Collector<'c> {
    /// Create a collector that sends requests through `client`.
    ///
    /// Revisiting a URL is refused by default.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            allow_url_revisit: false,
            visited: HashSet::new(),
            callbacks: Vec::new(),
        }
    }

    /// Allow or refuse visiting the same URL more than once.
    pub fn allow_url_revisit(mut self, allow: bool) -> Self {
        self.allow_url_revisit = allow;
        self
    }

    /// Register `callback` for every element matching `css`.
    ///
    /// An invalid selector is logged and the callback is dropped.
    pub fn on_html<F>(&mut self, css: &str, callback: F)
    where
        F: FnMut(HtmlElement<'_>) + Send + 'c,
    {
        match Selector::parse(css) {
            Ok(selector) => self.callbacks.push((selector, Box::new(callback))),
            Err(e) => warn!("Ignoring callback for invalid selector {:?}: {:?}", css, e),
        }
    }

    /// Fetch `url` and run the registered callbacks over the page.
    ///
    /// Non-2xx responses are errors. Non-HTML responses succeed without
    /// triggering any callback.
    #[instrument(skip(self))]
    pub async fn visit(&mut self, url: &str) -> Result<(), ScrapeError> {
        if !self.visited.insert(url.to_string()) && !self.allow_url_revisit {
            return Err(ScrapeError::AlreadyVisited(url.to_string()));
        }

        let request = self
            .client
            .get(url)
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

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("html"));

        let body = response.text().await.map_err(ScrapeError::ReadBody)?;

        if is_html {
            self.dispatch(&body);
        } else {
            debug!("Skipping callbacks for non-HTML response from {}", url);
        }
        Ok(())
    }

    fn dispatch(&mut self, body: &str) {
        let document = Html::parse_document(body);
        for (selector, callback) in self.callbacks.iter_mut() {
            for element in document.select(selector) {
                callback(HtmlElement::new(element));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_visit_runs_callbacks_in_registration_order() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/page",
            ResponseTemplate::new(200).set_body_raw(
                "<html><head><title>T</title></head><body><li>a</li><li>b</li></body></html>",
                "text/html; charset=utf-8",
            ),
        )
        .await;

        let mut seen = Vec::new();
        {
            let mut collector = Collector::new(Client::new());
            collector.on_html("li", |e| seen.push(format!("li:{}", e.text())));
            collector.visit(&format!("{}/page", server.uri())).await.unwrap();
        }
        assert_eq!(seen, vec!["li:a", "li:b"]);
    }

    #[tokio::test]
    async fn test_visit_non_html_skips_callbacks() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/plain",
            ResponseTemplate::new(200).set_body_raw("<p>not html</p>", "text/plain"),
        )
        .await;

        let mut count = 0;
        {
            let mut collector = Collector::new(Client::new());
            collector.on_html("p", |_| count += 1);
            collector.visit(&format!("{}/plain", server.uri())).await.unwrap();
        }
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_visit_error_status() {
        let server = MockServer::start().await;
        serve(&server, "/missing", ResponseTemplate::new(404)).await;

        let mut collector = Collector::new(Client::new());
        let err = collector
            .visit(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Status(404)));
    }

    #[tokio::test]
    async fn test_revisit_policy() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/again",
            ResponseTemplate::new(200).set_body_raw("<p>x</p>", "text/html"),
        )
        .await;
        let url = format!("{}/again", server.uri());

        let mut strict = Collector::new(Client::new());
        strict.visit(&url).await.unwrap();
        assert!(matches!(
            strict.visit(&url).await,
            Err(ScrapeError::AlreadyVisited(_))
        ));

        let mut lenient = Collector::new(Client::new()).allow_url_revisit(true);
        lenient.visit(&url).await.unwrap();
        lenient.visit(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_build_error() {
        let mut collector = Collector::new(Client::new());
        let err = collector.visit("not a url").await.unwrap_err();
        assert!(matches!(err, ScrapeError::BuildRequest(_)));
    }
}
