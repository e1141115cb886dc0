//! Category-based HTML to Markdown extraction.
//!
//! Both fetch strategies funnel into [`extract_content`]. It scans the
//! element's subtree one tag category at a time, in a fixed order:
//!
//! 1. headings `h1`..`h6`
//! 2. paragraphs
//! 3. list items of `ul`/`ol`
//! 4. `pre`/`code` blocks (raw text, fenced)
//! 5. links with a non-fragment `href`
//!
//! Output is grouped by category, not by document order: a paragraph that
//! precedes a heading in the source still comes after it in the Markdown.

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;
use tracing::warn;

/// Read-only view over an HTML element, handed to collector callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmlElement<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Lower-case tag name.
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Concatenated text of the element and all its descendants, untrimmed.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Call `f` for every descendant matching `css`, in document order.
    ///
    /// An unparseable selector matches nothing.
    pub fn for_each(&self, css: &str, mut f: impl FnMut(HtmlElement<'a>)) {
        match Selector::parse(css) {
            Ok(selector) => {
                for element in self.element.select(&selector) {
                    f(HtmlElement::new(element));
                }
            }
            Err(e) => warn!("Ignoring invalid selector {:?}: {:?}", css, e),
        }
    }

    /// First descendant matching `css`.
    pub fn first(&self, css: &str) -> Option<HtmlElement<'a>> {
        let selector = Selector::parse(css).ok()?;
        self.element.select(&selector).next().map(HtmlElement::new)
    }
}

/// ASCII whitespace runs: tab, newline, form feed, carriage return, space.
static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN
        .get_or_init(|| Regex::new(r"[\t\n\x0C\r ]+").expect("Invalid whitespace regex"))
}

/// Collapse every ASCII whitespace run to a single space and trim both ends.
///
/// Non-breaking spaces and vertical tabs inside the text are kept as-is.
pub fn clean_text(s: &str) -> String {
    whitespace_run().replace_all(s, " ").trim().to_string()
}

/// Heading level from a tag name such as `h3`.
fn heading_level(tag: &str) -> Option<usize> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(d @ '1'..='6'), None) => d.to_digit(10).map(|n| n as usize),
        _ => None,
    }
}

/// Convert the subtree under `root` to Markdown, one tag category at a time.
pub fn extract_content(root: HtmlElement<'_>) -> String {
    let mut md = String::new();

    root.for_each("h1, h2, h3, h4, h5, h6", |el| {
        let Some(level) = heading_level(el.name()) else {
            return;
        };
        let text = clean_text(&el.text());
        if !text.is_empty() {
            md.push_str(&format!("{} {}\n\n", "#".repeat(level), text));
        }
    });

    root.for_each("p", |el| {
        let text = clean_text(&el.text());
        if !text.is_empty() {
            md.push_str(&text);
            md.push_str("\n\n");
        }
    });

    root.for_each("ul li, ol li", |el| {
        let text = clean_text(&el.text());
        if !text.is_empty() {
            md.push_str(&format!("- {}\n", text));
        }
    });

    // Code keeps its original whitespace.
    root.for_each("pre, code", |el| {
        let raw = el.text();
        if !clean_text(&raw).is_empty() {
            md.push_str(&format!("```\n{}\n```\n\n", raw));
        }
    });

    root.for_each("a[href]", |el| {
        let href = el.attr("href").unwrap_or_default();
        let text = clean_text(&el.text());
        if !text.is_empty() && !href.is_empty() && !href.starts_with('#') {
            md.push_str(&format!("[{}]({})\n", text, href));
        }
    });

    md
}

/// Prepend the title heading, when there is a title, to the extracted body.
pub fn format_markdown(title: &str, content: &str) -> String {
    let mut md = String::with_capacity(title.len() + content.len() + 4);
    if !title.is_empty() {
        md.push_str(&format!("# {}\n\n", title));
    }
    md.push_str(content);
    md
}
