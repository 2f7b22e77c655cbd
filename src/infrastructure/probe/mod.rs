//! Page probe adapters
//!
//! - `HttpProber`: fetches the page source over HTTP
//! - `BrowserProber`: renders the page in a headless Chromium-compatible browser
//!
//! Both match the pattern against the page's visible text the way a reader
//! would: markup is stripped, `<script>` and `<style>` bodies are ignored,
//! matching is case-insensitive, and runs of whitespace count as one space.

pub mod browser;
pub mod http;

pub use browser::BrowserProber;
pub use http::HttpProber;

use scraper::{ElementRef, Html};
use std::sync::Arc;

use crate::domain::errors::ProbeError;
use crate::domain::models::{ProbeConfig, ProbeKind};
use crate::domain::ports::Prober;

/// Build the prober selected by configuration.
pub fn build_prober(config: &ProbeConfig) -> Result<Arc<dyn Prober>, ProbeError> {
    Ok(match config.kind {
        ProbeKind::Http => Arc::new(HttpProber::new(config)?),
        ProbeKind::Browser => Arc::new(BrowserProber::new(config)),
    })
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Loose text match used by every prober.
pub fn contains_text(haystack: &str, pattern: &str) -> bool {
    let needle = normalize(pattern);
    !needle.is_empty() && normalize(haystack).contains(&needle)
}

/// Elements whose content is never rendered as text.
const HIDDEN: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that start a new line of text when rendered.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "table", "td", "th",
    "tr", "ul",
];

/// Text content of an HTML document as a reader would see it.
///
/// Inline markup joins its text directly (`Fully <b>booked</b>` reads
/// "Fully booked"); block elements are separated by whitespace.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if HIDDEN.contains(&name) {
                continue;
            }
            let block = BLOCKS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// [`contains_text`] over the visible text of an HTML document.
pub fn html_contains_text(html: &str, pattern: &str) -> bool {
    contains_text(&page_text(html), pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ignores_case_and_spacing() {
        assert!(contains_text("<p>Fully\n   Booked</p>", "fully booked"));
        assert!(contains_text("No appointments", "NO APPOINTMENTS"));
        assert!(!contains_text("Appointments available", "fully booked"));
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        assert!(!contains_text("anything", "   "));
    }

    #[test]
    fn test_text_split_across_tags_is_found() {
        assert!(html_contains_text("<p>Fully <b>booked</b></p>", "Fully booked"));
        assert!(html_contains_text(
            "<ul><li>Mon</li><li>Fully</li></ul><p>booked today</p>",
            "fully booked"
        ));
    }

    #[test]
    fn test_script_and_style_are_not_page_text() {
        let html = "<p>Slots open</p><script>var banner = 'Fully booked';</script>";
        assert!(!html_contains_text(html, "Fully booked"));
        assert!(html_contains_text(html, "slots open"));

        let html = "<style>.fully-booked::after { content: 'Fully booked'; }</style><p>Open</p>";
        assert!(!html_contains_text(html, "Fully booked"));
    }

    #[test]
    fn test_markup_is_not_page_text() {
        let html = r#"<div class="Fully booked" title="Fully booked"><!-- Fully booked -->Open</div>"#;
        assert!(!html_contains_text(html, "Fully booked"));
        assert_eq!(page_text(html).trim(), "Open");
    }

    #[test]
    fn test_block_elements_do_not_run_together() {
        assert!(!html_contains_text("<div>Sold</div><div>out</div>", "Soldout"));
        assert!(html_contains_text("<div>Sold</div><div>out</div>", "Sold out"));
    }

    #[test]
    fn test_plain_text_body_is_its_own_text() {
        assert!(html_contains_text("Appointments available", "appointments"));
    }

    #[test]
    fn test_build_prober_by_kind() {
        let http = build_prober(&ProbeConfig::default()).unwrap();
        assert_eq!(http.name(), "http");

        let browser = build_prober(&ProbeConfig {
            kind: ProbeKind::Browser,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(browser.name(), "browser");
    }
}
