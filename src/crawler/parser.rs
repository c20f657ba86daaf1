//! HTML parser for the site crawler
//!
//! This module handles parsing HTML content to extract:
//! - Text nodes that may hold an email address
//! - Links to follow (from <a> tags)

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Raw text nodes containing an `@`, in document order
    pub at_texts: Vec<String>,

    /// All links found on the page (absolute HTTP(S) URLs, document order)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts email-bearing text and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` targets, resolved against `base_url`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (`#section`)
/// - Anything that is not HTTP(S) after resolution
///
/// # Example
///
/// ```
/// use company_scout::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Mail info@acme.com</p><a href="/contact">Contact</a></body></html>"#;
/// let base_url = Url::parse("https://acme.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.at_texts, vec!["Mail info@acme.com"]);
/// assert_eq!(parsed.links, vec!["https://acme.com/contact"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        at_texts: extract_at_texts(&document),
        links: extract_links(&document, base_url),
    }
}

/// Collects every text node containing an `@`
fn extract_at_texts(document: &Html) -> Vec<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text())
        .filter(|text| text.contains('@'))
        .map(|text| (**text).to_string())
        .collect()
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// Any `#fragment` is dropped so that anchors into one page share its URL.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url) => {
            absolute_url.set_fragment(None);
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
