// src/crawl/extract.rs
// =============================================================================
// This module extracts crawlable links from an HTML page.
//
// We use the `scraper` crate (built on html5ever) to find every <a href>
// in document order, then the `url` crate to resolve each href against the
// page it was found on.
//
// A link is kept only if:
// - it resolves to a valid absolute URL
// - its host is exactly the page's host (no subdomains)
// - it does not end with an excluded suffix (.png, .jpg, .jpeg, .htm, .pdf)
//
// Duplicates are kept. Deciding what has already been seen is the frontier's
// job, not ours.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::normalize::has_excluded_suffix;

// Extracts same-host links from HTML content
//
// Parameters:
//   html: the page body (malformed markup is fine, html5ever recovers)
//   base: the URL the page was fetched from
//
// Returns: absolute URLs in document order. Query and fragment are still
// attached at this point.
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='https://other.com/'>x</a>"
//   base = "https://example.com/page"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let host = match base.host_str() {
        Some(host) => host,
        None => return Vec::new(),
    };

    let document = Html::parse_document(html);

    // The selector is a constant, so parsing it can only fail on a typo here
    let selector = Selector::parse("a[href]").expect("valid anchor selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .filter(|link| link.host_str() == Some(host))
        .filter(|link| !has_excluded_suffix(link))
        .collect()
}

// Resolves a link (possibly relative) against the page URL
//
// Url::join covers every form an href can take:
//   "https://example.com/a" -> absolute, returned as-is
//   "//example.com/a"       -> protocol-relative, takes the page's scheme
//   "/a", "../a", "a"       -> path-relative
//   "#section"              -> same page with a fragment
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}
