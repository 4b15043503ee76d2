//! Link extraction for the crawl frontier
//!
//! Anchors are resolved against the page URL, reduced to
//! `scheme://host/path`, and kept only when they fall inside the crawl's
//! domain scope and have not been visited yet.

use crate::url::{strip_query_and_fragment, DomainScope};
use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashSet};
use url::Url;

/// Extracts crawlable links from raw HTML
///
/// # Arguments
///
/// * `html` - The HTML content of the current page
/// * `current_url` - The URL the HTML was fetched from, used as the join base
/// * `scope` - The crawl's domain scope
/// * `visited` - URLs already dequeued in this crawl
///
/// # Returns
///
/// A sorted set of normalized absolute URLs. Duplicate links on the page
/// collapse to a single entry.
///
/// # Example
///
/// ```
/// use seo_ripple::crawler::extract_links;
/// use seo_ripple::url::{DomainScope, ScopeMode};
/// use std::collections::HashSet;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/docs/").unwrap();
/// let scope = DomainScope::from_seed(&page, ScopeMode::Registrable).unwrap();
/// let html = r#"<a href="intro?lang=en">Intro</a><a href="https://other.com/">Other</a>"#;
///
/// let links = extract_links(html, &page, &scope, &HashSet::new());
/// assert_eq!(links.into_iter().collect::<Vec<_>>(), vec!["https://example.com/docs/intro"]);
/// ```
pub fn extract_links(
    html: &str,
    current_url: &Url,
    scope: &DomainScope,
    visited: &HashSet<String>,
) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    extract_links_from_document(&document, current_url, scope, visited)
}

/// Extracts crawlable links from an already parsed document
pub fn extract_links_from_document(
    document: &Html,
    current_url: &Url,
    scope: &DomainScope,
    visited: &HashSet<String>,
) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(candidate) = resolve_link(href, current_url) else {
            tracing::trace!("Skipping unresolvable link {:?} on {}", href, current_url);
            continue;
        };

        if !scope.contains(&candidate) {
            tracing::trace!("Skipping out-of-scope link {}", candidate);
            continue;
        }

        let candidate = candidate.to_string();
        if !visited.contains(&candidate) {
            links.insert(candidate);
        }
    }

    links
}

/// Resolves an href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - The href cannot be joined onto the base URL
/// - The result is not HTTP(S) (`mailto:`, `javascript:`, `tel:`, `data:`)
/// - The result has no host
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let absolute_url = base_url.join(href.trim()).ok()?;

    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }
    absolute_url.host_str()?;

    Some(strip_query_and_fragment(&absolute_url))
}
