//! SEO signal extraction
//!
//! This module turns a fetched HTML document into a [`PageAnalysis`]:
//! - Page title
//! - Meta description and keywords
//! - h1-h3 headings in document order
//! - Image alt texts
//! - Visible word count

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// SEO signals extracted from one crawled page
///
/// Field names are part of the JSON report format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// The URL the page was fetched from
    pub url: String,

    /// Trimmed text of the first `<title>`, empty when absent
    pub title: String,

    /// `content` of the last `<meta name="description">`
    pub meta_description: String,

    /// `content` of the last `<meta name="keywords">`
    pub meta_keywords: String,

    /// `(tag, text)` for every h1, h2 and h3 in document order
    pub h_tags: Vec<(String, String)>,

    /// Non-empty `alt` attributes of every `<img>` in document order
    pub alt_tags: Vec<String>,

    /// Number of whitespace-separated tokens in the document text
    pub word_count: usize,
}

/// Analyzes raw HTML for a page
///
/// Parsing is best-effort: malformed markup never fails, missing elements
/// simply yield empty defaults.
///
/// # Arguments
///
/// * `url` - The URL the HTML was fetched from
/// * `html` - The rendered HTML content
///
/// # Example
///
/// ```
/// use seo_ripple::crawler::analyze;
///
/// let html = r#"<html><head><title> Home </title></head><body><h1>Welcome</h1></body></html>"#;
/// let analysis = analyze("https://example.com/", html);
/// assert_eq!(analysis.title, "Home");
/// assert_eq!(analysis.h_tags, vec![("h1".to_string(), "Welcome".to_string())]);
/// ```
pub fn analyze(url: &str, html: &str) -> PageAnalysis {
    let document = Html::parse_document(html);
    analyze_document(url, &document)
}

/// Analyzes an already parsed document
pub fn analyze_document(url: &str, document: &Html) -> PageAnalysis {
    let (meta_description, meta_keywords) = extract_meta(document);

    PageAnalysis {
        url: url.to_string(),
        title: extract_title(document),
        meta_description,
        meta_keywords,
        h_tags: extract_headings(document),
        alt_tags: extract_alt_texts(document),
        word_count: count_words(document),
    }
}

/// Extracts the trimmed text of the first `<title>` element
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts `(description, keywords)` from `<meta name=...>` tags
///
/// Every matching tag overwrites the previous one, so duplicates resolve to
/// the last one in document order.
fn extract_meta(document: &Html) -> (String, String) {
    let mut description = String::new();
    let mut keywords = String::new();

    let Ok(meta_selector) = Selector::parse("meta") else {
        return (description, keywords);
    };

    for element in document.select(&meta_selector) {
        let name = element.value().attr("name").unwrap_or("");
        let content = element.value().attr("content").unwrap_or("");

        if name.eq_ignore_ascii_case("description") {
            description = content.to_string();
        } else if name.eq_ignore_ascii_case("keywords") {
            keywords = content.to_string();
        }
    }

    (description, keywords)
}

/// Extracts h1-h3 headings in document order
fn extract_headings(document: &Html) -> Vec<(String, String)> {
    let Ok(heading_selector) = Selector::parse("h1, h2, h3") else {
        return Vec::new();
    };

    document
        .select(&heading_selector)
        .map(|element| {
            let tag = element.value().name().to_ascii_lowercase();
            let text = element.text().collect::<String>().trim().to_string();
            (tag, text)
        })
        .collect()
}

/// Extracts non-empty image alt texts in document order
fn extract_alt_texts(document: &Html) -> Vec<String> {
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .filter_map(|element| element.value().attr("alt"))
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Elements whose text content is never rendered as page text
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Counts whitespace-separated tokens across all visible text nodes
///
/// Text inside [`NON_VISIBLE_ELEMENTS`] is skipped. Visible text nodes are
/// concatenated as-is before splitting, so words in adjacent elements with no
/// whitespace between them count as one token.
fn count_words(document: &Html) -> usize {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_VISIBLE_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text.split_whitespace().count()
}
