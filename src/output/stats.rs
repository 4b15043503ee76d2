//! Statistics over crawl results
//!
//! This module aggregates page analyses into a site-level SEO overview and
//! prints it.

use crate::crawler::PageAnalysis;
use std::io::{self, Write};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Number of pages analyzed
    pub total_pages: usize,

    /// Sum of word counts over all pages
    pub total_words: usize,

    /// Pages with an empty title
    pub missing_title: Vec<String>,

    /// Pages with an empty meta description
    pub missing_description: Vec<String>,

    /// Pages without any h1 heading
    pub missing_h1: Vec<String>,

    /// Number of image alt texts found
    pub alt_texts: usize,
}

impl CrawlStatistics {
    /// Computes statistics over a list of analyses
    pub fn from_pages(pages: &[PageAnalysis]) -> Self {
        let mut stats = Self {
            total_pages: pages.len(),
            ..Self::default()
        };

        for page in pages {
            stats.total_words += page.word_count;
            stats.alt_texts += page.alt_tags.len();

            if page.title.is_empty() {
                stats.missing_title.push(page.url.clone());
            }
            if page.meta_description.is_empty() {
                stats.missing_description.push(page.url.clone());
            }
            if !page.h_tags.iter().any(|(tag, _)| tag == "h1") {
                stats.missing_h1.push(page.url.clone());
            }
        }

        stats
    }

    /// Returns the mean word count per page
    pub fn average_words(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.total_words as f64 / self.total_pages as f64
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Stdout is reserved for the JSON report.
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    let stderr = std::io::stderr();
    if let Err(e) = write_statistics(stats, &mut stderr.lock()) {
        tracing::warn!("Failed to print statistics: {}", e);
    }
}

/// Writes statistics in the human-readable layout to `out`
pub fn write_statistics<W: Write>(stats: &CrawlStatistics, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Pages analyzed: {}", stats.total_pages)?;
    writeln!(out, "  Total words: {}", stats.total_words)?;
    writeln!(out, "  Average words per page: {:.1}", stats.average_words())?;
    writeln!(out, "  Image alt texts: {}", stats.alt_texts)?;
    writeln!(out)?;

    write_url_list(out, "Pages missing a title", &stats.missing_title)?;
    write_url_list(out, "Pages missing a meta description", &stats.missing_description)?;
    write_url_list(out, "Pages missing an h1", &stats.missing_h1)
}

fn write_url_list<W: Write>(out: &mut W, heading: &str, urls: &[String]) -> io::Result<()> {
    if urls.is_empty() {
        return Ok(());
    }

    writeln!(out, "{} ({}):", heading, urls.len())?;
    for url in urls {
        writeln!(out, "  - {}", url)?;
    }
    writeln!(out)
}
