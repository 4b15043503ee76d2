//! Crawler coordinator - fetcher lifecycle around a crawl
//!
//! This module picks the configured fetcher, acquires it once for the whole
//! crawl, runs the [`Scheduler`] and releases the fetcher after the frontier
//! is exhausted.

use crate::config::{Config, FetcherKind};
use crate::crawler::analyzer::PageAnalysis;
use crate::crawler::fetcher::{BrowserFetcher, HttpFetcher};
use crate::crawler::scheduler::Scheduler;
use crate::url::parse_seed_url;
use crate::SeoError;

/// Main crawler entry point
///
/// A `Crawler` holds only configuration. Every call to [`Crawler::crawl`]
/// builds its own scheduler and fetcher, so one `Crawler` can serve several
/// independent crawls, including concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct Crawler {
    config: Config,
}

impl Crawler {
    /// Creates a new crawler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls `seed_url` breadth-first up to `max_depth` links away
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Absolute HTTP(S) URL to start from
    /// * `max_depth` - Maximum link distance from the seed
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PageAnalysis>)` - One analysis per successfully fetched page,
    ///   in breadth-first order
    /// * `Err(SeoError)` - The seed URL is invalid or the fetcher could not
    ///   be started
    pub async fn crawl(
        &self,
        seed_url: &str,
        max_depth: u32,
    ) -> Result<Vec<PageAnalysis>, SeoError> {
        // Reject bad input before paying for a browser launch
        parse_seed_url(seed_url)?;

        let timeout = self.config.crawler.navigation_timeout();

        match self.config.crawler.fetcher {
            FetcherKind::Browser => {
                let fetcher = BrowserFetcher::launch(&self.config.browser, timeout).await?;
                let result = Scheduler::new(&fetcher, self.config.crawler.clone())
                    .run(seed_url, max_depth)
                    .await;
                fetcher.close().await;
                result
            }
            FetcherKind::Http => {
                let fetcher = HttpFetcher::new(&self.config.user_agent, timeout)?;
                Scheduler::new(&fetcher, self.config.crawler.clone())
                    .run(seed_url, max_depth)
                    .await
            }
        }
    }
}

/// Crawls a site with the default configuration (headless browser)
///
/// # Example
///
/// ```no_run
/// use seo_ripple::crawl;
///
/// # async fn example() -> Result<(), seo_ripple::SeoError> {
/// let pages = crawl("https://example.com/", 2).await?;
/// for page in pages {
///     println!("{}: {} ({} words)", page.url, page.title, page.word_count);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, max_depth: u32) -> Result<Vec<PageAnalysis>, SeoError> {
    Crawler::default().crawl(seed_url, max_depth).await
}
