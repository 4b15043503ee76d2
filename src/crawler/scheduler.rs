//! Breadth-first crawl scheduler
//!
//! This module owns the per-crawl state:
//! - The FIFO frontier of [`CrawlTarget`]s
//! - The visited set
//! - The ordered list of page analyses
//!
//! A scheduler is built for one crawl and consumed by [`Scheduler::run`], so
//! concurrent crawls never share frontier or visited state.

use crate::config::CrawlerConfig;
use crate::crawler::analyzer::{analyze_document, PageAnalysis};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::links::extract_links_from_document;
use crate::url::{parse_seed_url, DomainScope};
use crate::SeoError;
use scraper::Html;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// The URL to fetch
    pub url: String,

    /// Link distance from the seed (seed = 0)
    pub depth: u32,
}

/// Scheduler drives one bounded-depth breadth-first crawl
///
/// Pages are processed strictly one at a time: dequeue, fetch, analyze,
/// enqueue children. At most one fetch is in flight.
pub struct Scheduler<'a, F> {
    /// Fetcher used for every page of this crawl
    fetcher: &'a F,

    /// Crawler configuration
    config: CrawlerConfig,

    /// FIFO queue of URLs to fetch
    frontier: VecDeque<CrawlTarget>,

    /// URLs already dequeued; only grows
    visited: HashSet<String>,

    /// Analyses in the order pages were successfully processed
    results: Vec<PageAnalysis>,
}

impl<'a, F: PageFetcher> Scheduler<'a, F> {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetcher pages are retrieved with
    /// * `config` - The crawler configuration (scope mode, page cap)
    pub fn new(fetcher: &'a F, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            config,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            results: Vec::new(),
        }
    }

    /// Runs the crawl to completion
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Absolute HTTP(S) URL to start from
    /// * `max_depth` - Maximum link distance from the seed to analyze
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PageAnalysis>)` - Analyses in BFS order, restricted to pages
    ///   that fetched successfully
    /// * `Err(SeoError)` - The seed URL is invalid; nothing was fetched
    pub async fn run(
        mut self,
        seed_url: &str,
        max_depth: u32,
    ) -> Result<Vec<PageAnalysis>, SeoError> {
        let seed = parse_seed_url(seed_url)?;
        let scope = DomainScope::from_seed(&seed, self.config.scope)?;

        tracing::info!(
            "Starting crawl of {} (max depth {}, scope {} {:?})",
            seed,
            max_depth,
            scope.domain(),
            scope.mode()
        );

        self.frontier.push_back(CrawlTarget {
            url: seed.to_string(),
            depth: 0,
        });

        let start_time = Instant::now();
        let mut attempts = 0usize;

        loop {
            if self.page_limit_reached() {
                tracing::info!(
                    "Page limit of {} reached, {} URLs left in frontier",
                    self.results.len(),
                    self.frontier.len()
                );
                break;
            }

            let Some(target) = self.next_target(max_depth) else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            tracing::debug!("Crawling [depth {}]: {}", target.depth, target.url);
            attempts += 1;

            let Some(html) = self.fetcher.fetch(&target.url).await else {
                continue;
            };

            self.process_page(&target, &html, &scope, max_depth);

            if attempts % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages analyzed, {} in frontier, {:.2} pages/sec",
                    self.results.len(),
                    self.frontier.len(),
                    attempts as f64 / elapsed.as_secs_f64()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages analyzed from {} fetch attempts in {:?}",
            self.results.len(),
            attempts,
            start_time.elapsed()
        );

        Ok(self.results)
    }

    /// Pops frontier items until one is due for fetching
    ///
    /// Items already visited or deeper than `max_depth` are discarded. The
    /// returned target is marked visited before it is fetched, so a URL is
    /// attempted at most once even when its fetch fails.
    fn next_target(&mut self, max_depth: u32) -> Option<CrawlTarget> {
        while let Some(target) = self.frontier.pop_front() {
            if target.depth > max_depth {
                tracing::trace!("Discarding {} at depth {}", target.url, target.depth);
                continue;
            }
            if !self.visited.insert(target.url.clone()) {
                tracing::trace!("Already visited {}", target.url);
                continue;
            }
            return Some(target);
        }
        None
    }

    /// Analyzes a fetched page and enqueues its in-scope links
    fn process_page(
        &mut self,
        target: &CrawlTarget,
        html: &str,
        scope: &DomainScope,
        max_depth: u32,
    ) {
        let document = Html::parse_document(html);

        self.results.push(analyze_document(&target.url, &document));

        // Children would be discarded at dequeue anyway
        if target.depth >= max_depth {
            return;
        }

        let current_url = match Url::parse(&target.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Cannot resolve links on {}: {}", target.url, e);
                return;
            }
        };

        let links = extract_links_from_document(&document, &current_url, scope, &self.visited);
        tracing::debug!("Found {} new links on {}", links.len(), target.url);

        for link in links {
            self.frontier.push_back(CrawlTarget {
                url: link,
                depth: target.depth + 1,
            });
        }
    }

    fn page_limit_reached(&self) -> bool {
        self.config
            .max_pages
            .is_some_and(|max_pages| self.results.len() >= max_pages)
    }
}
