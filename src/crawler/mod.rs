//! Crawler module for page fetching and analysis
//!
//! This module contains the core crawling logic, including:
//! - Page fetching through a headless browser or plain HTTP
//! - SEO signal extraction from rendered HTML
//! - Same-domain link extraction
//! - Breadth-first scheduling with a depth bound

mod analyzer;
mod coordinator;
mod fetcher;
mod links;
mod scheduler;

pub use analyzer::{analyze, analyze_document, PageAnalysis};
pub use coordinator::{crawl, Crawler};
pub use fetcher::{build_http_client, BrowserFetcher, HttpFetcher, PageFetcher};
pub use links::{extract_links, extract_links_from_document};
pub use scheduler::{CrawlTarget, Scheduler};
