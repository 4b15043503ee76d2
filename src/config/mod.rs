//! Configuration module for SEO-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; an absent file means all defaults.
//!
//! # Example
//!
//! ```no_run
//! use seo_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-ripple.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, CrawlerConfig, FetcherKind, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
