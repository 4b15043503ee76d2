//! SEO-Ripple main entry point
//!
//! This is the command-line interface for the SEO-Ripple crawler.

use chrono::Utc;
use clap::Parser;
use seo_ripple::config::{load_config, validate, Config, FetcherKind};
use seo_ripple::output::{print_statistics, write_report, CrawlReport, CrawlStatistics};
use seo_ripple::{Crawler, ScopeMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SEO-Ripple: a breadth-first SEO crawler
///
/// SEO-Ripple renders every page of a site reachable from the seed URL
/// within the depth bound and reports its title, meta tags, headings,
/// image alt texts and word count as JSON.
#[derive(Parser, Debug)]
#[command(name = "seo-ripple")]
#[command(version)]
#[command(about = "A breadth-first SEO crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum link distance from the seed
    #[arg(short, long)]
    depth: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many pages have been analyzed
    #[arg(long)]
    max_pages: Option<usize>,

    /// Fetch raw HTML over HTTP instead of rendering in a browser
    #[arg(long = "static")]
    static_fetch: bool,

    /// How links are matched against the seed domain
    #[arg(long, value_enum)]
    scope: Option<ScopeMode>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print summary statistics after the crawl
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let max_depth = cli.depth.unwrap_or(config.crawler.max_depth);
    tracing::info!(
        "Crawling {} (max depth {}, {:?} fetcher)",
        cli.url,
        max_depth,
        config.crawler.fetcher
    );

    let crawler = Crawler::new(config);
    let started_at = Utc::now();
    let pages = match crawler.crawl(&cli.url, max_depth).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let report = CrawlReport {
        seed_url: cli.url.clone(),
        max_depth,
        started_at,
        finished_at: Utc::now(),
        pages,
    };
    tracing::info!(
        "Crawl completed: {} pages in {}s",
        report.pages.len(),
        report.duration_seconds()
    );

    write_report(&report, cli.output.as_deref())?;
    if let Some(path) = &cli.output {
        tracing::info!("Report written to: {}", path.display());
    }

    if cli.stats {
        print_statistics(&CrawlStatistics::from_pages(&report.pages));
    }

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, seo_ripple::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }
    if let Some(scope) = cli.scope {
        config.crawler.scope = scope;
    }
    if cli.static_fetch {
        config.crawler.fetcher = FetcherKind::Http;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the JSON report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_ripple=info,warn"),
            1 => EnvFilter::new("seo_ripple=debug,info"),
            2 => EnvFilter::new("seo_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
