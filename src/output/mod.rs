//! Output module for crawl reports
//!
//! This module handles:
//! - Wrapping crawl results in a timestamped report
//! - Writing the report as JSON to a file or stdout
//! - Computing and printing summary statistics

pub mod stats;

pub use stats::{print_statistics, write_statistics, CrawlStatistics};

use crate::crawler::PageAnalysis;
use crate::SeoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Complete result of one crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// The seed URL as given by the caller
    pub seed_url: String,

    /// Depth bound the crawl ran with
    pub max_depth: u32,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Page analyses in breadth-first order
    pub pages: Vec<PageAnalysis>,
}

impl CrawlReport {
    /// Returns the crawl duration in whole seconds
    pub fn duration_seconds(&self) -> u64 {
        (self.finished_at - self.started_at).num_seconds().max(0) as u64
    }
}

/// Writes a report as pretty-printed JSON
///
/// # Arguments
///
/// * `report` - The report to write
/// * `path` - Destination file; `None` writes to stdout
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(SeoError)` - Failed to create the file or serialize the report
pub fn write_report(report: &CrawlReport, path: Option<&Path>) -> Result<(), SeoError> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}
