//! Output module for crawl reports
//!
//! This module handles:
//! - Rendering the ranked page collection as a markdown report
//! - Computing and printing console statistics for a finished crawl

mod markdown;
pub mod stats;

pub use markdown::{default_report_path, format_markdown_report, write_markdown_report};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
