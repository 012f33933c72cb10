//! Console statistics for a finished crawl

use crate::crawler::{CrawlOutcome, CrawlState, PageRecord};
use crate::relevance::DISCARD_THRESHOLD;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of records in the collection
    pub total_records: usize,

    /// Records of successfully fetched pages
    pub pages_kept: usize,

    /// Records of failed fetches
    pub fetch_errors: usize,

    /// Mean relevance over all records (errors count as 0.0)
    pub average_relevance: f64,

    /// Highest relevance in the collection
    pub top_relevance: f64,

    /// Distinct URLs discovered, including the seed
    pub pages_discovered: usize,

    /// URLs popped from the frontier and processed
    pub pages_visited: usize,

    /// How the crawl ended
    pub state: CrawlState,
}

impl CrawlStatistics {
    /// Computes statistics over a page collection alone
    ///
    /// Frontier counters are unknown here and are reported as the record count.
    pub fn from_collection(records: &[PageRecord]) -> Self {
        let fetch_errors = records.iter().filter(|r| r.fetch_failed).count();
        let total_records = records.len();

        let average_relevance = if total_records > 0 {
            records.iter().map(|r| r.relevance).sum::<f64>() / total_records as f64
        } else {
            0.0
        };

        let top_relevance = records
            .iter()
            .map(|r| r.relevance)
            .fold(0.0_f64, f64::max);

        Self {
            total_records,
            pages_kept: total_records - fetch_errors,
            fetch_errors,
            average_relevance,
            top_relevance,
            pages_discovered: total_records,
            pages_visited: total_records,
            state: CrawlState::Completed,
        }
    }

    /// Computes statistics for a crawl outcome
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        Self {
            pages_discovered: outcome.pages_discovered,
            pages_visited: outcome.pages_visited,
            state: outcome.state,
            ..Self::from_collection(&outcome.records)
        }
    }

    /// Visited URLs that left no record: discarded or non-HTML pages
    pub fn pages_dropped(&self) -> usize {
        self.pages_visited.saturating_sub(self.total_records)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Status: {}", stats.state);
    println!("  Pages discovered: {}", stats.pages_discovered);
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Pages collected: {}", stats.total_records);
    println!();

    println!("Collection:");
    println!("  Kept pages: {}", stats.pages_kept);
    println!("  Fetch errors: {}", stats.fetch_errors);
    println!(
        "  Dropped (relevance < {} or non-HTML): {}",
        DISCARD_THRESHOLD,
        stats.pages_dropped()
    );
    println!();

    println!(
        "Relevance: average {:.2}, top {:.2}",
        stats.average_relevance, stats.top_relevance
    );
}
