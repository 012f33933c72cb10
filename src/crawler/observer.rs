//! Crawl lifecycle events
//!
//! The coordinator reports what it does through a [`CrawlObserver`] injected at
//! construction. The default [`TracingObserver`] turns events into `tracing`
//! log lines; tests install recording observers instead.

use crate::crawler::{CrawlState, FetchError, PageRecord};
use url::Url;

/// Receives lifecycle and error events from one crawl
///
/// Every method has an empty default so observers only implement what they
/// care about.
pub trait CrawlObserver: Send + Sync {
    /// The crawl is starting from `seed`, confined to `domain`
    fn on_start(&self, _seed: &Url, _domain: &str, _max_pages: usize) {}

    /// A URL is about to be fetched
    fn on_fetch(&self, _url: &Url, _score: f64, _discovered: usize) {}

    /// A page scored high enough to be kept
    fn on_page_kept(&self, _record: &PageRecord, _new_links: usize) {}

    /// A page scored below the discard threshold; its links are not followed
    fn on_page_discarded(&self, _url: &Url, _relevance: f64) {}

    /// A response was not HTML and was skipped
    fn on_skipped(&self, _url: &Url, _content_type: &str) {}

    /// A fetch failed
    fn on_fetch_error(&self, _url: &Url, _error: &FetchError) {}

    /// The crawl ended in `state` with `records` collected pages
    fn on_finish(&self, _state: CrawlState, _records: usize) {}
}

/// Observer that logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_start(&self, seed: &Url, domain: &str, max_pages: usize) {
        tracing::info!(
            "Starting crawl from {} (domain {}) with max_pages={}",
            seed,
            domain,
            max_pages
        );
    }

    fn on_fetch(&self, url: &Url, score: f64, discovered: usize) {
        tracing::info!(
            "Fetching URL: {} (score {:.2}, discovered: {})",
            url,
            score,
            discovered
        );
    }

    fn on_page_kept(&self, record: &PageRecord, new_links: usize) {
        tracing::debug!(
            "Kept {} with relevance {:.2}; found {} new links",
            record.url,
            record.relevance,
            new_links
        );
    }

    fn on_page_discarded(&self, url: &Url, relevance: f64) {
        tracing::debug!(
            "Discarding low-relevance page {} (relevance {:.2})",
            url,
            relevance
        );
    }

    fn on_skipped(&self, url: &Url, content_type: &str) {
        tracing::warn!("Skipping non-HTML content at {} ({})", url, content_type);
    }

    fn on_fetch_error(&self, url: &Url, error: &FetchError) {
        tracing::error!("Failed to fetch {}: {}", url, error);
    }

    fn on_finish(&self, state: CrawlState, records: usize) {
        match state {
            CrawlState::Interrupted => {
                tracing::info!("Crawl interrupted. Keeping {} collected pages", records)
            }
            _ => tracing::info!("Crawl completed. Processed {} pages.", records),
        }
    }
}
