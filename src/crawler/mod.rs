//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - HTML text and link extraction
//! - The relevance-ordered frontier
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod frontier;
mod observer;

pub use coordinator::{
    crawl, ContentCollection, Coordinator, CrawlOutcome, CrawlSettings, CrawlState, PageRecord,
    ERROR_TITLE,
};
pub use extract::{extract_links, extract_text, DiscoveredLink, ExtractedText, PageDocument};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry, Offer, REORDER_THRESHOLD, SEED_SCORE};
pub use observer::{CrawlObserver, TracingObserver};
