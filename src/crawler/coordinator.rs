//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Popping the most promising URL from the frontier
//! - Delegating the fetch to a [`Fetcher`]
//! - Extracting and scoring page text, discarding low-relevance pages
//! - Scoring and offering outbound links back to the frontier
//! - Politeness delays and cooperative interruption
//! - Ranking the collected pages

use crate::config::Config;
use crate::crawler::extract::PageDocument;
use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher, HttpFetcher};
use crate::crawler::frontier::{Frontier, Offer};
use crate::crawler::observer::{CrawlObserver, TracingObserver};
use crate::relevance::{score_link, score_page, Keywords, DISCARD_THRESHOLD};
use crate::url::{crawl_domain, UrlFilter};
use crate::{SiftError, UrlError};
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Title given to records of failed fetches
pub const ERROR_TITLE: &str = "Error";

/// Lifecycle of one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Created, not started
    Idle,
    /// The crawl loop is running
    Running,
    /// The frontier drained
    Completed,
    /// Stopped early by an interruption signal
    Interrupted,
}

impl CrawlState {
    /// Returns true if the crawl has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Interrupted)
    }

    /// Returns true if moving from this state to `next` is allowed
    ///
    /// Valid transitions: Idle -> Running -> {Completed, Interrupted}
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Interrupted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One processed page in the crawl output
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// The URL that was popped from the frontier
    pub url: Url,

    /// Page title, or "Error" for failed fetches
    pub title: String,

    /// Visible page text, or a description of the failure
    pub text: String,

    /// Relevance in `[0, 1]`; always 0.0 for failed fetches
    pub relevance: f64,

    /// True if this record describes a failed fetch
    pub fetch_failed: bool,
}

impl PageRecord {
    /// Builds the record of a failed fetch
    pub fn failed(url: Url, error: &FetchError) -> Self {
        Self {
            url,
            title: ERROR_TITLE.to_string(),
            text: format!("Failed to fetch content - {}", error),
            relevance: 0.0,
            fetch_failed: true,
        }
    }
}

/// All page records of a crawl, ranked by relevance
pub type ContentCollection = Vec<PageRecord>;

/// Result of a crawl: how it ended and what it collected
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Completed or Interrupted
    pub state: CrawlState,

    /// The domain the crawl was confined to
    pub domain: String,

    /// Collected pages, sorted by relevance descending
    pub records: ContentCollection,

    /// Number of distinct URLs discovered (including the seed)
    pub pages_discovered: usize,

    /// Number of URLs popped and processed
    pub pages_visited: usize,
}

impl CrawlOutcome {
    pub fn is_interrupted(&self) -> bool {
        self.state == CrawlState::Interrupted
    }

    /// Number of records describing failed fetches
    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.fetch_failed).count()
    }
}

/// Knobs of one crawl, fixed for its whole duration
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Discovery bound
    pub max_pages: usize,

    /// Topical keywords
    pub keywords: Keywords,

    /// Delay after every fetch
    pub request_delay: Duration,

    /// Path substrings that keep a URL out of the frontier
    pub denied_paths: Vec<String>,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_pages: config.crawler.max_pages,
            keywords: Keywords::new(&config.relevance.keywords),
            request_delay: Duration::from_millis(config.crawler.request_delay_ms),
            denied_paths: config.crawler.denied_paths.clone(),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Main crawler coordinator structure
///
/// A coordinator runs exactly one crawl; its state moves from `Idle` to
/// `Running` and ends in `Completed` or `Interrupted`.
pub struct Coordinator<F: Fetcher> {
    fetcher: F,
    settings: CrawlSettings,
    observer: Box<dyn CrawlObserver>,
    state: CrawlState,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a coordinator that logs through `tracing`
    pub fn new(fetcher: F, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            settings,
            observer: Box::new(TracingObserver),
            state: CrawlState::Idle,
        }
    }

    /// Replaces the observer that receives crawl events
    pub fn with_observer(mut self, observer: impl CrawlObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Crawls the site of `seed`
    ///
    /// The crawl is confined to the seed's domain (host, plus port when one is
    /// given explicitly).
    pub async fn run(
        &mut self,
        seed: &Url,
        cancel: &CancellationToken,
    ) -> Result<CrawlOutcome, SiftError> {
        let domain = crawl_domain(seed).ok_or(UrlError::MissingDomain)?;
        self.run_within(seed, &domain, cancel).await
    }

    /// Crawls from `seed`, admitting only URLs on `domain`
    ///
    /// This is the core crawl loop:
    /// 1. Stop if interrupted
    /// 2. Pop the most promising URL; skip it if already visited
    /// 3. Fetch it
    ///    - non-HTML responses are skipped without a record
    ///    - failed fetches become zero-relevance error records
    ///    - pages scoring below the discard threshold are dropped and their
    ///      links are not followed
    ///    - kept pages are recorded and their admissible links offered to
    ///      the frontier with a propagated score
    /// 4. Wait the politeness delay
    ///
    /// Pages already collected are returned even when the crawl is
    /// interrupted; the outcome's state tells the caller which happened.
    pub async fn run_within(
        &mut self,
        seed: &Url,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<CrawlOutcome, SiftError> {
        self.transition(CrawlState::Running)?;

        let filter = UrlFilter::new(domain, &self.settings.denied_paths);
        let mut frontier = Frontier::new(seed.clone(), self.settings.max_pages);
        let mut records = ContentCollection::new();

        self.observer
            .on_start(seed, filter.domain(), self.settings.max_pages);

        let final_state = loop {
            if cancel.is_cancelled() {
                break CrawlState::Interrupted;
            }

            let Some(entry) = frontier.pop() else {
                break CrawlState::Completed;
            };

            if !frontier.mark_visited(&entry.url) {
                tracing::debug!("Skipping already visited URL: {}", entry.url);
                continue;
            }

            self.observer
                .on_fetch(&entry.url, entry.score, frontier.discovered_len());

            match self.fetcher.fetch(&entry.url).await {
                Ok(page) if !page.is_html() => {
                    self.observer.on_skipped(&entry.url, &page.content_type);
                }
                Ok(page) => {
                    if let Some(record) = self.process_page(&entry.url, &page, &filter, &mut frontier)
                    {
                        records.push(record);
                    }
                }
                Err(error) => {
                    self.observer.on_fetch_error(&entry.url, &error);
                    records.push(PageRecord::failed(entry.url, &error));
                }
            }

            self.pause(cancel).await;
        };

        // Stable sort keeps crawl order among equal scores
        records.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

        self.transition(final_state)?;
        self.observer.on_finish(final_state, records.len());

        Ok(CrawlOutcome {
            state: final_state,
            domain: filter.domain().to_string(),
            records,
            pages_discovered: frontier.discovered_len(),
            pages_visited: frontier.visited_len(),
        })
    }

    /// Scores a fetched HTML page and, if it is kept, refills the frontier
    /// from its links
    fn process_page(
        &self,
        url: &Url,
        page: &FetchedPage,
        filter: &UrlFilter,
        frontier: &mut Frontier,
    ) -> Option<PageRecord> {
        let keywords = &self.settings.keywords;
        let document = PageDocument::parse(&page.body);
        let extracted = document.text(url);
        let relevance = score_page(&extracted.text, keywords);

        if relevance < DISCARD_THRESHOLD {
            self.observer.on_page_discarded(url, relevance);
            return None;
        }

        if page.final_url != *url {
            tracing::debug!("{} redirected to {}", url, page.final_url);
        }

        // Links resolve against the requested URL so an apex-to-www redirect
        // does not push every link off the crawl domain
        let mut new_links = 0;
        for link in document.links(url) {
            if let Some(rejection) = filter.check(&link.url, frontier.visited()) {
                tracing::trace!("Not offering {}: {:?}", link.url, rejection);
                continue;
            }

            let score = score_link(relevance, &link.text, keywords);
            match frontier.offer(link.url, score) {
                Offer::Queued => new_links += 1,
                Offer::Saturated => {
                    tracing::trace!("Frontier saturated, dropping new link from {}", url);
                }
                Offer::Requeued | Offer::AlreadyVisited => {}
            }
        }

        let record = PageRecord {
            url: url.clone(),
            title: extracted.title,
            text: extracted.text,
            relevance,
            fetch_failed: false,
        };
        self.observer.on_page_kept(&record, new_links);
        Some(record)
    }

    /// Waits the politeness delay, returning early if the crawl is interrupted
    async fn pause(&self, cancel: &CancellationToken) {
        if self.settings.request_delay.is_zero() {
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.settings.request_delay) => {}
            _ = cancel.cancelled() => {}
        }
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), SiftError> {
        if !self.state.can_transition_to(next) {
            return Err(SiftError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use sitesift::config::Config;
/// use sitesift::crawler::crawl;
/// use sitesift::url::normalize_seed;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let seed = normalize_seed("example.com")?;
/// let outcome = crawl(&config, &seed, &CancellationToken::new()).await?;
/// println!("Collected {} pages", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    seed: &Url,
    cancel: &CancellationToken,
) -> Result<CrawlOutcome, SiftError> {
    let fetcher = HttpFetcher::new(config)?;
    let mut coordinator = Coordinator::new(fetcher, CrawlSettings::from_config(config));
    coordinator.run(seed, cancel).await
}
