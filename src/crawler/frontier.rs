//! Crawl frontier: pending work, visited URLs and the discovery bound
//!
//! The frontier owns three structures:
//! - the pending queue of URLs waiting to be fetched, each with the relevance
//!   estimate it was discovered with
//! - the visited set of URLs already popped and processed
//! - the discovered set of every URL ever enqueued, which bounds crawl size
//!
//! Pending entries are kept in discovery order until the queue grows past
//! [`REORDER_THRESHOLD`]; from then on every pop is preceded by a stable sort on
//! score, so the crawl approximates best-first search over estimated relevance.

use std::collections::{HashMap, HashSet, VecDeque};
use url::Url;

/// Pending-entry count above which the queue is sorted by score before a pop
pub const REORDER_THRESHOLD: usize = 10;

/// Score given to the seed URL
pub const SEED_SCORE: f64 = 1.0;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Relevance estimate assigned when the URL was first discovered
    pub score: f64,
}

/// What happened to an offered URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// First sighting: recorded as discovered and queued
    Queued,
    /// Already discovered but not yet visited: queued again with its first score
    Requeued,
    /// Already visited: ignored
    AlreadyVisited,
    /// New URL refused because the discovery bound is reached
    Saturated,
}

/// Deduplicating, relevance-ordered work queue for one crawl
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched; the front is popped next
    pending: VecDeque<FrontierEntry>,

    /// URLs already processed
    visited: HashSet<String>,

    /// Every URL ever enqueued, mapped to its first-assigned score
    discovered: HashMap<String, f64>,

    /// Discovery bound
    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier seeded with `seed` at score 1.0
    ///
    /// With a `max_pages` of zero the frontier starts empty and saturated.
    pub fn new(seed: Url, max_pages: usize) -> Self {
        let mut frontier = Self {
            pending: VecDeque::new(),
            visited: HashSet::new(),
            discovered: HashMap::new(),
            max_pages,
        };

        // A zero bound admits nothing, not even the seed
        if max_pages > 0 {
            frontier
                .discovered
                .insert(seed.as_str().to_string(), SEED_SCORE);
            frontier.pending.push_back(FrontierEntry {
                url: seed,
                score: SEED_SCORE,
            });
        }

        frontier
    }

    /// Sorts pending entries by score, highest first, once the queue is long
    /// enough
    ///
    /// The sort is stable, so entries with equal scores keep discovery order.
    pub fn reorder(&mut self) {
        if self.pending.len() > REORDER_THRESHOLD {
            self.pending
                .make_contiguous()
                .sort_by(|a, b| b.score.total_cmp(&a.score));
        }
    }

    /// Removes and returns the highest-priority pending entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.reorder();
        self.pending.pop_front()
    }

    /// Offers a discovered URL to the frontier
    ///
    /// The first offer of a URL fixes its score; later offers of the same URL
    /// re-queue it with that first score as long as it has not been visited.
    /// Once the frontier is saturated no new URLs are accepted.
    pub fn offer(&mut self, url: Url, score: f64) -> Offer {
        if let Some(&first_score) = self.discovered.get(url.as_str()) {
            if self.visited.contains(url.as_str()) {
                return Offer::AlreadyVisited;
            }
            self.pending.push_back(FrontierEntry {
                url,
                score: first_score,
            });
            return Offer::Requeued;
        }

        if self.is_saturated() {
            return Offer::Saturated;
        }

        self.discovered.insert(url.as_str().to_string(), score);
        self.pending.push_back(FrontierEntry { url, score });
        Offer::Queued
    }

    /// Returns true once the discovery bound has been reached
    pub fn is_saturated(&self) -> bool {
        self.discovered.len() >= self.max_pages
    }

    /// Records a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// The visited set, for admissibility checks
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// The score a URL was first discovered with
    pub fn score_of(&self, url: &Url) -> Option<f64> {
        self.discovered.get(url.as_str()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn discovered_len(&self) -> usize {
        self.discovered.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}
