use crate::config::DEFAULT_DENIED_PATHS;
use crate::url::crawl_domain;
use std::collections::HashSet;
use url::Url;

/// Why a URL was kept out of the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The URL's authority differs from the crawl domain
    OffDomain,
    /// The URL has already been processed
    AlreadyVisited,
    /// The URL's path contains a denied substring
    DeniedPath(String),
}

/// Decides which discovered URLs may enter the frontier
///
/// The filter is built once per crawl from the target domain and the path
/// denylist and never changes afterwards.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    domain: String,
    denied_paths: Vec<String>,
}

impl UrlFilter {
    /// Creates a filter for `domain` with the given denied path substrings
    ///
    /// Both the domain and the patterns are lowercased here so matching stays
    /// case-insensitive.
    pub fn new<S: AsRef<str>>(domain: &str, denied_paths: &[S]) -> Self {
        Self {
            domain: domain.to_lowercase(),
            denied_paths: denied_paths
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Creates a filter using the built-in denylist
    pub fn with_default_denylist(domain: &str) -> Self {
        Self::new(domain, DEFAULT_DENIED_PATHS)
    }

    /// The domain this filter confines the crawl to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if the URL may be offered to the frontier
    pub fn is_admissible(&self, url: &Url, visited: &HashSet<String>) -> bool {
        self.check(url, visited).is_none()
    }

    /// Returns the first reason the URL is rejected, or `None` if admissible
    ///
    /// Checks run cheapest first: domain, visited set, then the path denylist.
    pub fn check(&self, url: &Url, visited: &HashSet<String>) -> Option<Rejection> {
        if crawl_domain(url).as_deref() != Some(self.domain.as_str()) {
            return Some(Rejection::OffDomain);
        }

        if visited.contains(url.as_str()) {
            return Some(Rejection::AlreadyVisited);
        }

        self.denied_pattern(url.path())
            .map(|pattern| Rejection::DeniedPath(pattern.to_string()))
    }

    /// Finds the first denied substring contained in `path`
    pub fn denied_pattern(&self, path: &str) -> Option<&str> {
        let path = path.to_lowercase();
        self.denied_paths
            .iter()
            .find(|pattern| path.contains(pattern.as_str()))
            .map(String::as_str)
    }
}
