use serde::Deserialize;

/// Paths that never carry page content worth ranking
pub const DEFAULT_DENIED_PATHS: &[&str] = &[
    "/changelog",
    "/updates",
    "/archive",
    "/log",
    "/privacy",
    "/terms",
    "/sitemap",
    "/feed",
    "/wp-content",
    "/wp-includes",
    "/tag/",
    "/category/",
    "/author/",
    "/comment",
    "/trackback",
    "/rss",
];

/// Main configuration structure for SiteSift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub relevance: RelevanceConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Discovery bound: no new URLs are accepted once this many are known
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Fixed delay after each fetch (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Path substrings that make a URL inadmissible (matched case-insensitively)
    #[serde(rename = "denied-paths", default = "default_denied_paths")]
    pub denied_paths: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            denied_paths: default_denied_paths(),
        }
    }
}

/// Topical keywords used to rank pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelevanceConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown report; derived from the domain when unset
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_max_pages() -> usize {
    1000
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_denied_paths() -> Vec<String> {
    DEFAULT_DENIED_PATHS.iter().map(|p| p.to_string()).collect()
}

fn default_crawler_name() -> String {
    "SiteSift".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
