//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification into transport, timeout and status failures
//!
//! Fetching sits behind the [`Fetcher`] trait so the crawl coordinator can be run
//! against scripted responses in tests.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Response body; left empty for non-HTML responses
    pub body: String,
}

impl FetchedPage {
    /// Returns true if the response declares HTML content
    pub fn is_html(&self) -> bool {
        is_html_content_type(&self.content_type)
    }
}

/// Why a fetch failed
///
/// Each variant carries a human-readable cause that ends up in the error
/// record of the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{message}")]
    Status { status_code: u16, message: String },

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                status_code: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Retrieves pages for the crawl coordinator
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`
    ///
    /// Any non-2xx status or transport failure is returned as a `FetchError`.
    /// Non-HTML responses are returned as successes; the caller decides what
    /// to do with them.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Skip downloading bodies that will never be parsed
        let body = if is_html_content_type(&content_type) {
            response.text().await?
        } else {
            String::new()
        };

        Ok(FetchedPage {
            final_url,
            content_type,
            body,
        })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitesift::config::Config;
/// use sitesift::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!(
        "{}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}
