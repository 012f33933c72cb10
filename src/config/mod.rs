//! Configuration module for SiteSift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file means the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use sitesift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesift.toml")).unwrap();
//! println!("Crawler will stop discovering after {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, RelevanceConfig, UserAgentConfig, DEFAULT_DENIED_PATHS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
