//! URL handling module for SiteSift
//!
//! This module provides seed normalization, relative link resolution, crawl
//! domain extraction and the admissibility filter that keeps the crawl on one
//! site and away from boilerplate sections.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::crawl_domain;
pub use filter::{Rejection, UrlFilter};
pub use normalize::{normalize_seed, resolve};
