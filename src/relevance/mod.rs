//! Relevance scoring for pages and links
//!
//! Pages are scored after they are fetched, from the length of their text and
//! how many of the topical keywords they mention. Links are scored before they
//! are fetched, from the score of the page that links to them and the link's
//! anchor text. The link estimate only orders the frontier; every page gets a
//! full score once it is actually fetched.

mod keywords;
mod scorer;

pub use keywords::Keywords;
pub use scorer::{score_link, score_page};

/// Text length (in characters) at which the content component saturates
pub const FULL_CONTENT_LENGTH: f64 = 5000.0;

/// Weight of the content-length component when keywords are configured
pub const CONTENT_WEIGHT: f64 = 0.7;

/// Weight of the keyword component when keywords are configured
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Fraction of a page's score inherited by the links it contains
pub const LINK_DECAY: f64 = 0.8;

/// Flat bonus for a link whose anchor text mentions a keyword
pub const LINK_KEYWORD_BOOST: f64 = 0.2;

/// Pages scoring below this are discarded and their links are not followed
pub const DISCARD_THRESHOLD: f64 = 0.2;
