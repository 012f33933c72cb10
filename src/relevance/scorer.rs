use super::{
    Keywords, CONTENT_WEIGHT, FULL_CONTENT_LENGTH, KEYWORD_WEIGHT, LINK_DECAY,
    LINK_KEYWORD_BOOST,
};

/// Scores a fetched page from its extracted text
///
/// The content component is `min(1, chars / 5000)`. Without keywords that is
/// the whole score. With keywords the score is `0.7 * content + 0.3 * coverage`,
/// where coverage is the fraction of keywords that occur in the text.
///
/// The result always lies in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use sitesift::relevance::{score_page, Keywords};
///
/// let text = "x".repeat(10_000);
/// assert_eq!(score_page(&text, &Keywords::none()), 1.0);
/// ```
pub fn score_page(text: &str, keywords: &Keywords) -> f64 {
    let length = text.chars().count() as f64;
    let content = (length / FULL_CONTENT_LENGTH).min(1.0);

    if keywords.is_empty() {
        return content;
    }

    let coverage = (keywords.count_matches(text) as f64 / keywords.len() as f64).min(1.0);
    CONTENT_WEIGHT * content + KEYWORD_WEIGHT * coverage
}

/// Estimates the relevance of a link before it is fetched
///
/// The estimate is the parent page's score decayed by 0.8, plus 0.2 when the
/// anchor text mentions any keyword. The sum is clamped to `1.0` so frontier
/// scores stay in the same range as page scores.
pub fn score_link(parent_score: f64, link_text: &str, keywords: &Keywords) -> f64 {
    let mut estimate = parent_score * LINK_DECAY;
    if keywords.any_match(link_text) {
        estimate += LINK_KEYWORD_BOOST;
    }
    estimate.clamp(0.0, 1.0)
}
