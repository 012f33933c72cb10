//! HTML text and link extraction
//!
//! This module turns a fetched HTML document into:
//! - a title and a single line of visible text, used for relevance scoring and
//!   for the report
//! - the outbound links of the page with their anchor text, used to refill the
//!   frontier

use crate::url::resolve;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text never counts as page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Title and visible text of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// The page title, or the page URL when the document has none
    pub title: String,

    /// Visible text with all whitespace runs collapsed to single spaces
    pub text: String,
}

/// A link found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// The absolute link target
    pub url: Url,

    /// The anchor text, whitespace-collapsed
    pub text: String,
}

/// A parsed HTML document
///
/// Parse once, then pull text and links from the same tree.
pub struct PageDocument {
    document: Html,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Extracts the title and visible text
    ///
    /// Text inside `<script>` and `<style>` is dropped. The title falls back to
    /// `url` when there is no non-empty `<title>` element.
    pub fn text(&self, url: &Url) -> ExtractedText {
        let title = self.title().unwrap_or_else(|| url.to_string());

        let chunks = self
            .document
            .root_element()
            .descendants()
            .filter_map(|node| node.value().as_text().map(|text| (node, text)))
            .filter(|(node, _)| {
                !node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .map_or(false, |el| NON_CONTENT_ELEMENTS.contains(&el.name()))
                })
            })
            .map(|(_, text)| &**text);

        ExtractedText {
            title,
            text: collapse_whitespace(chunks),
        }
    }

    /// Extracts all followable links, resolved against `base_url`
    ///
    /// # Link Extraction Rules
    ///
    /// **Include:**
    /// - `<a href="...">` anywhere in the document
    ///
    /// **Exclude:**
    /// - `<a href="..." download>`
    /// - `javascript:`, `mailto:`, `tel:` links and data URIs
    /// - fragment-only links (same-page anchors)
    /// - anything that does not resolve to an HTTP(S) URL
    pub fn links(&self, base_url: &Url) -> Vec<DiscoveredLink> {
        let mut links = Vec::new();

        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in self.document.select(&a_selector) {
                if element.value().attr("download").is_some() {
                    continue;
                }

                if let Some(href) = element.value().attr("href") {
                    if let Some(url) = resolve_link(href, base_url) {
                        links.push(DiscoveredLink {
                            url,
                            text: anchor_text(element),
                        });
                    }
                }
            }
        }

        links
    }

    fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.document
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Extracts the title and visible text of an HTML document
///
/// # Example
///
/// ```
/// use sitesift::crawler::extract_text;
/// use url::Url;
///
/// let html = r#"<html><head><title>Docs</title><style>p {}</style></head>
///     <body><p>Hello
///     world</p><script>var x;</script></body></html>"#;
/// let url = Url::parse("https://example.com/").unwrap();
/// let page = extract_text(html, &url);
/// assert_eq!(page.title, "Docs");
/// assert_eq!(page.text, "Docs Hello world");
/// ```
pub fn extract_text(html: &str, url: &Url) -> ExtractedText {
    PageDocument::parse(html).text(url)
}

/// Extracts the outbound links of an HTML document
pub fn extract_links(html: &str, base_url: &Url) -> Vec<DiscoveredLink> {
    PageDocument::parse(html).links(base_url)
}

/// Resolves an href to an absolute HTTP(S) URL, or `None` if it should be skipped
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    resolve(base_url, href).filter(|url| url.scheme() == "http" || url.scheme() == "https")
}

fn anchor_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(element.text())
}

/// Joins text chunks and collapses every whitespace run to one space
fn collapse_whitespace<'a>(chunks: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in chunks.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
