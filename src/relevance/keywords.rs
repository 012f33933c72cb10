/// The topical keywords of a crawl
///
/// Keywords are trimmed and lowercased once at construction; matching against
/// them is a case-insensitive substring test. The list is immutable for the
/// lifetime of a crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    terms: Vec<String>,
}

impl Keywords {
    /// Builds a keyword list, dropping blank entries
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// An empty keyword list; scoring then depends on content length alone
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Counts how many keywords occur in `text`
    pub fn count_matches(&self, text: &str) -> usize {
        let text = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .count()
    }

    /// Returns true if any keyword occurs in `text`
    pub fn any_match(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.terms.iter().any(|term| text.contains(term.as_str()))
    }
}
