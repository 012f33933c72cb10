use crate::UrlError;
use url::Url;

/// Turns user input into the absolute seed URL of a crawl
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prefix `https://` when the input carries no scheme at all
/// 3. Parse the URL; reject if malformed
/// 4. Reject schemes other than HTTP(S) and URLs without a host
///
/// Nothing else is rewritten: paths, trailing slashes, query strings and
/// fragments are kept exactly as given.
///
/// # Examples
///
/// ```
/// use sitesift::url::normalize_seed;
///
/// let url = normalize_seed("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// let url = normalize_seed("http://example.com/docs?page=2").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/docs?page=2");
/// ```
pub fn normalize_seed(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();
    let lowered = input.to_ascii_lowercase();

    let with_scheme = if lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || input.contains("://")
    {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Resolves an href against the page it was found on
///
/// This is plain relative-to-absolute resolution. An href that cannot be joined
/// yields `None` rather than an error so callers can simply drop it.
///
/// # Examples
///
/// ```
/// use sitesift::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     resolve(&base, "setup").unwrap().as_str(),
///     "https://example.com/docs/setup"
/// );
/// assert_eq!(
///     resolve(&base, "/about/").unwrap().as_str(),
///     "https://example.com/about/"
/// );
/// ```
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}
