use url::Url;

/// Extracts the crawl domain from a URL
///
/// The crawl domain is the URL's authority: the lowercase host, followed by
/// `:port` when the URL names a port other than its scheme's default. Two URLs
/// belong to the same crawl only if their crawl domains are equal; subdomains
/// are distinct domains.
///
/// # Returns
///
/// * `Some(String)` - The authority of the URL
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitesift::url::crawl_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(crawl_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(crawl_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn crawl_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
