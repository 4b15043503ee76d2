use crate::UrlError;
use url::Url;

/// Reduces a URL to `scheme://host[:port]/path`
///
/// Query string and fragment are dropped. Everything else is kept as the `url`
/// crate serializes it (lowercase host, resolved dot segments, root path `/`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_ripple::url::strip_query_and_fragment;
///
/// let url = Url::parse("https://example.com/page?utm_source=x#top").unwrap();
/// assert_eq!(strip_query_and_fragment(&url).as_str(), "https://example.com/page");
/// ```
pub fn strip_query_and_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}

/// Parses and validates a crawl seed URL
///
/// The seed must be an absolute HTTP(S) URL with a host. Its fragment is
/// dropped; its query string is kept since it is part of the page requested.
///
/// # Arguments
///
/// * `seed` - The seed URL string supplied by the caller
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed URL
/// * `Err(UrlError)` - The seed is malformed, not HTTP(S), or has no host
pub fn parse_seed_url(seed: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}
