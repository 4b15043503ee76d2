use url::{Host, Url};

/// Extracts the registrable domain of a URL's host
///
/// The registrable domain is the part of the hostname directly under its public
/// suffix, so `www.example.com` and `blog.example.com` both yield `example.com`
/// and `shop.example.co.uk` yields `example.co.uk`.
///
/// Private suffixes from the public suffix list count as suffixes too, so
/// `foo.github.io` yields `foo.github.io` rather than `github.io`.
///
/// Hosts that have no registrable domain fall back to the full lowercase host:
/// IP addresses, single-label names such as `localhost`, and bare public
/// suffixes. This keeps crawls of local servers scoped to their own host.
///
/// # Arguments
///
/// * `url` - The URL to extract the registrable domain from
///
/// # Returns
///
/// * `Some(String)` - The registrable domain (or host fallback)
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_ripple::url::registrable_domain;
///
/// let url = Url::parse("https://www.example.com/path").unwrap();
/// assert_eq!(registrable_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://blog.example.co.uk/").unwrap();
/// assert_eq!(registrable_domain(&url), Some("example.co.uk".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(registrable_domain(&url), Some("127.0.0.1".to_string()));
/// ```
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(host) => {
            let host = host.trim_end_matches('.').to_lowercase();
            let domain = psl::domain_str(&host).unwrap_or(&host).to_string();
            Some(domain)
        }
        Host::Ipv4(_) | Host::Ipv6(_) => url.host_str().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_of(url: &str) -> Option<String> {
        registrable_domain(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_bare_domain() {
        assert_eq!(domain_of("https://example.com/"), Some("example.com".to_string()));
    }

    #[test]
    fn test_strips_subdomains() {
        assert_eq!(
            domain_of("https://www.example.com/"),
            Some("example.com".to_string())
        );
        assert_eq!(
            domain_of("https://api.v2.example.com/endpoint"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_private_suffix_keeps_owner_label() {
        assert_eq!(
            domain_of("https://blog.foo.github.io/"),
            Some("foo.github.io".to_string())
        );
    }

    #[test]
    fn test_multi_label_public_suffix() {
        assert_eq!(
            domain_of("https://shop.example.co.uk/cart"),
            Some("example.co.uk".to_string())
        );
    }

    #[test]
    fn test_uppercase_host() {
        assert_eq!(
            domain_of("https://WWW.Example.COM/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_port_is_ignored() {
        assert_eq!(
            domain_of("https://www.example.com:8443/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_ipv4_host_falls_back_to_host() {
        assert_eq!(
            domain_of("http://127.0.0.1:4000/page"),
            Some("127.0.0.1".to_string())
        );
    }

    #[test]
    fn test_ipv6_host_keeps_brackets() {
        assert_eq!(domain_of("http://[::1]:4000/"), Some("[::1]".to_string()));
    }

    #[test]
    fn test_localhost_falls_back_to_host() {
        assert_eq!(
            domain_of("http://localhost:3000/"),
            Some("localhost".to_string())
        );
    }

    #[test]
    fn test_no_host() {
        assert_eq!(domain_of("mailto:someone@example.com"), None);
    }
}
