use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a hostname into a candidate domain
///
/// The host is lower-cased and a single leading `www.` label is removed, so
/// `WWW.Example.co.uk` and `example.co.uk` compare equal.
///
/// # Examples
///
/// ```
/// use company_scout::url::normalize_domain;
///
/// assert_eq!(normalize_domain("WWW.Example.COM"), "example.com");
/// assert_eq!(normalize_domain("shop.example.com"), "shop.example.com");
/// ```
pub fn normalize_domain(host: &str) -> String {
    let lowered = host.trim().to_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Extracts the normalized domain from a URL
///
/// The port is ignored, only the host participates.
///
/// # Returns
///
/// * `Some(String)` - The normalized domain
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use company_scout::url::domain_of;
///
/// let url = Url::parse("https://www.example.com/path").unwrap();
/// assert_eq!(domain_of(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(domain_of(&url), Some("example.com".to_string()));
/// ```
pub fn domain_of(url: &Url) -> Option<String> {
    url.host_str().map(normalize_domain)
}

/// Parses an absolute HTTP(S) URL and returns it with its normalized domain
pub fn parse_http_url(url_str: &str) -> UrlResult<(Url, String)> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let domain = domain_of(&url).ok_or(UrlError::MissingDomain)?;
    if domain.is_empty() {
        return Err(UrlError::MissingDomain);
    }

    Ok((url, domain))
}
