use crate::UrlError;
use url::Url;

/// Normalizes a URL into the canonical form used for dedup identity
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject non-HTTP(S) schemes
/// 3. Reject URLs without a host (the host itself is lowercased by the
///    parser)
/// 4. Remove the fragment (everything after #)
/// 5. Remove an empty query string (trailing ?)
/// 6. Remove trailing slashes from the path (except for the root /)
///
/// # Examples
///
/// ```
/// use sitesweep::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/page/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    Ok(url)
}

/// Returns true when two URLs point at the same site
///
/// Host and port are compared, so two servers on the same address but
/// different ports count as different sites.
pub fn same_site(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
