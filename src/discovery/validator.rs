//! Blog URL syntax check.
//!
//! Only the shape of the URL is checked here: an absolute `http`/`https` URL
//! with a non-empty host. Whether the host resolves is the fetcher's concern.

use url::Url;

use super::DiscoveryError;

/// Validates the user-supplied blog URL.
///
/// `None`, empty and whitespace-only input are rejected the same way as a
/// malformed URL.
///
/// ```
/// use feedfinder::discovery::validate_blog_url;
///
/// assert!(validate_blog_url(Some("https://example.com/blog")).is_ok());
/// assert!(validate_blog_url(Some("example.com")).is_err());
/// assert!(validate_blog_url(None).is_err());
/// ```
pub fn validate_blog_url(raw: Option<&str>) -> Result<Url, DiscoveryError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(DiscoveryError::InvalidUrlFormat)?;

    let url = Url::parse(raw).map_err(|_| DiscoveryError::InvalidUrlFormat)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DiscoveryError::InvalidUrlFormat);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(DiscoveryError::InvalidUrlFormat),
    }
}
