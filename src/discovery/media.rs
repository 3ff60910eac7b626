//! Media type helpers
//!
//! Pure functions shared by the fetch and extraction stages. Parameters such
//! as `charset` never take part in a comparison.

/// Parses a media type and returns its lowercased `type/subtype` essence.
///
/// Returns `None` for malformed input.
pub fn essence(media_type: &str) -> Option<String> {
    let parsed: mime::Mime = media_type.trim().parse().ok()?;
    Some(parsed.essence_str().to_ascii_lowercase())
}

/// Returns true when `media_type` has the same essence as `expected`
///
/// Accepts for `text/html`:
/// - `text/html`
/// - `text/html; charset=utf-8`
/// - `TEXT/HTML`
///
/// Rejects:
/// - `text/xml`
/// - `application/xhtml+xml`
/// - Malformed media types
pub fn matches(media_type: &str, expected: &str) -> bool {
    essence(media_type).is_some_and(|found| found.eq_ignore_ascii_case(expected))
}
