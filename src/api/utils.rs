//! API utility functions
//!
//! Stateless helpers for request processing, kept apart from the handlers so
//! they can be unit tested directly.

use crate::discovery::media;

/// Returns true when the request declared a JSON body
///
/// Accepts `application/json`, with or without parameters.
/// A missing header or any other media type returns false.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| media::matches(value, "application/json"))
}
