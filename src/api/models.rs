//! Wire types for the discovery endpoint.
//!
//! `POST /` takes a [`DiscoverRequest`]:
//!
//! ```json
//! { "blogUrl": "https://test321.blogspot.com/" }
//! ```
//!
//! and answers `200 OK` with a [`DiscoverResponse`]:
//!
//! ```json
//! {
//!   "feedUrls": [
//!     "https://test321.blogspot.com/feeds/posts/default/-/open-source",
//!     "https://test321.blogspot.com/feeds/posts/default/-/open-source?alt=rss"
//!   ]
//! }
//! ```
//!
//! Failures are rendered as a small HTML page, see [`ApiError`](super::ApiError).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::MetricsSnapshot;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct DiscoverRequest {
    /// Kept as raw JSON so a number or `null` is reported as an invalid URL
    /// rather than a malformed body.
    #[serde(rename = "blogUrl", default)]
    pub blog_url: Option<Value>,
}

impl DiscoverRequest {
    pub fn blog_url(&self) -> Option<&str> {
        self.blog_url.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiscoverResponse {
    #[serde(rename = "feedUrls")]
    pub feed_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub metrics: MetricsSnapshot,
}
