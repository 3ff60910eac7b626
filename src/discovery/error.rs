use axum::http::StatusCode;
use thiserror::Error;

/// Failures that end a discovery run. Each one maps to exactly one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("Invalid Blog URL")]
    InvalidUrlFormat,
    #[error("Could not retrieve the blog page")]
    UnreachableOrNonOkPage,
    #[error("Blog page is not an HTML document")]
    NonHtmlContentType,
    #[error("No Feed Url Discovered")]
    NoFeedDiscovered,
}

impl DiscoveryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DiscoveryError::InvalidUrlFormat
            | DiscoveryError::UnreachableOrNonOkPage
            | DiscoveryError::NonHtmlContentType => StatusCode::BAD_REQUEST,
            DiscoveryError::NoFeedDiscovered => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DiscoveryError::InvalidUrlFormat => "INVALID_URL_FORMAT",
            DiscoveryError::UnreachableOrNonOkPage => "PAGE_UNAVAILABLE",
            DiscoveryError::NonHtmlContentType => "NON_HTML_CONTENT_TYPE",
            DiscoveryError::NoFeedDiscovered => "NO_FEED_DISCOVERED",
        }
    }
}

/// Transport-level failure raised by a [`PageSource`](super::PageSource).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_redirect() {
            FetchError::TooManyRedirects
        } else {
            FetchError::Request(err.to_string())
        }
    }
}
