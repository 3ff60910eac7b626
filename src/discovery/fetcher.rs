//! Outbound page fetch

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{DiscoveryError, FetchError, media};
use crate::config::FetchConfig;

const HTML: &str = "text/html";

/// Response of a single GET, before any status or content-type policy is applied.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL after redirects.
    pub url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    /// Empty unless the status is `200 OK` and the content type is `text/html`.
    pub body: String,
}

/// The HTML handed to the extraction stage.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: Url,
    pub content_type: String,
    pub html: String,
}

/// Performs the outbound GET for a blog page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawPage, FetchError>;
}

/// Fetch stage: one GET, then status and content-type checks. No retry.
pub async fn fetch_page(
    source: &dyn PageSource,
    url: &Url,
) -> Result<FetchedDocument, DiscoveryError> {
    let page = source.get(url).await.map_err(|err| {
        warn!(url = %url, error = %err, "Blog page request failed");
        DiscoveryError::UnreachableOrNonOkPage
    })?;

    if page.status != StatusCode::OK {
        warn!(url = %url, status = page.status.as_u16(), "Blog page returned non-OK status");
        return Err(DiscoveryError::UnreachableOrNonOkPage);
    }

    let content_type = page
        .content_type
        .filter(|value| media::matches(value, HTML))
        .ok_or_else(|| {
            debug!(url = %url, "Blog page is not text/html");
            DiscoveryError::NonHtmlContentType
        })?;

    Ok(FetchedDocument {
        url: page.url,
        content_type,
        html: page.body,
    })
}

/// [`PageSource`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    max_page_bytes: u64,
}

impl HttpPageSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            max_page_bytes: config.max_page_bytes.as_u64(),
        })
    }

    /// Reads the body chunk by chunk, giving up once it passes the size limit.
    async fn read_body(&self, mut response: reqwest::Response) -> Result<String, FetchError> {
        let limit = self.max_page_bytes;

        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::BodyTooLarge { limit });
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (bytes.len() + chunk.len()) as u64 > limit {
                return Err(FetchError::BodyTooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get(&self, url: &Url) -> Result<RawPage, FetchError> {
        debug!(url = %url, "Fetching blog page");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let is_html = content_type
            .as_deref()
            .is_some_and(|value| media::matches(value, HTML));

        // Pages that fetch_page will reject are never downloaded
        let body = if status == StatusCode::OK && is_html {
            self.read_body(response).await?
        } else {
            String::new()
        };

        debug!(url = %url, status = status.as_u16(), size = body.len(), "Blog page fetched");

        Ok(RawPage {
            url: final_url,
            status,
            content_type,
            body,
        })
    }
}
