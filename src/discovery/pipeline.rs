use std::sync::Arc;

use tracing::debug;

use super::{DiscoveryError, FeedExtractor, PageSource, fetch_page, validate_blog_url};

/// Runs validate, fetch and extract in order, stopping at the first failure.
#[derive(Clone)]
pub struct Discoverer {
    source: Arc<dyn PageSource>,
    extractor: FeedExtractor,
}

impl Discoverer {
    pub fn new(source: Arc<dyn PageSource>, extractor: FeedExtractor) -> Self {
        Self { source, extractor }
    }

    pub async fn discover(&self, blog_url: Option<&str>) -> Result<Vec<String>, DiscoveryError> {
        let url = validate_blog_url(blog_url)?;
        debug!(stage = "url_validated", url = %url, "Blog URL accepted");

        let document = fetch_page(self.source.as_ref(), &url).await?;
        debug!(stage = "page_fetched", url = %url, bytes = document.html.len(), "Blog page fetched");

        let feeds = self.extractor.extract(&document)?;
        debug!(stage = "feeds_extracted", url = %url, feeds = feeds.len(), "Feed links extracted");

        Ok(feeds)
    }
}
