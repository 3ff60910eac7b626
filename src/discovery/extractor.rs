//! Feed link extraction from fetched HTML.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use super::{DiscoveryError, FetchedDocument, media};
use crate::config::DiscoveryConfig;

static TYPED_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("link[type]").expect("static selector is valid"));

/// Collects feed hrefs from `<link>` elements, in document order.
#[derive(Debug, Clone)]
pub struct FeedExtractor {
    /// Lowercased media type essences that count as a feed.
    feed_types: Vec<String>,
    resolve_relative_hrefs: bool,
}

impl FeedExtractor {
    pub fn new(config: &DiscoveryConfig) -> Self {
        let feed_types = config
            .feed_types
            .iter()
            .filter_map(|t| media::essence(t))
            .collect();

        Self {
            feed_types,
            resolve_relative_hrefs: config.resolve_relative_hrefs,
        }
    }

    /// Extraction stage. Fails with [`DiscoveryError::NoFeedDiscovered`] when
    /// nothing matches.
    pub fn extract(&self, document: &FetchedDocument) -> Result<Vec<String>, DiscoveryError> {
        let feeds = self.feed_links(document);

        if feeds.is_empty() {
            debug!(url = %document.url, "No feed links in document");
            return Err(DiscoveryError::NoFeedDiscovered);
        }

        Ok(feeds)
    }

    fn feed_links(&self, document: &FetchedDocument) -> Vec<String> {
        let html = Html::parse_document(&document.html);

        html.select(&TYPED_LINKS)
            .filter(|link| {
                link.value()
                    .attr("type")
                    .and_then(media::essence)
                    .is_some_and(|essence| self.feed_types.contains(&essence))
            })
            .filter_map(|link| link.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .map(|href| self.finish_href(document, href))
            .collect()
    }

    fn finish_href(&self, document: &FetchedDocument, href: &str) -> String {
        if !self.resolve_relative_hrefs {
            return href.to_owned();
        }

        document
            .url
            .join(href)
            .map(|resolved| resolved.to_string())
            .unwrap_or_else(|_| href.to_owned())
    }
}

impl Default for FeedExtractor {
    fn default() -> Self {
        Self::new(&DiscoveryConfig::default())
    }
}
