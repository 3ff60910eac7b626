use std::sync::Arc;

use crate::config::Config;
use crate::discovery::{Discoverer, FeedExtractor, FetchError, HttpPageSource, PageSource};
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub discoverer: Discoverer,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// State with a caller-supplied page source, used directly by tests.
    pub fn new(config: Config, source: Arc<dyn PageSource>) -> Self {
        let extractor = FeedExtractor::new(&config.discovery);

        Self {
            config: Arc::new(config),
            discoverer: Discoverer::new(source, extractor),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// State that fetches blog pages over HTTP.
    pub fn from_config(config: Config) -> Result<Self, FetchError> {
        let source = HttpPageSource::new(&config.fetch)?;
        Ok(Self::new(config, Arc::new(source)))
    }
}
