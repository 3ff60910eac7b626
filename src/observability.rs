//! Process-wide discovery counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording discovery outcomes
#[derive(Debug, Default)]
pub struct Metrics {
    requests: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    feeds_found: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_received(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests", "Metric incremented");
    }

    pub fn discovery_succeeded(&self, feeds: usize) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.feeds_found.fetch_add(feeds as u64, Ordering::Relaxed);
        tracing::debug!(counter = "succeeded", feeds, "Metric incremented");
    }

    pub fn discovery_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            feeds_found: self.feeds_found.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub feeds_found: u64,
}
