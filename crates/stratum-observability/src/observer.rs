//! [`RetrievalObserver`]: shared sink for metrics and the query log.
//!
//! Retrieval calls run concurrently, so both subsystems sit behind mutexes.
//! Critical sections are a few field updates long.

use std::sync::Mutex;

use stratum_core::config::ObservabilityConfig;
use stratum_core::models::RetrievalResponse;

use crate::metrics::RetrievalMetrics;
use crate::query_log::{QueryLog, QueryLogEntry};

#[derive(Debug)]
pub struct RetrievalObserver {
    metrics: Mutex<RetrievalMetrics>,
    query_log: Mutex<QueryLog>,
}

impl RetrievalObserver {
    pub fn new(config: &ObservabilityConfig) -> Self {
        Self {
            metrics: Mutex::new(RetrievalMetrics::new()),
            query_log: Mutex::new(QueryLog::with_capacity(config.query_log_capacity)),
        }
    }

    /// Record a successful retrieval call.
    pub fn observe(&self, query: &str, response: &RetrievalResponse) {
        if let Ok(mut metrics) = self.metrics.lock() {
            metrics.record(response);
        }
        if let Ok(mut log) = self.query_log.lock() {
            log.record(QueryLogEntry::from_response(query, response));
        }
    }

    /// Record a retrieval call that returned an error.
    pub fn observe_failure(&self) {
        if let Ok(mut metrics) = self.metrics.lock() {
            metrics.record_failure();
        }
    }

    /// Copy of the current metrics.
    pub fn metrics(&self) -> RetrievalMetrics {
        self.metrics
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Copy of the logged entries, oldest first.
    pub fn query_log(&self) -> Vec<QueryLogEntry> {
        self.query_log
            .lock()
            .map(|log| log.entries().to_vec())
            .unwrap_or_default()
    }
}

impl Default for RetrievalObserver {
    fn default() -> Self {
        Self::new(&ObservabilityConfig::default())
    }
}
