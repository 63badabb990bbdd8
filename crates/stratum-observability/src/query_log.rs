//! Query performance logging: query text, latency, result count, tiers queried, stop reason.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stratum_core::models::{RetrievalResponse, StopReason};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub latency: Duration,
    pub result_count: usize,
    pub tiers_queried: usize,
    pub stop_reason: StopReason,
    pub degraded: bool,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Build an entry from a finished call, timestamped now.
    pub fn from_response(query: impl Into<String>, response: &RetrievalResponse) -> Self {
        Self {
            query: query.into(),
            latency: Duration::from_millis(response.elapsed_ms),
            result_count: response.matches.len(),
            tiers_queried: response.tiers_queried(),
            stop_reason: response.stop_reason,
            degraded: response.degraded,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only query log with ring buffer retention.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            tiers_queried = entry.tiers_queried,
            stop_reason = ?entry.stop_reason,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(stratum_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }
}
