//! Retrieval effectiveness: early stops, tiers consulted, replacements, degraded calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stratum_core::models::{RetrievalResponse, StopReason};

/// Tracks aggregate retrieval metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    /// Total retrieval calls recorded.
    pub queries: u64,
    /// Calls that returned at least one match.
    pub hits: u64,
    /// Calls per stop reason.
    pub stops_by_reason: HashMap<String, u64>,
    /// Sum of tiers queried across all calls.
    pub total_tiers_queried: u64,
    /// Sum of replacements across all calls.
    pub total_replacements: u64,
    /// Calls that skipped at least one failed tier.
    pub degraded_queries: u64,
    /// Calls that failed outright.
    pub failed_queries: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed retrieval call.
    pub fn record(&mut self, response: &RetrievalResponse) {
        self.queries += 1;
        if !response.is_empty() {
            self.hits += 1;
        }
        *self
            .stops_by_reason
            .entry(stop_key(response.stop_reason).to_string())
            .or_default() += 1;
        self.total_tiers_queried += response.tiers_queried() as u64;
        self.total_replacements += response.replacements() as u64;
        if response.degraded {
            self.degraded_queries += 1;
        }
    }

    /// Record a call that returned an error.
    pub fn record_failure(&mut self) {
        self.failed_queries += 1;
    }

    /// Average number of index queries per successful call.
    pub fn average_tiers_per_query(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        self.total_tiers_queried as f64 / self.queries as f64
    }

    /// Share of successful calls that stopped because the quality bar was met.
    pub fn early_stop_rate(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        let met = self
            .stops_by_reason
            .get(stop_key(StopReason::QualityMet))
            .copied()
            .unwrap_or(0);
        met as f64 / self.queries as f64
    }

    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        self.hits as f64 / self.queries as f64
    }
}

fn stop_key(reason: StopReason) -> &'static str {
    match reason {
        StopReason::QualityMet => "quality_met",
        StopReason::EmptyTier => "empty_tier",
        StopReason::MaxTierReached => "max_tier_reached",
    }
}
