use serde::{Deserialize, Serialize};

use super::defaults;

/// What to do when a tier returns no candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTierPolicy {
    /// Treat the hierarchy as densely populated: an empty tier ends the scan.
    #[default]
    Stop,
    /// Sparse hierarchies: move on to the next tier.
    Skip,
}

/// What to do when a tier query fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFailurePolicy {
    /// Surface the error; no partial results.
    #[default]
    Abort,
    /// Record the failed tier, mark the response degraded, continue.
    Degrade,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of matches returned.
    pub top_k: usize,
    /// Default minimum acceptable score.
    pub threshold: f64,
    /// Default deepest tier consulted.
    pub max_tier: u32,
    pub empty_tier: EmptyTierPolicy,
    pub on_index_failure: IndexFailurePolicy,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            threshold: defaults::DEFAULT_THRESHOLD,
            max_tier: defaults::DEFAULT_MAX_TIER,
            empty_tier: EmptyTierPolicy::default(),
            on_index_failure: IndexFailurePolicy::default(),
        }
    }
}
