use serde::{Deserialize, Serialize};
use stratum_core::config::{EmptyTierPolicy, IndexFailurePolicy, RetrievalConfig};

/// Loop-control knobs of the tiered retriever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalPolicy {
    pub empty_tier: EmptyTierPolicy,
    pub on_index_failure: IndexFailurePolicy,
}

impl From<&RetrievalConfig> for RetrievalPolicy {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            empty_tier: config.empty_tier,
            on_index_failure: config.on_index_failure,
        }
    }
}
