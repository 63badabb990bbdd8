use serde::{Deserialize, Serialize};

use super::passage::PassageMetadata;
use super::tier::Tier;

/// A single candidate retrieved from one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Identifier of the source passage, unique within the index.
    pub id: String,
    /// Similarity score. Higher is more relevant; only comparable within one call.
    pub score: f64,
    /// The hierarchy level this match was retrieved from.
    pub tier: Tier,
    #[serde(default)]
    pub metadata: PassageMetadata,
}

impl Match {
    pub fn new(id: impl Into<String>, score: f64, tier: Tier) -> Self {
        Self {
            id: id.into(),
            score,
            tier,
            metadata: PassageMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: PassageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether this match clears the quality threshold.
    pub fn meets(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}
