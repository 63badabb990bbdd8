use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scored_match::Match;
use super::tier::Tier;

/// Why the tier loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The result set was full and every member cleared the threshold.
    QualityMet,
    /// A tier returned no candidates and the empty-tier policy stopped the scan.
    EmptyTier,
    /// Every tier up to `max_tier` was consulted.
    MaxTierReached,
}

/// What happened when one tier was queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TierOutcome {
    Returned {
        candidates: usize,
        admitted: usize,
        replaced: usize,
    },
    Empty,
    /// Only produced under the degrade failure policy.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: Tier,
    #[serde(flatten)]
    pub outcome: TierOutcome,
}

/// Result of one retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub request_id: Uuid,
    /// Ranked matches, highest score first.
    pub matches: Vec<Match>,
    /// One report per tier actually queried, in query order.
    pub tiers: Vec<TierReport>,
    pub stop_reason: StopReason,
    /// True when at least one tier failed and was skipped.
    pub degraded: bool,
    pub elapsed_ms: u64,
}

impl RetrievalResponse {
    pub fn tiers_queried(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    /// Total number of replacements performed across all tiers.
    pub fn replacements(&self) -> usize {
        self.tiers
            .iter()
            .map(|t| match t.outcome {
                TierOutcome::Returned { replaced, .. } => replaced,
                _ => 0,
            })
            .sum()
    }
}
