use crate::errors::StratumResult;
use crate::models::{IndexEntry, Match, Tier};

/// Read side of a tier-partitioned similarity index.
///
/// An empty batch is a meaningful answer ("this tier holds nothing relevant"),
/// distinct from an error. Timeouts must surface as errors.
pub trait ISimilarityIndex: Send + Sync {
    /// Return up to `limit` matches from `tier`, ordered by score descending,
    /// each tagged with `tier`.
    fn query(&self, vector: &[f32], tier: Tier, limit: usize) -> StratumResult<Vec<Match>>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// Write side used by the bootstrap step. Never called on the query path.
pub trait IIndexWriter: Send + Sync {
    /// Whether a passage with this id is already stored.
    fn contains(&self, id: &str) -> StratumResult<bool>;

    /// Insert or replace entries. Returns the number written.
    fn upsert(&self, entries: Vec<IndexEntry>) -> StratumResult<usize>;
}
