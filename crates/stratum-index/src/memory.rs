//! In-process similarity index, partitioned by tier.

use std::collections::BTreeMap;
use std::sync::Mutex;

use dashmap::DashMap;
use stratum_core::errors::{IndexError, StratumResult};
use stratum_core::models::{IndexEntry, Match, PassageMetadata, Tier};
use stratum_core::traits::{IIndexWriter, ISimilarityIndex};
use tracing::debug;

use crate::similarity::{cosine_similarity, norm_sq};

/// A stored passage: id, vector and display metadata.
#[derive(Debug, Clone)]
pub struct IndexedPassage {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: PassageMetadata,
}

/// Brute-force cosine index. Readers never block each other; writers are
/// serialized so an id lives in exactly one tier.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    tiers: DashMap<Tier, Vec<IndexedPassage>>,
    dimensions: Option<usize>,
    write_lock: Mutex<()>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes and queries whose vectors are not `dimensions` long.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: Some(dimensions),
            ..Self::default()
        }
    }

    /// Total passages across all tiers.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(|t| t.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Passage count per tier level.
    pub fn tier_counts(&self) -> BTreeMap<u32, usize> {
        self.tiers
            .iter()
            .filter(|t| !t.value().is_empty())
            .map(|t| (t.key().level(), t.value().len()))
            .collect()
    }

    fn has_id(&self, id: &str) -> bool {
        self.tiers
            .iter()
            .any(|t| t.value().iter().any(|p| p.id == id))
    }

    fn check_dimensions(&self, entry: &IndexEntry) -> Result<(), IndexError> {
        if entry.vector.is_empty() {
            return Err(IndexError::InvalidRecord {
                id: entry.id.clone(),
                reason: "empty vector".to_string(),
            });
        }
        match self.dimensions {
            Some(expected) if expected != entry.vector.len() => Err(IndexError::DimensionMismatch {
                expected,
                actual: entry.vector.len(),
            }),
            _ => Ok(()),
        }
    }

    fn check_query(&self, vector: &[f32], tier: Tier) -> Result<(), IndexError> {
        match self.dimensions {
            Some(expected) if expected != vector.len() => Err(IndexError::DimensionMismatch {
                expected,
                actual: vector.len(),
            }),
            _ if vector.is_empty() => Err(IndexError::QueryFailed {
                tier,
                reason: "empty query vector".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl ISimilarityIndex for MemoryIndex {
    fn query(&self, vector: &[f32], tier: Tier, limit: usize) -> StratumResult<Vec<Match>> {
        self.check_query(vector, tier)?;
        if limit == 0 || norm_sq(vector) == 0.0 {
            return Ok(Vec::new());
        }
        let Some(passages) = self.tiers.get(&tier) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<(&IndexedPassage, f64)> = passages
            .iter()
            .filter(|p| p.vector.len() == vector.len())
            .map(|p| (p, cosine_similarity(vector, &p.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        debug!(%tier, returned = scored.len(), "memory index query");
        Ok(scored
            .into_iter()
            .map(|(p, score)| Match::new(p.id.clone(), score, tier).with_metadata(p.metadata.clone()))
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl IIndexWriter for MemoryIndex {
    fn contains(&self, id: &str) -> StratumResult<bool> {
        Ok(self.has_id(id))
    }

    fn upsert(&self, entries: Vec<IndexEntry>) -> StratumResult<usize> {
        for entry in &entries {
            self.check_dimensions(entry)?;
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let written = entries.len();
        for entry in entries {
            for mut shard in self.tiers.iter_mut() {
                shard.value_mut().retain(|p| p.id != entry.id);
            }
            self.tiers.entry(entry.tier).or_default().push(IndexedPassage {
                id: entry.id,
                vector: entry.vector,
                metadata: entry.metadata,
            });
        }
        Ok(written)
    }
}
