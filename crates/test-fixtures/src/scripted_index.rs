use std::collections::HashMap;
use std::sync::Mutex;

use stratum_core::errors::{IndexError, StratumResult};
use stratum_core::models::{Match, Tier};
use stratum_core::traits::ISimilarityIndex;

/// What a scripted tier answers.
#[derive(Debug, Clone)]
pub enum TierScript {
    Batch(Vec<Match>),
    Fail(String),
    Timeout(u64),
}

/// Similarity index with canned per-tier answers and a log of queried tiers.
///
/// Tiers without a script return an empty batch.
#[derive(Debug, Default)]
pub struct ScriptedIndex {
    scripts: HashMap<u32, TierScript>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(mut self, level: u32, batch: Vec<Match>) -> Self {
        self.scripts.insert(level, TierScript::Batch(batch));
        self
    }

    /// Shorthand for a batch of `(id, score)` pairs with empty metadata.
    pub fn with_scores(self, level: u32, scores: &[(&str, f64)]) -> Self {
        let tier = Tier::new(level).expect("tier levels start at 1");
        let batch = scores
            .iter()
            .map(|(id, score)| Match::new(*id, *score, tier))
            .collect();
        self.with_batch(level, batch)
    }

    pub fn failing_at(mut self, level: u32, reason: &str) -> Self {
        self.scripts
            .insert(level, TierScript::Fail(reason.to_string()));
        self
    }

    pub fn timing_out_at(mut self, level: u32, timeout_ms: u64) -> Self {
        self.scripts.insert(level, TierScript::Timeout(timeout_ms));
        self
    }

    /// Tier levels queried so far, in order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    /// Sum of candidates across all scripted batches.
    pub fn total_candidates(&self) -> usize {
        self.scripts
            .values()
            .map(|s| match s {
                TierScript::Batch(b) => b.len(),
                _ => 0,
            })
            .sum()
    }
}

impl ISimilarityIndex for ScriptedIndex {
    fn query(&self, _vector: &[f32], tier: Tier, limit: usize) -> StratumResult<Vec<Match>> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(tier.level());

        match self.scripts.get(&tier.level()) {
            None => Ok(Vec::new()),
            Some(TierScript::Batch(batch)) => {
                let mut batch = batch.clone();
                batch.sort_by(|a, b| b.score.total_cmp(&a.score));
                batch.truncate(limit);
                Ok(batch)
            }
            Some(TierScript::Fail(reason)) => Err(IndexError::QueryFailed {
                tier,
                reason: reason.clone(),
            }
            .into()),
            Some(TierScript::Timeout(timeout_ms)) => Err(IndexError::Timeout {
                tier,
                timeout_ms: *timeout_ms,
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
