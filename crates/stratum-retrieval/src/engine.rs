//! TieredRetriever: implements IRetriever over a tier-partitioned index.
//!
//! One embedder call, then at most `max_tier` index calls issued strictly in
//! order. Each tier's batch is merged into a bounded [`ResultSet`] before the
//! stop condition is checked, so tier n+1 is never queried early.

use std::sync::Arc;
use std::time::Instant;

use stratum_core::config::{EmptyTierPolicy, IndexFailurePolicy, RetrievalConfig};
use stratum_core::errors::{RetrievalError, StratumResult};
use stratum_core::models::{
    Match, RetrievalRequest, RetrievalResponse, StopReason, Tier, TierOutcome, TierReport,
};
use stratum_core::traits::{IEmbeddingProvider, IRetriever, ISimilarityIndex};
use stratum_observability::{retrieval_span, tier_span, RetrievalObserver};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cancellation::CancellationToken;
use crate::policy::RetrievalPolicy;
use crate::result_set::ResultSet;

/// The tiered retrieval engine.
///
/// Holds only shared, read-only collaborators; every call builds its own
/// [`ResultSet`], so one retriever can serve concurrent callers.
pub struct TieredRetriever {
    index: Arc<dyn ISimilarityIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
    policy: RetrievalPolicy,
    observer: Option<Arc<RetrievalObserver>>,
}

impl TieredRetriever {
    pub fn new(index: Arc<dyn ISimilarityIndex>, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            index,
            embedder,
            policy: RetrievalPolicy::default(),
            observer: None,
        }
    }

    /// Build a retriever whose loop policy follows the config.
    pub fn from_config(
        index: Arc<dyn ISimilarityIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: &RetrievalConfig,
    ) -> Self {
        Self::new(index, embedder).with_policy(RetrievalPolicy::from(config))
    }

    pub fn with_policy(mut self, policy: RetrievalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report every call's outcome to a shared observer.
    pub fn with_observer(mut self, observer: Arc<RetrievalObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run a retrieval that can be cancelled between tier queries.
    pub fn retrieve_with_cancel(
        &self,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> StratumResult<RetrievalResponse> {
        let result = self.run(request, cancel);
        if let Some(observer) = &self.observer {
            match &result {
                Ok(response) => observer.observe(&request.query, response),
                Err(_) => observer.observe_failure(),
            }
        }
        result
    }

    fn run(
        &self,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> StratumResult<RetrievalResponse> {
        request.validate()?;

        let span = retrieval_span!(request.query, request.top_k);
        let _guard = span.enter();
        let started = Instant::now();
        let threshold = request.threshold;

        if cancel.is_cancelled() {
            return Err(RetrievalError::Cancelled { tiers_queried: 0 }.into());
        }

        // Step 1: Embed once. Failure aborts before any index call.
        let vector = self.embedder.embed(&request.query)?;

        // Step 2: Walk the tiers in priority order.
        let mut set = ResultSet::new(request.top_k);
        let mut tiers: Vec<TierReport> = Vec::new();
        let mut degraded = false;
        let mut stop_reason = StopReason::MaxTierReached;

        for tier in Tier::up_to(request.max_tier) {
            if cancel.is_cancelled() {
                debug!(tiers_queried = tiers.len(), "retrieval cancelled");
                return Err(RetrievalError::Cancelled {
                    tiers_queried: tiers.len(),
                }
                .into());
            }

            let tier_span = tier_span!(tier);
            let _tier_guard = tier_span.enter();

            let batch = match self.index.query(&vector, tier, request.top_k) {
                Ok(batch) => batch,
                Err(e) => match self.policy.on_index_failure {
                    IndexFailurePolicy::Abort => {
                        warn!(%tier, error = %e, "tier query failed, aborting retrieval");
                        return Err(e);
                    }
                    IndexFailurePolicy::Degrade => {
                        warn!(%tier, error = %e, "tier query failed, continuing degraded");
                        degraded = true;
                        tiers.push(TierReport {
                            tier,
                            outcome: TierOutcome::Failed {
                                reason: e.to_string(),
                            },
                        });
                        continue;
                    }
                },
            };

            if batch.is_empty() {
                tiers.push(TierReport {
                    tier,
                    outcome: TierOutcome::Empty,
                });
                match self.policy.empty_tier {
                    EmptyTierPolicy::Stop => {
                        debug!(%tier, "empty tier, no deeper tier is consulted");
                        stop_reason = StopReason::EmptyTier;
                        break;
                    }
                    EmptyTierPolicy::Skip => {
                        debug!(%tier, "empty tier skipped");
                        continue;
                    }
                }
            }

            let batch = normalize_batch(batch, tier, request.top_k);
            let stats = set.merge(batch, threshold);
            debug!(
                %tier,
                candidates = stats.candidates,
                admitted = stats.admitted,
                replaced = stats.replaced,
                size = set.len(),
                "tier merged"
            );
            tiers.push(TierReport {
                tier,
                outcome: TierOutcome::Returned {
                    candidates: stats.candidates,
                    admitted: stats.admitted,
                    replaced: stats.replaced,
                },
            });

            // Step 3: Stop once the set is full of above-threshold matches.
            if set.quality_met(threshold) {
                stop_reason = StopReason::QualityMet;
                break;
            }
        }

        let matches = set.into_ranked();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            matches = matches.len(),
            tiers_queried = tiers.len(),
            stop_reason = ?stop_reason,
            degraded,
            elapsed_ms,
            "retrieval complete"
        );

        Ok(RetrievalResponse {
            request_id: Uuid::new_v4(),
            matches,
            tiers,
            stop_reason,
            degraded,
            elapsed_ms,
        })
    }
}

impl IRetriever for TieredRetriever {
    fn retrieve(&self, request: &RetrievalRequest) -> StratumResult<RetrievalResponse> {
        self.retrieve_with_cancel(request, &CancellationToken::new())
    }
}

/// Tag every candidate with the queried tier and keep at most `limit` of them.
///
/// Indexes are supposed to tag results already and honor the limit; this keeps
/// the merge correct when one does not.
fn normalize_batch(mut batch: Vec<Match>, tier: Tier, limit: usize) -> Vec<Match> {
    for candidate in &mut batch {
        if candidate.tier != tier {
            warn!(
                id = %candidate.id,
                reported = %candidate.tier,
                %tier,
                "index returned a candidate tagged with another tier"
            );
            candidate.tier = tier;
        }
    }
    if batch.len() > limit {
        batch.sort_by(|a, b| b.score.total_cmp(&a.score));
        batch.truncate(limit);
    }
    batch
}
