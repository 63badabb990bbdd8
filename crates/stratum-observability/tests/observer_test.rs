use std::sync::Arc;
use std::thread;

use stratum_core::config::ObservabilityConfig;
use stratum_core::models::{Match, RetrievalResponse, StopReason, Tier, TierOutcome, TierReport};
use stratum_observability::RetrievalObserver;

fn quality_met_response() -> RetrievalResponse {
    RetrievalResponse {
        request_id: uuid::Uuid::new_v4(),
        matches: vec![Match::new("Paper1Chunk0", 0.91, Tier::FIRST)],
        tiers: vec![TierReport {
            tier: Tier::FIRST,
            outcome: TierOutcome::Returned {
                candidates: 1,
                admitted: 1,
                replaced: 0,
            },
        }],
        stop_reason: StopReason::QualityMet,
        degraded: false,
        elapsed_ms: 4,
    }
}

#[test]
fn observe_updates_metrics_and_log() {
    let observer = RetrievalObserver::default();
    observer.observe("how many hours of sleep", &quality_met_response());
    observer.observe_failure();

    let metrics = observer.metrics();
    assert_eq!(metrics.queries, 1);
    assert_eq!(metrics.failed_queries, 1);
    assert_eq!(metrics.early_stop_rate(), 1.0);

    let log = observer.query_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].query, "how many hours of sleep");
    assert_eq!(log[0].tiers_queried, 1);
}

#[test]
fn concurrent_observers_do_not_lose_updates() {
    let observer = Arc::new(RetrievalObserver::new(&ObservabilityConfig {
        query_log_capacity: 16,
        ..Default::default()
    }));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let observer = Arc::clone(&observer);
            thread::spawn(move || {
                for _ in 0..10 {
                    observer.observe(&format!("q{i}"), &quality_met_response());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(observer.metrics().queries, 80);
    assert_eq!(observer.query_log().len(), 16);
}
