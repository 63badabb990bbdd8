use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use stratum_core::models::{RetrievalRequest, RetrievalResponse, StopReason};
use stratum_core::traits::IRetriever;
use stratum_retrieval::TieredRetriever;
use test_fixtures::{FixedEmbedder, ScriptedIndex};

type Script = Vec<Vec<(u8, f64)>>;

fn build_index(script: &Script) -> ScriptedIndex {
    script
        .iter()
        .enumerate()
        .fold(ScriptedIndex::new(), |index, (i, batch)| {
            let ids: Vec<(String, f64)> = batch.iter().map(|(id, s)| (format!("p{id}"), *s)).collect();
            let pairs: Vec<(&str, f64)> = ids.iter().map(|(id, s)| (id.as_str(), *s)).collect();
            index.with_scores(i as u32 + 1, &pairs)
        })
}

fn run(script: &Script, top_k: usize, threshold: f64, max_tier: u32) -> (RetrievalResponse, Vec<u32>) {
    let index = Arc::new(build_index(script));
    let retriever = TieredRetriever::new(index.clone(), Arc::new(FixedEmbedder::default()));
    let request = RetrievalRequest::default()
        .with_top_k(top_k)
        .with_threshold(threshold)
        .with_max_tier(max_tier);
    let response = retriever.retrieve(&request).unwrap();
    (response, index.calls())
}

fn arb_script() -> impl Strategy<Value = Script> {
    prop::collection::vec(
        prop::collection::vec((0u8..20, 0.0f64..1.0), 0..8),
        1..5,
    )
}

// ── Output shape: bounded, ranked, unique ────────────────────────────────

proptest! {
    #[test]
    fn output_is_bounded_sorted_and_unique(
        script in arb_script(),
        top_k in 1usize..6,
        threshold in 0.0f64..1.0,
        max_tier in 1u32..6,
    ) {
        let (response, _) = run(&script, top_k, threshold, max_tier);
        prop_assert!(response.matches.len() <= top_k);
        for pair in response.matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        let ids: HashSet<&str> = response.matches.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(ids.len(), response.matches.len());
    }
}

// ── Tiers are queried in order, never beyond max_tier ────────────────────

proptest! {
    #[test]
    fn tiers_are_queried_as_an_ordered_prefix(
        script in arb_script(),
        top_k in 1usize..6,
        threshold in 0.0f64..1.0,
        max_tier in 1u32..6,
    ) {
        let (response, calls) = run(&script, top_k, threshold, max_tier);
        prop_assert!(calls.len() as u32 <= max_tier);
        let expected: Vec<u32> = (1..=calls.len() as u32).collect();
        prop_assert_eq!(&calls, &expected);
        prop_assert_eq!(response.tiers_queried(), calls.len());
    }
}

// ── An empty tier ends the scan ──────────────────────────────────────────

proptest! {
    #[test]
    fn empty_tier_stops_the_scan(
        script in arb_script(),
        top_k in 1usize..6,
        threshold in 0.0f64..1.0,
        max_tier in 1u32..6,
    ) {
        let (response, calls) = run(&script, top_k, threshold, max_tier);
        if response.stop_reason == StopReason::EmptyTier {
            let last = *calls.last().unwrap() as usize;
            let batch_empty = script.get(last - 1).map_or(true, |b| b.is_empty());
            prop_assert!(batch_empty);
        }
        // No tier before the last one queried was empty.
        for level in calls.iter().take(calls.len().saturating_sub(1)) {
            prop_assert!(!script[*level as usize - 1].is_empty());
        }
    }
}

// ── First tier meeting quality costs exactly one index call ──────────────

proptest! {
    #[test]
    fn good_first_tier_needs_one_call(
        scores in prop::collection::vec(0.5f64..1.0, 1..6),
        deeper in prop::collection::vec((0u8..20, 0.0f64..1.0), 0..8),
        max_tier in 1u32..6,
    ) {
        let top_k = scores.len();
        let first: Vec<(u8, f64)> = scores.iter().enumerate().map(|(i, s)| (100 + i as u8, *s)).collect();
        let script = vec![first, deeper];
        let (response, calls) = run(&script, top_k, 0.5, max_tier);
        prop_assert_eq!(calls, vec![1]);
        prop_assert_eq!(response.matches.len(), top_k);
        prop_assert!(response.matches.iter().all(|m| m.score >= 0.5));
    }
}

// ── Results only ever come from a queried tier, unmodified ──────────────

proptest! {
    #[test]
    fn every_match_was_served_by_a_queried_tier(
        script in arb_script(),
        top_k in 1usize..6,
        threshold in 0.0f64..1.0,
        max_tier in 1u32..6,
    ) {
        let (response, calls) = run(&script, top_k, threshold, max_tier);
        let mut served: HashSet<(String, u64, u32)> = HashSet::new();
        for level in &calls {
            let Some(batch) = script.get(*level as usize - 1) else { continue };
            for (id, score) in batch {
                served.insert((format!("p{id}"), score.to_bits(), *level));
            }
        }
        for m in &response.matches {
            prop_assert!(served.contains(&(m.id.clone(), m.score.to_bits(), m.tier.level())));
        }
    }
}

// ── Consulting one more tier never makes the result worse ────────────────

proptest! {
    #[test]
    fn deeper_scan_never_lowers_total_score(
        script in arb_script(),
        top_k in 1usize..6,
        threshold in 0.0f64..1.0,
        max_tier in 1u32..5,
    ) {
        let (shallow, _) = run(&script, top_k, threshold, max_tier);
        let (deep, _) = run(&script, top_k, threshold, max_tier + 1);
        let total = |r: &RetrievalResponse| r.matches.iter().map(|m| m.score).sum::<f64>();
        prop_assert!(deep.matches.len() >= shallow.matches.len());
        prop_assert!(total(&deep) + 1e-9 >= total(&shallow));
    }
}
