use stratum_core::errors::*;
use stratum_core::models::Tier;

#[test]
fn index_timeout_carries_tier_and_duration() {
    let err = IndexError::Timeout {
        tier: Tier::new(2).unwrap(),
        timeout_ms: 5000,
    };
    let msg = err.to_string();
    assert!(msg.contains("tier 2"));
    assert!(msg.contains("5000"));
}

#[test]
fn invalid_parameters_carries_reason() {
    let err = RetrievalError::InvalidParameters {
        reason: "top_k must be positive".into(),
    };
    assert!(err.to_string().contains("top_k must be positive"));
}

#[test]
fn cancelled_reports_progress() {
    let err = RetrievalError::Cancelled { tiers_queried: 1 };
    assert!(err.to_string().contains("1 tier"));
}

// --- From impls ---

#[test]
fn embedding_error_converts_to_stratum_error() {
    let emb_err = EmbeddingError::DimensionMismatch {
        expected: 1024,
        actual: 384,
    };
    let err: StratumError = emb_err.into();
    assert!(matches!(err, StratumError::EmbeddingError(_)));
    assert!(err.is_collaborator_failure());
}

#[test]
fn index_error_converts_to_stratum_error() {
    let err: StratumError = IndexError::QueryFailed {
        tier: Tier::FIRST,
        reason: "connection reset".into(),
    }
    .into();
    assert!(matches!(err, StratumError::IndexError(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn retrieval_error_is_not_a_collaborator_failure() {
    let err: StratumError = RetrievalError::InvalidParameters {
        reason: "bad".into(),
    }
    .into();
    assert!(!err.is_collaborator_failure());
}

#[test]
fn serde_json_error_converts_to_serialization_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: StratumError = json_err.into();
    assert!(matches!(err, StratumError::SerializationError { .. }));
}

#[test]
fn generation_errors_render_model() {
    let err = GenerationError::RateLimited {
        model: "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free".into(),
    };
    assert!(err.to_string().contains("Llama-3.3"));
}
