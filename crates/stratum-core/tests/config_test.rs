use stratum_core::config::*;
use stratum_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = StratumConfig::from_toml("").unwrap();

    // Retrieval defaults
    assert_eq!(config.retrieval.top_k, 3);
    assert_eq!(config.retrieval.threshold, 0.5);
    assert_eq!(config.retrieval.max_tier, 3);
    assert_eq!(config.retrieval.empty_tier, EmptyTierPolicy::Stop);
    assert_eq!(config.retrieval.on_index_failure, IndexFailurePolicy::Abort);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "ollama");
    assert_eq!(config.embedding.dimensions, 1024);
    assert_eq!(config.embedding.cache_size, 10_000);

    // Index defaults
    assert_eq!(config.index.backend, "memory");
    assert_eq!(config.index.namespace, "ns1");
    assert!(config.index.host.is_none());
    assert_eq!(config.index.query_timeout_ms, 5_000);

    // Generation defaults
    assert!(!config.generation.reasoning_model);
    assert_eq!(config.generation.active_model(), config.generation.model);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
top_k = 5
threshold = 0.45
empty_tier = "skip"
on_index_failure = "degrade"

[index]
backend = "remote"
host = "https://project-abc.svc.pinecone.io"
"#;
    let config = StratumConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.retrieval.threshold, 0.45);
    assert_eq!(config.retrieval.empty_tier, EmptyTierPolicy::Skip);
    assert_eq!(config.retrieval.on_index_failure, IndexFailurePolicy::Degrade);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.max_tier, 3);
    assert_eq!(config.index.backend, "remote");
    assert_eq!(
        config.index.host.as_deref(),
        Some("https://project-abc.svc.pinecone.io")
    );
    assert_eq!(config.index.namespace, "ns1");
}

#[test]
fn reasoning_model_switches_active_model() {
    let config = StratumConfig::from_toml("[generation]\nreasoning_model = true\n").unwrap();
    assert_eq!(
        config.generation.active_model(),
        config.generation.reasoning_model_name
    );
}

#[test]
fn config_serde_roundtrip() {
    let config = StratumConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = StratumConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.retrieval.top_k, config.retrieval.top_k);
    assert_eq!(
        roundtripped.embedding.dimensions,
        config.embedding.dimensions
    );
}

#[test]
fn zero_top_k_is_rejected() {
    let err = StratumConfig::from_toml("[retrieval]\ntop_k = 0\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "retrieval.top_k"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn large_top_k_and_max_tier_are_accepted() {
    let config = StratumConfig::from_toml("[retrieval]\ntop_k = 150\nmax_tier = 64\n").unwrap();
    assert_eq!(config.retrieval.top_k, 150);
    assert_eq!(config.retrieval.max_tier, 64);
}

#[test]
fn negative_threshold_is_rejected() {
    let err = StratumConfig::from_toml("[retrieval]\nthreshold = -0.2\n").unwrap_err();
    assert!(err.to_string().contains("retrieval.threshold"));
}

#[test]
fn unknown_policy_fails_to_parse() {
    let err = StratumConfig::from_toml("[retrieval]\nempty_tier = \"sometimes\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed { .. }));
}

#[test]
fn missing_file_reports_path() {
    let err = StratumConfig::from_file("/definitely/not/here/stratum.toml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here/stratum.toml"));
}

#[test]
fn read_secret_reports_missing_variable() {
    let err = read_secret("STRATUM_TEST_SECRET_THAT_IS_NEVER_SET").unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnv { .. }));
}
