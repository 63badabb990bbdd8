pub mod defaults;
pub mod embedding_config;
pub mod generation_config;
pub mod index_config;
pub mod observability_config;
pub mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{EmptyTierPolicy, IndexFailurePolicy, RetrievalConfig};

use crate::errors::ConfigError;

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StratumConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

impl StratumConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        if r.top_k == 0 {
            return Err(invalid("retrieval.top_k", "must be at least 1"));
        }
        if r.max_tier == 0 {
            return Err(invalid("retrieval.max_tier", "must be at least 1"));
        }
        if !r.threshold.is_finite() || r.threshold < 0.0 {
            return Err(invalid(
                "retrieval.threshold",
                "must be a finite non-negative number",
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be positive"));
        }
        if self.index.bootstrap_batch_size == 0 {
            return Err(invalid("index.bootstrap_batch_size", "must be positive"));
        }
        if self.index.query_timeout_ms == 0 {
            return Err(invalid("index.query_timeout_ms", "must be positive"));
        }
        Ok(())
    }
}

/// Read a secret from the environment variable named in config.
pub fn read_secret(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv {
            var: var.to_string(),
        }),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
