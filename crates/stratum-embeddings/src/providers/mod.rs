//! Provider registry.

pub mod ollama_provider;

pub use ollama_provider::OllamaProvider;

use stratum_core::config::EmbeddingConfig;
use stratum_core::errors::ConfigError;
use stratum_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

use crate::cache::CachedEmbedder;

/// Build the configured provider, wrapped in the L1 cache when `cache_size > 0`.
///
/// An unreachable backend is only logged here; calls fail with
/// `EmbeddingError` until it comes up.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn IEmbeddingProvider>, ConfigError> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaProvider::from_config(config);
            if provider.health_check() {
                info!(provider = "ollama", model = %config.model, "embedding provider connected");
            } else {
                warn!(provider = "ollama", url = %config.base_url, "embedding provider unreachable");
            }
            if config.cache_size > 0 {
                Ok(Box::new(CachedEmbedder::new(provider, config.cache_size)))
            } else {
                Ok(Box::new(provider))
            }
        }
        other => Err(ConfigError::UnknownProvider {
            kind: "embedding".to_string(),
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_a_config_error() {
        let config = EmbeddingConfig {
            provider: "tfidf".into(),
            ..Default::default()
        };
        match create_provider(&config) {
            Err(ConfigError::UnknownProvider { kind, name }) => {
                assert_eq!(kind, "embedding");
                assert_eq!(name, "tfidf");
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn ollama_provider_is_built_even_when_offline() {
        let config = EmbeddingConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_ms: 200,
            dimensions: 8,
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.dimensions(), 8);
        assert_eq!(provider.name(), config.model);
    }
}
