use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "ollama".
    pub provider: String,
    pub model: String,
    /// Vector dimensions expected by the index.
    pub dimensions: usize,
    pub base_url: String,
    pub timeout_ms: u64,
    /// L1 in-memory cache max entries. 0 disables caching.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            base_url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
