use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index backend: "memory" or "remote".
    pub backend: String,
    /// Base URL of the remote index host.
    pub host: Option<String>,
    pub namespace: String,
    /// Name of the environment variable holding the remote API key.
    pub api_key_env: String,
    /// Per-tier query timeout.
    pub query_timeout_ms: u64,
    /// Passages embedded per batch during bootstrap.
    pub bootstrap_batch_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: defaults::DEFAULT_INDEX_BACKEND.to_string(),
            host: None,
            namespace: defaults::DEFAULT_INDEX_NAMESPACE.to_string(),
            api_key_env: defaults::DEFAULT_INDEX_API_KEY_ENV.to_string(),
            query_timeout_ms: defaults::DEFAULT_QUERY_TIMEOUT_MS,
            bootstrap_batch_size: defaults::DEFAULT_BOOTSTRAP_BATCH_SIZE,
        }
    }
}
