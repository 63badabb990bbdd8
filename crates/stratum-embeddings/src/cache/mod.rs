//! Query-vector cache. One moka store, shareable between providers, keyed
//! so that vectors from one model are never served for another.

pub mod cached_embedder;

use std::time::Duration;

use moka::sync::Cache;

pub use cached_embedder::{CacheStats, CachedEmbedder};

const IDLE_TTL: Duration = Duration::from_secs(3600);
const ABSOLUTE_TTL: Duration = Duration::from_secs(86400);

/// Identifies one cached vector: which model produced it, at which width,
/// for which text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorKey {
    pub model: String,
    pub dimensions: usize,
    pub text_hash: blake3::Hash,
}

impl VectorKey {
    pub fn new(model: &str, dimensions: usize, text: &str) -> Self {
        Self {
            model: model.to_string(),
            dimensions,
            text_hash: blake3::hash(text.as_bytes()),
        }
    }
}

/// TinyLFU-bounded vector store. Clones share the same entries.
pub type VectorCache = Cache<VectorKey, Vec<f32>>;

/// Build a cache holding at most `max_entries` vectors, evicted after an
/// hour idle or a day in total.
pub fn vector_cache(max_entries: u64) -> VectorCache {
    Cache::builder()
        .max_capacity(max_entries)
        .time_to_idle(IDLE_TTL)
        .time_to_live(ABSOLUTE_TTL)
        .build()
}
