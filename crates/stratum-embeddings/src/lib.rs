//! # stratum-embeddings
//!
//! Turns query text into vectors for the similarity index.
//!
//! ```text
//! create_provider(config)
//! └── CachedEmbedder (moka, model + blake3 keys)   when cache_size > 0
//!     └── OllamaProvider (HTTP /api/embed)
//! ```

pub mod cache;
pub mod providers;

pub use cache::{vector_cache, CacheStats, CachedEmbedder, VectorCache, VectorKey};
pub use providers::{create_provider, OllamaProvider};
