use std::sync::atomic::{AtomicU64, Ordering};

use stratum_core::errors::{EmbeddingError, StratumResult};
use stratum_core::traits::IEmbeddingProvider;
use tracing::debug;

use super::{vector_cache, VectorCache, VectorKey};

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Wraps a provider so repeated texts are embedded once per model.
pub struct CachedEmbedder<P> {
    inner: P,
    cache: VectorCache,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: IEmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P, max_entries: u64) -> Self {
        Self::with_cache(inner, vector_cache(max_entries))
    }

    /// Use an existing cache, e.g. one kept across a provider rebuild.
    pub fn with_cache(inner: P, cache: VectorCache) -> Self {
        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Handle to the underlying store, for sharing with another embedder.
    pub fn cache(&self) -> VectorCache {
        self.cache.clone()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Cached vector count. Settles moka's pending writes first.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn key(&self, text: &str) -> VectorKey {
        VectorKey::new(self.inner.name(), self.inner.dimensions(), text)
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> StratumResult<Vec<f32>> {
        let key = self.key(text);
        if let Some(vector) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(vector);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let vector = self.inner.embed(text)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> StratumResult<Vec<Vec<f32>>> {
        let keys: Vec<VectorKey> = texts.iter().map(|t| self.key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|i| out[*i].is_none()).collect();
        self.hits
            .fetch_add((texts.len() - missing.len()) as u64, Ordering::Relaxed);
        self.misses.fetch_add(missing.len() as u64, Ordering::Relaxed);

        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|i| texts[*i].clone()).collect();
            let vectors = self.inner.embed_batch(&batch)?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!(
                        "expected {} embeddings, provider returned {}",
                        batch.len(),
                        vectors.len()
                    ),
                }
                .into());
            }
            for (i, vector) in missing.into_iter().zip(vectors) {
                self.cache.insert(keys[i].clone(), vector.clone());
                out[i] = Some(vector);
            }
        }

        debug!(
            count = texts.len(),
            model = self.inner.name(),
            "batch embedded through cache"
        );
        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
