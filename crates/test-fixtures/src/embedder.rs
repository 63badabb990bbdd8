use std::sync::atomic::{AtomicUsize, Ordering};

use stratum_core::errors::{EmbeddingError, StratumResult};
use stratum_core::traits::IEmbeddingProvider;

/// Embedder that returns the same vector for every text and counts calls.
pub struct FixedEmbedder {
    vector: Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// An embedder whose backend is always unavailable.
    pub fn failing() -> Self {
        Self {
            vector: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FixedEmbedder {
    fn default() -> Self {
        Self::new(vec![1.0, 0.0, 0.0, 0.0])
    }
}

impl IEmbeddingProvider for FixedEmbedder {
    fn embed(&self, _text: &str) -> StratumResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: "fixed".to_string(),
            }
            .into());
        }
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
