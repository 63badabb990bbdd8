//! Populate an index from a chunk corpus, embedding only what is missing.

use std::collections::HashSet;

use rayon::prelude::*;
use stratum_core::constants::MAX_UPSERT_BATCH_SIZE;
use stratum_core::errors::{EmbeddingError, IndexError, StratumResult};
use stratum_core::models::IndexEntry;
use stratum_core::traits::{IEmbeddingProvider, IIndexWriter};
use stratum_observability::bootstrap_span;
use tracing::{debug, info};

use crate::corpus::ChunkRecord;

/// What a bootstrap run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub inserted: usize,
    /// Records already present in the index.
    pub skipped: usize,
}

/// Embeds and upserts chunk records in batches.
#[derive(Debug, Clone, Copy)]
pub struct IndexBootstrap {
    batch_size: usize,
}

impl IndexBootstrap {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.clamp(1, MAX_UPSERT_BATCH_SIZE),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Make sure every chunk is in the index.
    ///
    /// Every record is validated before anything is written, and a corpus that
    /// repeats a `chunk_id` is rejected. Records already present are skipped;
    /// when all are present no embedding call is made.
    pub fn ensure_populated<W, E>(
        &self,
        index: &W,
        embedder: &E,
        chunks: &[ChunkRecord],
    ) -> StratumResult<BootstrapReport>
    where
        W: IIndexWriter + ?Sized,
        E: IEmbeddingProvider + ?Sized,
    {
        let span = bootstrap_span!(chunks.len());
        let _guard = span.enter();

        let mut missing = Vec::new();
        let mut skipped = 0;
        let mut seen: HashSet<&str> = HashSet::with_capacity(chunks.len());
        for chunk in chunks {
            let tier = chunk.validate()?;
            if !seen.insert(chunk.chunk_id.as_str()) {
                return Err(IndexError::InvalidRecord {
                    id: chunk.chunk_id.clone(),
                    reason: "duplicate chunk_id in corpus".to_string(),
                }
                .into());
            }
            if index.contains(&chunk.chunk_id)? {
                skipped += 1;
            } else {
                missing.push((chunk, tier));
            }
        }

        if missing.is_empty() {
            debug!(skipped, "index already populated");
            return Ok(BootstrapReport {
                inserted: 0,
                skipped,
            });
        }

        let entries: Vec<Vec<IndexEntry>> = missing
            .par_chunks(self.batch_size)
            .map(|batch| -> StratumResult<Vec<IndexEntry>> {
                let texts: Vec<String> = batch.iter().map(|(c, _)| c.chunk_text.clone()).collect();
                let vectors = embedder.embed_batch(&texts)?;
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
                Ok(batch
                    .iter()
                    .zip(vectors)
                    .map(|((chunk, tier), vector)| IndexEntry {
                        id: chunk.chunk_id.clone(),
                        tier: *tier,
                        vector,
                        metadata: chunk.metadata(),
                    })
                    .collect())
            })
            .collect::<StratumResult<_>>()?;

        let mut inserted = 0;
        for batch in entries {
            inserted += index.upsert(batch)?;
        }

        info!(inserted, skipped, "index bootstrap complete");
        Ok(BootstrapReport { inserted, skipped })
    }
}

impl Default for IndexBootstrap {
    fn default() -> Self {
        Self::new(stratum_core::config::defaults::DEFAULT_BOOTSTRAP_BATCH_SIZE)
    }
}
