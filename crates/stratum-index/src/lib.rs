//! # stratum-index
//!
//! Tier-partitioned similarity indexes behind `ISimilarityIndex`:
//! an in-process [`MemoryIndex`] and an HTTP [`RemoteIndex`] for a hosted
//! vector database. Also loads chunk corpora and bootstraps an index from them.

pub mod bootstrap;
pub mod corpus;
pub mod memory;
pub mod remote;
pub mod similarity;

pub use bootstrap::{BootstrapReport, IndexBootstrap};
pub use corpus::{load_chunks, ChunkRecord};
pub use memory::{IndexedPassage, MemoryIndex};
pub use remote::RemoteIndex;
pub use similarity::cosine_similarity;
