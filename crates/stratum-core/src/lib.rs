//! # stratum-core
//!
//! Foundation crate for the Stratum tiered retrieval system.
//! Defines the shared types, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StratumConfig;
pub use errors::{StratumError, StratumResult};
pub use models::{Match, PassageMetadata, RetrievalRequest, RetrievalResponse, Tier};
