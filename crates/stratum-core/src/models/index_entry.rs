use serde::{Deserialize, Serialize};

use super::passage::PassageMetadata;
use super::tier::Tier;

/// A passage with its vector, ready to be written into a similarity index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub tier: Tier,
    pub vector: Vec<f32>,
    pub metadata: PassageMetadata,
}
