/// Maximum batch size for bulk index upserts.
pub const MAX_UPSERT_BATCH_SIZE: usize = 1000;

/// Metadata key carrying the hierarchy level of a passage in remote indexes.
pub const TIER_METADATA_KEY: &str = "hierarchical_level";
