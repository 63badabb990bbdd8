/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid retrieval parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("retrieval cancelled after {tiers_queried} tier(s)")]
    Cancelled { tiers_queried: usize },
}
