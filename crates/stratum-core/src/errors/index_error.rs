use crate::models::Tier;

/// Similarity index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("query against tier {tier} failed: {reason}")]
    QueryFailed { tier: Tier, reason: String },

    #[error("query against tier {tier} timed out after {timeout_ms}ms")]
    Timeout { tier: Tier, timeout_ms: u64 },

    #[error("index backend returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("malformed index response: {reason}")]
    MalformedResponse { reason: String },

    #[error("index write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
