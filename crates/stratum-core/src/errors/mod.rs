//! Error handling for Stratum.
//! One error enum per subsystem, `thiserror` only, folded into [`StratumError`].

pub mod config_error;
pub mod embedding_error;
pub mod generation_error;
pub mod index_error;
pub mod retrieval_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use index_error::IndexError;
pub use retrieval_error::RetrievalError;

/// Top-level error for every fallible Stratum operation.
#[derive(Debug, thiserror::Error)]
pub enum StratumError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("index error: {0}")]
    IndexError(#[from] IndexError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {reason}")]
    SerializationError { reason: String },
}

impl From<serde_json::Error> for StratumError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl StratumError {
    /// Whether the error came from a collaborator (embedder, index, completion
    /// backend) rather than from the caller's input.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingError(_) | Self::IndexError(_) | Self::GenerationError(_)
        )
    }
}

pub type StratumResult<T> = Result<T, StratumError>;
