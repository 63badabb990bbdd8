/// Completion backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid completion request: {reason}")]
    InvalidRequest { reason: String },

    #[error("rate limit reached for model {model}")]
    RateLimited { model: String },

    #[error("completion request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("completion backend returned no choices")]
    EmptyResponse,
}
