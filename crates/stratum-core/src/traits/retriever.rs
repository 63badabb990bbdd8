use crate::errors::StratumResult;
use crate::models::{RetrievalRequest, RetrievalResponse};

/// Ranked passage retrieval for a query.
pub trait IRetriever: Send + Sync {
    fn retrieve(&self, request: &RetrievalRequest) -> StratumResult<RetrievalResponse>;
}
