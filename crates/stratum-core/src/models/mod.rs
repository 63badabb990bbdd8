pub mod index_entry;
pub mod passage;
pub mod retrieval_request;
pub mod retrieval_response;
pub mod scored_match;
pub mod tier;

pub use index_entry::IndexEntry;
pub use passage::PassageMetadata;
pub use retrieval_request::RetrievalRequest;
pub use retrieval_response::{RetrievalResponse, StopReason, TierOutcome, TierReport};
pub use scored_match::Match;
pub use tier::{InvalidTier, Tier};
