//! # stratum-retrieval
//!
//! Tiered retrieval over a hierarchy-partitioned similarity index.
//!
//! ```text
//! query ─→ embed ─→ tier 1 ─→ merge ─→ quality met? ─yes─→ ranked output
//!                     │                    │ no
//!                     │                    ▼
//!                     └──── tier 2 … max_tier (stop early on empty tier)
//! ```

pub mod cancellation;
pub mod context;
pub mod engine;
pub mod policy;
pub mod result_set;

pub use cancellation::CancellationToken;
pub use context::format_context;
pub use engine::TieredRetriever;
pub use policy::RetrievalPolicy;
pub use result_set::{Admission, MergeStats, ResultSet};
