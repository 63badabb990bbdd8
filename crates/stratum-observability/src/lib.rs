//! # stratum-observability
//!
//! Tracing setup, span definitions, retrieval metrics, and the query log.

pub mod metrics;
pub mod observer;
pub mod query_log;
pub mod tracing_setup;

pub use metrics::RetrievalMetrics;
pub use observer::RetrievalObserver;
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_from_config};
