//! Span definitions per operation: retrieval, tier query, bootstrap, generation.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("stratum.retrieval", query = %$query, top_k = $top_k)
    };
}

/// Create a span for one tier query inside a retrieval.
#[macro_export]
macro_rules! tier_span {
    ($tier:expr) => {
        tracing::debug_span!("stratum.tier", tier = %$tier)
    };
}

/// Create an index bootstrap span.
#[macro_export]
macro_rules! bootstrap_span {
    ($record_count:expr) => {
        tracing::info_span!("stratum.bootstrap", records = $record_count)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($model:expr) => {
        tracing::info_span!("stratum.generation", model = %$model)
    };
}
