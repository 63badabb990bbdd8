//! Tracing setup: structured logging with span definitions.

pub mod spans;

use std::sync::Once;

use stratum_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `STRATUM_LOG` environment variable for filtering.
/// Defaults to `info` level if not set. Idempotent.
pub fn init_tracing() {
    init_tracing_from_config(&ObservabilityConfig::default());
}

/// Initialize tracing from config. `STRATUM_LOG` still wins when set.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("STRATUM_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        if config.json_logs {
            tracing_subscriber::registry()
                .with(layer.json())
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry().with(layer).with(filter).init();
        }
    });
}
