//! Tracing setup for the Lambda runtime
//!
//! CloudWatch adds its own ingestion timestamp and does not render ANSI
//! colours, so both are disabled.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "thumbnail_service=info,thumbnail_lambda=info,s3_utils=info";

/// Install the global subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}
