//! Logging infrastructure.
//!
//! Console logging via tracing-subscriber, filtered by the `RUST_LOG`
//! environment variable (defaults to `info`).

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call once per process; called from the CLI before the service
/// starts. Respects `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
