//! Centralized tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize stdout logging.
///
/// The level comes from `RUST_LOG`, defaulting to `info` when unset.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
