//! Global tracing subscriber initialization.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

use crate::infra::config;

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once.
pub fn init_tracing() {
    if TRACING_INITIALIZED.get().is_some() {
        return;
    }

    let filter = EnvFilter::try_new(config::log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
    if let Err(error) = result {
        tracing::debug!(error = %error, "Tracing subscriber already initialized");
    }

    let _ = TRACING_INITIALIZED.set(());
}
