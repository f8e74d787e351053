//! Logging initialization for the donor server.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured
//! `log_level`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Expand a bare level such as `debug` into per-crate directives.
///
/// Anything containing `=` is treated as a full filter directive and kept.
pub fn default_filter(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') {
        return level.to_string();
    }

    format!(
        "warn,donor_registry={0},donor_server={0},tower_http={0}",
        level
    )
}

/// Install the global subscriber.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true));

    let _ = subscriber.try_init();
}
