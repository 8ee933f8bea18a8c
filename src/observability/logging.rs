//! Tracing subscriber setup.
//!
//! Diagnostics from the hook go to stderr alongside clang-tidy's own output,
//! so the default filter only lets warnings through. `log` records (used by
//! the config loader) are bridged into the same subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TIDYHOOK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from [`LOG_ENV`], falling back to `warn`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .with(env_filter())
        .try_init();

    if let Err(e) = result {
        tracing::debug!("logging already initialized: {}", e);
    }
}
