// src/logging.rs

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,tabmine=info";

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so stdout stays clean for usage text. `RUST_LOG`
/// overrides the default filter. Calling this twice is harmless.
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
