//! Diagnostic logging for the bridge binary.
//!
//! Standard output belongs to the protocol response, so every event goes to
//! standard error.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "NEON_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Precedence: `directive`, then `RUST_LOG`,
/// then `warn`. A second call is a no-op.
pub fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
