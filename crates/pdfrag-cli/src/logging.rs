use tracing_subscriber::EnvFilter;

/// Environment variable controlling log verbosity (`EnvFilter` syntax).
pub const LOG_ENV: &str = "PDFRAG_LOG";

/// Default filter when [`LOG_ENV`] is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Logs go to stderr so they never mix with
/// answers on stdout. Calling this twice is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
