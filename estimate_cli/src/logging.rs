//! Logging setup via `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used, and
//! `info` if that does not parse.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber.
///
/// Logs go to stderr so `--json` and SVG output on stdout stay clean.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Verbose logging for tests; safe to call more than once
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
