//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries and tests that want to see
//! them install a subscriber through [`init_logging`].

use tracing_subscriber::{EnvFilter, fmt};

/// Install a formatted `tracing` subscriber filtered by `directives` (e.g.
/// `"trellis=debug"`). Returns false if a global subscriber was already set.
pub fn init_logging(directives: &str) -> bool {
    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Like [`init_logging`], but routes output through the test harness writer so
/// it is captured per test.
pub fn init_test_logging(directives: &str) -> bool {
    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_test_writer()
        .try_init()
        .is_ok()
}
