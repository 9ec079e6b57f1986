//! # Logging Setup
//!
//! Installs the global `tracing` subscriber. Library code only emits events;
//! binaries (the seed tool, a frontend host) call [`init`] once at startup.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages everywhere
//! - `RUST_LOG=partnerdesk=trace` - Trace for partnerdesk crates only
//! - Default: [`DEFAULT_FILTER`]

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,partnerdesk=debug,sqlx=warn";

/// Initializes tracing for the process.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// Initializes tracing for tests, writing through the test harness so
/// output is captured per test.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("partnerdesk=debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        init_test();
        tracing::debug!("still alive");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
