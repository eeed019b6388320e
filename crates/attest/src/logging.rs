//! Subscriber setup for binaries and tests that want to see check failures.
//!
//! Report-policy failures are `tracing` error events with
//! `event = "attest.check.failed"`; nothing is printed unless a subscriber
//! is installed.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        tracing::debug!(event = "attest.logging.already_initialized", error = %e);
    }
}
