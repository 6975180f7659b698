//! Tracing setup for the command-line binary
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary so embedding callers keep control of their own output.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `info` with
/// `verbose`. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
