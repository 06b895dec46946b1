//! Terminal logging setup for the binary
//!
//! `RUST_LOG` takes precedence over the level passed in, e.g.
//! `RUST_LOG=bank_queue=debug` prints every scheduling decision and
//! `RUST_LOG=des=trace` every dispatched event.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber at `level` ("trace", "debug", "info", ...).
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bank_queue={level},des={level}").into());

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();
}
