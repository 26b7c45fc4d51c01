//! Logging setup
//!
//! Installs a `tracing` subscriber with an `EnvFilter`. `RUST_LOG` wins over
//! the filter passed in from settings.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (e.g. by the host
/// app or an earlier call), in which case the existing one is kept.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
