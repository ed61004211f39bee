//! Tracing subscriber setup for binaries embedding the HIE client.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the application. [`init_logging`] installs a compact `fmt` subscriber
//! filtered by `RUST_LOG` when set, otherwise by the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{HieError, HieResult};

/// Build the filter for the given logging settings.
///
/// `RUST_LOG` wins over the configured level.
pub fn build_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()))
}

/// Install the global subscriber. Does nothing when logging is disabled.
pub fn init_logging(logging: &LoggingConfig) -> HieResult<()> {
    if !logging.enabled {
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(logging))
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| HieError::Config(format!("failed to initialise logging: {e}")))
}
