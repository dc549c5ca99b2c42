//! Tracing subscriber initialization.
//!
//! The plugin itself only emits `tracing` events; installing a subscriber
//! is the embedding process's job. For hosts that do not bring their own,
//! this helper wires the usual stack: an `EnvFilter` honoring `RUST_LOG`
//! with a configured fallback level, and a fmt layer.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset (typically
/// `PluginConfig::log_level`). Fails if a subscriber is already
/// installed or the filter directive is invalid.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| anyhow!("invalid tracing filter '{default_level}': {err}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(())
}
