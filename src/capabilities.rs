//! Host-facing actuator contract.
//!
//! This is the surface the host data-acquisition framework drives: the
//! lifecycle (initialize/close), positioning (read, absolute and relative
//! moves, stop), and setting-change notifications. The host owns the
//! parameter tree, threading, and user-facing error reporting; the plugin
//! only implements this trait.
//!
//! # Contract
//! - Positions are in user units after scaling (degrees by default).
//! - `initialize` never errors on an unreachable port: connection
//!   failure is reported through [`InitStatus::connected`].
//! - All other device-communication failures propagate as errors to the
//!   caller.

use anyhow::Result;
use async_trait::async_trait;

use crate::settings::SettingValue;

/// Outcome of actuator initialization.
#[derive(Debug, Clone)]
pub struct InitStatus {
    /// Human-readable status line for the host log.
    pub info: String,
    /// The device's own connectivity check after connecting.
    pub connected: bool,
}

/// A device exposing a controllable scalar position.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Open the device connection and apply all current settings in order.
    async fn initialize(&mut self) -> Result<InitStatus>;

    /// Current position in user units, after scaling.
    async fn position(&mut self) -> Result<f64>;

    /// Move to an absolute target, clamped to the configured bounds.
    async fn move_abs(&mut self, target: f64) -> Result<()>;

    /// Move relative to the current position.
    async fn move_rel(&mut self, delta: f64) -> Result<()>;

    /// Move to the device's reference position, when it has one.
    async fn move_home(&mut self) -> Result<()>;

    /// Stop motion immediately.
    async fn stop(&mut self) -> Result<()>;

    /// Validate, store, and apply a changed setting.
    async fn commit_setting(&mut self, name: &str, value: SettingValue) -> Result<()>;

    /// Release the device connection.
    async fn close(&mut self) -> Result<()>;

    /// Axis label shown by the host.
    fn axis(&self) -> &'static str {
        "Position"
    }

    /// Position units shown by the host.
    fn units(&self) -> &'static str {
        ""
    }

    /// Position tolerance the host uses for move-done detection.
    fn epsilon(&self) -> f64 {
        0.1
    }
}
