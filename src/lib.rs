//! # SR542 Chopper Actuator Plugin
//!
//! Hardware-actuator plugin exposing the Stanford Research Systems SR542
//! optical chopper (phase, source, edge, frequency, multiplier, run/stop)
//! to a host data-acquisition framework.
//!
//! The crate is a thin adapter: host lifecycle calls (initialize, read
//! position, move absolute/relative, stop, close) are translated into calls
//! against the vendor device interface, plus settings-visibility
//! bookkeeping. Serial framing and the chopper's control protocol belong to
//! the vendor driver behind [`hardware::ChopperDevice`]; the host's
//! parameter tree and threading model belong to the host framework.
//!
//! ## Crate Structure
//!
//! The library is organized into several modules, each with a distinct
//! responsibility:
//!
//! - **`adapter`**: the [`adapter::Sr542Actuator`] bridging the host
//!   contract to a chopper device instance.
//! - **`capabilities`**: the host-facing [`capabilities::Actuator`] trait
//!   and the [`capabilities::InitStatus`] initialization report.
//! - **`config`**: file/env configuration loading via `figment`, see
//!   [`config::PluginConfig`].
//! - **`error`**: the typed [`error::ChopperError`] taxonomy for settings
//!   and configuration validation.
//! - **`hardware`**: the vendor capability interface, a mock device for
//!   tests, and serial-port discovery.
//! - **`logging`**: `tracing` subscriber initialization for embedding
//!   hosts.
//! - **`scaling`**: affine mapping between user and device units, plus
//!   move-target bounds.
//! - **`settings`**: the ordered settings table with domains and
//!   visibility flags.

pub mod adapter;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod hardware;
pub mod logging;
pub mod scaling;
pub mod settings;

pub use adapter::Sr542Actuator;
pub use capabilities::{Actuator, InitStatus};
pub use config::PluginConfig;
pub use error::{ChopperError, ChopperResult};
