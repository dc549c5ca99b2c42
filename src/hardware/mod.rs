//! Hardware seam of the plugin.
//!
//! The vendor driver is abstracted behind the [`ChopperDevice`] capability
//! trait; [`MockChopper`] provides an in-memory implementation for tests,
//! and [`ports`] enumerates host serial ports for the COM port setting.

pub mod device;
pub mod mock;
pub mod ports;

pub use device::{ChopperDevice, ControlTarget, Source, SyncEdge};
pub use mock::MockChopper;
