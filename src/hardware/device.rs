//! Vendor device capability interface for the SR542 chopper.
//!
//! The actual device-communication implementation (serial framing, the
//! chopper's control protocol) lives in the vendor driver; this module
//! defines the narrow surface the adapter needs from it: connect,
//! disconnect, a connectivity check, configuration field writes, a phase
//! read/write pair, and run/stop, plus the typed vocabulary of the
//! configuration fields.
//!
//! # Contract
//! - All methods are async and take `&mut self`: the device handle is
//!   exclusively owned by one adapter instance at a time.
//! - `connect` establishes the handle; every other fallible operation
//!   errors on a disconnected handle.
//! - Errors use `anyhow::Result` and propagate unmodified to the host.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChopperError;

/// Reference signal source for the chopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Internal rate generator.
    Internal,
    /// Voltage-controlled oscillator input.
    Vco,
    /// Power line frequency.
    Line,
    /// External sync input.
    External,
}

impl Source {
    /// Choice strings in the order presented to the user.
    pub const CHOICES: &'static [&'static str] = &["internal", "vco", "line", "external"];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Internal => "internal",
            Self::Vco => "vco",
            Self::Line => "line",
            Self::External => "external",
        })
    }
}

impl FromStr for Source {
    type Err = ChopperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Self::Internal),
            "vco" => Ok(Self::Vco),
            "line" => Ok(Self::Line),
            "external" => Ok(Self::External),
            other => Err(ChopperError::InvalidChoice(other.to_string())),
        }
    }
}

/// Edge of the external sync signal the chopper locks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncEdge {
    /// Rising edge.
    Rise,
    /// Falling edge.
    Fall,
    /// Sine zero crossing.
    Sine,
}

impl SyncEdge {
    /// Choice strings in the order presented to the user.
    pub const CHOICES: &'static [&'static str] = &["rise", "fall", "sine"];
}

impl fmt::Display for SyncEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rise => "rise",
            Self::Fall => "fall",
            Self::Sine => "sine",
        })
    }
}

impl FromStr for SyncEdge {
    type Err = ChopperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rise" => Ok(Self::Rise),
            "fall" => Ok(Self::Fall),
            "sine" => Ok(Self::Sine),
            other => Err(ChopperError::InvalidChoice(other.to_string())),
        }
    }
}

/// Which wheel track the chopper's phase control loop regulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlTarget {
    /// Motor shaft.
    Shaft,
    /// Inner slot track.
    Inner,
    /// Outer slot track.
    Outer,
}

impl ControlTarget {
    /// Choice strings in the order presented to the user.
    pub const CHOICES: &'static [&'static str] = &["shaft", "inner", "outer"];
}

impl fmt::Display for ControlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shaft => "shaft",
            Self::Inner => "inner",
            Self::Outer => "outer",
        })
    }
}

impl FromStr for ControlTarget {
    type Err = ChopperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shaft" => Ok(Self::Shaft),
            "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            other => Err(ChopperError::InvalidChoice(other.to_string())),
        }
    }
}

/// Capability interface of the vendor chopper driver.
#[async_trait]
pub trait ChopperDevice: Send + Sync {
    /// Open the connection at the given serial port and baud rate.
    async fn connect(&mut self, port: &str, baud: u32) -> Result<()>;

    /// Release the connection. Errs on an already-closed handle.
    async fn disconnect(&mut self) -> Result<()>;

    /// The device's own connectivity check.
    fn is_connected(&self) -> bool;

    /// Read the chopper phase, in device raw units (degrees).
    async fn phase(&mut self) -> Result<f64>;

    /// Write the chopper phase, in device raw units (degrees).
    async fn set_phase(&mut self, degrees: f64) -> Result<()>;

    /// Select the reference signal source.
    async fn set_source(&mut self, source: Source) -> Result<()>;

    /// Select the external sync edge.
    async fn set_sync_edge(&mut self, edge: SyncEdge) -> Result<()>;

    /// Set the internal rate generator frequency in Hz.
    async fn set_internal_freq(&mut self, hz: f64) -> Result<()>;

    /// Set the frequency multiplier numerator.
    async fn set_mult_n(&mut self, n: u32) -> Result<()>;

    /// Set the frequency multiplier denominator.
    async fn set_mult_m(&mut self, m: u32) -> Result<()>;

    /// Select which wheel track the phase control loop regulates.
    async fn set_control_target(&mut self, target: ControlTarget) -> Result<()>;

    /// Start the chopper wheel.
    async fn run(&mut self) -> Result<()>;

    /// Stop the chopper wheel.
    async fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_strings_round_trip() {
        let source: Source = "external".parse().unwrap();
        assert_eq!(source, Source::External);
        assert_eq!(source.to_string(), "external");

        let edge: SyncEdge = "sine".parse().unwrap();
        assert_eq!(edge.to_string(), "sine");

        let target: ControlTarget = "outer".parse().unwrap();
        assert_eq!(target.to_string(), "outer");
    }

    #[test]
    fn unknown_variants_are_rejected() {
        assert!(matches!(
            "sideways".parse::<Source>(),
            Err(ChopperError::InvalidChoice(_))
        ));
    }
}
