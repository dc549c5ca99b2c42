//! Mock chopper device for testing without physical hardware.
//!
//! Tracks connection state, mirrors every configuration write into plain
//! fields, and records the order of writes so tests can assert on the
//! settings-application sequence. An unreachable variant simulates a
//! missing or broken serial port.

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ChopperError;

use super::device::{ChopperDevice, ControlTarget, Source, SyncEdge};

/// In-memory [`ChopperDevice`] implementation.
pub struct MockChopper {
    connected: bool,
    reachable: bool,
    phase_deg: f64,
    source: Source,
    sync_edge: SyncEdge,
    internal_freq_hz: f64,
    mult_n: u32,
    mult_m: u32,
    control_target: ControlTarget,
    running: bool,
    writes: Vec<String>,
}

impl MockChopper {
    /// Create a reachable mock with the device's power-on configuration.
    pub fn new() -> Self {
        Self {
            connected: false,
            reachable: true,
            phase_deg: 0.0,
            source: Source::Internal,
            sync_edge: SyncEdge::Rise,
            internal_freq_hz: 100.0,
            mult_n: 1,
            mult_m: 1,
            control_target: ControlTarget::Outer,
            running: false,
            writes: Vec::new(),
        }
    }

    /// Create a mock whose port can never be opened.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Current raw phase, in degrees.
    pub fn phase_deg(&self) -> f64 {
        self.phase_deg
    }

    /// Currently selected reference source.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Currently selected sync edge.
    pub fn sync_edge(&self) -> SyncEdge {
        self.sync_edge
    }

    /// Internal rate generator frequency in Hz.
    pub fn internal_freq_hz(&self) -> f64 {
        self.internal_freq_hz
    }

    /// Frequency multiplier numerator.
    pub fn mult_n(&self) -> u32 {
        self.mult_n
    }

    /// Frequency multiplier denominator.
    pub fn mult_m(&self) -> u32 {
        self.mult_m
    }

    /// Currently regulated wheel track.
    pub fn control_target(&self) -> ControlTarget {
        self.control_target
    }

    /// Whether the wheel is spinning.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Names of configuration writes, in call order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(ChopperError::NotConnected.into())
        }
    }

    fn record(&mut self, op: &str) {
        self.writes.push(op.to_string());
    }
}

impl Default for MockChopper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChopperDevice for MockChopper {
    async fn connect(&mut self, port: &str, _baud: u32) -> Result<()> {
        if self.connected {
            return Err(ChopperError::AlreadyConnected.into());
        }
        if !self.reachable || port.is_empty() {
            return Err(ChopperError::PortUnreachable(port.to_string()).into());
        }
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn phase(&mut self) -> Result<f64> {
        self.ensure_connected()?;
        Ok(self.phase_deg)
    }

    async fn set_phase(&mut self, degrees: f64) -> Result<()> {
        self.ensure_connected()?;
        self.phase_deg = degrees;
        self.record("phase");
        Ok(())
    }

    async fn set_source(&mut self, source: Source) -> Result<()> {
        self.ensure_connected()?;
        self.source = source;
        self.record("source");
        Ok(())
    }

    async fn set_sync_edge(&mut self, edge: SyncEdge) -> Result<()> {
        self.ensure_connected()?;
        self.sync_edge = edge;
        self.record("sync_edge");
        Ok(())
    }

    async fn set_internal_freq(&mut self, hz: f64) -> Result<()> {
        self.ensure_connected()?;
        self.internal_freq_hz = hz;
        self.record("internal_freq");
        Ok(())
    }

    async fn set_mult_n(&mut self, n: u32) -> Result<()> {
        self.ensure_connected()?;
        self.mult_n = n;
        self.record("mult_n");
        Ok(())
    }

    async fn set_mult_m(&mut self, m: u32) -> Result<()> {
        self.ensure_connected()?;
        self.mult_m = m;
        self.record("mult_m");
        Ok(())
    }

    async fn set_control_target(&mut self, target: ControlTarget) -> Result<()> {
        self.ensure_connected()?;
        self.control_target = target;
        self.record("control_target");
        Ok(())
    }

    async fn run(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.running = true;
        self.record("run");
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.running = false;
        self.record("stop");
        Ok(())
    }
}
