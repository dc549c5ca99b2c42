//! SR542 chopper actuator adapter.
//!
//! Bridges the host [`Actuator`] contract to a [`ChopperDevice`] instance:
//! opens the connection at the configured COM port, forwards setting
//! changes to device configuration writes, toggles dependent-setting
//! visibility, and maps positions through the affine scaling transform
//! with bounds clamping. The controlled position is the chopper phase, in
//! degrees.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::capabilities::{Actuator, InitStatus};
use crate::config::PluginConfig;
use crate::hardware::device::{ChopperDevice, ControlTarget, Source, SyncEdge};
use crate::hardware::ports;
use crate::scaling::{AffineScaling, Bounds};
use crate::settings::{Setting, SettingValue, Settings};

/// Actuator adapter for the SR542 chopper.
///
/// Generic over the device so tests can run against
/// [`crate::hardware::MockChopper`]; the device handle is exclusively
/// owned, with no sharing and no internal locking.
pub struct Sr542Actuator<D: ChopperDevice> {
    device: D,
    settings: Settings,
    scaling: AffineScaling,
    bounds: Bounds,
    baud: u32,
    /// Position cache in user units; refreshed on reads and moves.
    current: Option<f64>,
    target: Option<f64>,
}

impl<D: ChopperDevice> Sr542Actuator<D> {
    /// Create an adapter, enumerating host serial ports for the COM port
    /// setting.
    pub fn new(device: D, config: &PluginConfig) -> Self {
        Self::with_ports(device, config, ports::available_ports())
    }

    /// Create an adapter with a pre-enumerated port list.
    ///
    /// The COM port choice list is the given ports; the initial selection
    /// is the configured port, falling back to the first enumerated one.
    pub fn with_ports(device: D, config: &PluginConfig, com_ports: Vec<String>) -> Self {
        Self {
            device,
            settings: default_settings(config, &com_ports),
            scaling: config.scaling,
            bounds: config.bounds,
            baud: config.baud,
            current: None,
            target: None,
        }
    }

    /// Read-only view of the settings table.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read-only access to the device (used by tests and diagnostics).
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Last accepted move target in user units, after clamping.
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Forward one stored setting to the device.
    ///
    /// Pure dispatch: each recognized name maps to exactly one device
    /// configuration write or visibility toggle.
    async fn apply(&mut self, name: &str) -> Result<()> {
        match name {
            "source" => {
                let source: Source = self.settings.choice("source")?.parse()?;
                self.device.set_source(source).await?;
                if source == Source::External {
                    self.settings.show("edge")?;
                } else {
                    self.settings.hide("edge")?;
                }
                if source == Source::Internal {
                    self.settings.show("internal_freq")?;
                } else {
                    self.settings.hide("internal_freq")?;
                }
            }

            "edge" => {
                let edge: SyncEdge = self.settings.choice("edge")?.parse()?;
                self.device.set_sync_edge(edge).await?;
            }

            "internal_freq" => {
                let hz = self.settings.float("internal_freq")?;
                self.device.set_internal_freq(hz).await?;
            }

            "n" => {
                let n = self.settings.int("n")?;
                self.device.set_mult_n(n as u32).await?;
            }

            "m" => {
                let m = self.settings.int("m")?;
                self.device.set_mult_m(m as u32).await?;
            }

            "control" => {
                let target: ControlTarget = self.settings.choice("control")?.parse()?;
                self.device.set_control_target(target).await?;
            }

            "run" => {
                if self.settings.flag("run")? {
                    self.device.run().await?;
                } else {
                    self.device.stop().await?;
                }
            }

            // Takes effect at the next initialize
            "com_port" => {}

            other => debug!(setting = other, "no hardware action for setting"),
        }
        Ok(())
    }
}

#[async_trait]
impl<D: ChopperDevice> Actuator for Sr542Actuator<D> {
    async fn initialize(&mut self) -> Result<InitStatus> {
        let port = self.settings.choice("com_port")?.to_string();

        if let Err(err) = self.device.connect(&port, self.baud).await {
            warn!(port = %port, error = %err, "chopper connection failed");
            return Ok(InitStatus {
                info: format!("connection to '{port}' failed: {err:#}"),
                connected: false,
            });
        }

        for name in self.settings.names() {
            self.apply(&name).await?;
        }

        let connected = self.device.is_connected();
        info!(port = %port, connected, "chopper initialized");
        Ok(InitStatus {
            info: "SR542 chopper initialized".to_string(),
            connected,
        })
    }

    async fn position(&mut self) -> Result<f64> {
        let raw = self.device.phase().await?;
        let position = self.scaling.to_user(raw);
        self.current = Some(position);
        Ok(position)
    }

    async fn move_abs(&mut self, target: f64) -> Result<()> {
        let clamped = self.bounds.clamp(target);
        let raw = self.scaling.to_device(clamped);
        self.device.set_phase(raw).await?;
        self.target = Some(clamped);
        // Phase writes are synchronous, so the device is at the target once
        // set_phase returns.
        self.current = Some(clamped);
        debug!(position = clamped, raw, "phase set");
        Ok(())
    }

    async fn move_rel(&mut self, delta: f64) -> Result<()> {
        let current = match self.current {
            Some(position) => position,
            None => self.position().await?,
        };
        self.move_abs(current + delta).await
    }

    async fn move_home(&mut self) -> Result<()> {
        // The SR542 has no home/reference operation.
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.device.stop().await?;
        // Store only; dispatching would issue a second stop
        self.settings.set("run", SettingValue::Bool(false))?;
        Ok(())
    }

    async fn commit_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        self.settings.set(name, value)?;
        self.apply(name).await
    }

    async fn close(&mut self) -> Result<()> {
        self.device.disconnect().await
    }

    fn axis(&self) -> &'static str {
        "Phase"
    }

    fn units(&self) -> &'static str {
        "deg"
    }
}

/// Settings table of the SR542 plugin, in application order.
fn default_settings(config: &PluginConfig, com_ports: &[String]) -> Settings {
    let initial_port = config
        .port
        .clone()
        .or_else(|| com_ports.first().cloned())
        .unwrap_or_default();

    let mut port_choices: Vec<&str> = com_ports.iter().map(String::as_str).collect();
    if !port_choices.contains(&initial_port.as_str()) {
        port_choices.push(&initial_port);
    }

    Settings::new(vec![
        Setting::choice("com_port", "COM port:", &port_choices, &initial_port),
        Setting::choice("source", "Source:", Source::CHOICES, "internal"),
        // Dependent settings start consistent with source = internal
        Setting::choice("edge", "Edge:", SyncEdge::CHOICES, "rise").hidden(),
        Setting::float_range("internal_freq", "Internal Frequency:", 100.0, 0.01, 10_000.0),
        Setting::int_min("n", "Multiplier n:", 1, 1),
        Setting::int_min("m", "Multiplier m:", 1, 1),
        Setting::choice("control", "Control:", ControlTarget::CHOICES, "outer"),
        Setting::flag("run", "Run/Stop", false),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::MockChopper;
    use crate::settings::Constraints;

    fn config_with_port(port: &str) -> PluginConfig {
        PluginConfig {
            port: Some(port.to_string()),
            ..PluginConfig::default()
        }
    }

    #[test]
    fn settings_table_order_and_initial_visibility() {
        let actuator = Sr542Actuator::with_ports(
            MockChopper::new(),
            &config_with_port("COM7"),
            vec!["COM7".to_string()],
        );

        assert_eq!(
            actuator.settings().names(),
            ["com_port", "source", "edge", "internal_freq", "n", "m", "control", "run"]
        );
        assert!(!actuator.settings().is_visible("edge"));
        assert!(actuator.settings().is_visible("internal_freq"));
    }

    #[test]
    fn com_port_falls_back_to_first_enumerated() {
        let config = PluginConfig::default();
        let actuator = Sr542Actuator::with_ports(
            MockChopper::new(),
            &config,
            vec!["COM3".to_string(), "COM7".to_string()],
        );
        assert_eq!(actuator.settings().choice("com_port").unwrap(), "COM3");
    }

    #[test]
    fn configured_port_is_added_to_choices() {
        let actuator = Sr542Actuator::with_ports(
            MockChopper::new(),
            &config_with_port("/dev/ttyUSB9"),
            vec!["COM3".to_string()],
        );
        assert_eq!(
            actuator.settings().choice("com_port").unwrap(),
            "/dev/ttyUSB9"
        );
        // The configured port is selectable even when not enumerated
        match actuator.settings().get("com_port").unwrap().constraints() {
            Constraints::Choices(choices) => {
                assert!(choices.iter().any(|c| c == "/dev/ttyUSB9"));
            }
            other => panic!("unexpected constraints: {other:?}"),
        }
    }

    #[tokio::test]
    async fn axis_metadata() {
        let actuator = Sr542Actuator::with_ports(
            MockChopper::new(),
            &config_with_port("COM7"),
            vec!["COM7".to_string()],
        );
        assert_eq!(actuator.axis(), "Phase");
        assert_eq!(actuator.units(), "deg");
        assert!(actuator.epsilon() > 0.0);
    }
}
