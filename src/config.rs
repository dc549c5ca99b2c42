//! Plugin configuration using Figment.
//!
//! Configuration is loaded from:
//! 1. `config/sr542.toml` (base configuration)
//! 2. Environment variables (prefixed with `SR542_`)
//!
//! # Example
//! ```no_run
//! use daq_driver_sr542::config::PluginConfig;
//!
//! # fn main() -> Result<(), figment::Error> {
//! let config = PluginConfig::load()?;
//! println!("baud: {}", config.baud);
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ChopperError;
use crate::scaling::{AffineScaling, Bounds};

/// Top-level plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Preselected serial port; falls back to the first enumerated port.
    #[serde(default)]
    pub port: Option<String>,

    /// Serial baud rate (the SR542 serial profile runs at 115200).
    #[serde(default = "default_baud")]
    pub baud: u32,

    /// Affine mapping between user units and device raw units.
    #[serde(default)]
    pub scaling: AffineScaling,

    /// Travel bounds for move targets, in user units.
    #[serde(default)]
    pub bounds: Bounds,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_baud() -> u32 {
    115_200
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: default_baud(),
            scaling: AffineScaling::default(),
            bounds: Bounds::default(),
            log_level: default_log_level(),
        }
    }
}

impl PluginConfig {
    /// Load configuration from `config/sr542.toml` and environment
    /// variables.
    ///
    /// Environment variables override the file with prefix `SR542_`.
    /// Example: `SR542_BAUD=9600`.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from("config/sr542.toml")
    }

    /// Load configuration from a specific file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SR542_"))
            .extract()
    }

    /// Validate configuration after loading.
    pub fn validate(&self) -> Result<(), ChopperError> {
        if self.baud == 0 {
            return Err(ChopperError::Configuration(
                "baud rate must be non-zero".to_string(),
            ));
        }

        if self.scaling.scale == 0.0 {
            return Err(ChopperError::Configuration(
                "scaling.scale must be non-zero".to_string(),
            ));
        }

        if self.bounds.min >= self.bounds.max {
            return Err(ChopperError::Configuration(format!(
                "bounds [{}, {}] are inverted or empty",
                self.bounds.min, self.bounds.max
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(ChopperError::Configuration(format!(
                "invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}
