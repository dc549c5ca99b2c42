//! Unit conversion between user-facing values and device raw values.
//!
//! The host framework lets users work in scaled units; the device only
//! understands its own raw phase field. [`AffineScaling`] maps between the
//! two, and [`Bounds`] clamps move targets to the configured travel range
//! before any scaling is applied.

use serde::{Deserialize, Serialize};

/// Affine mapping between user units and device raw units.
///
/// `device = user * scale + offset`. The inverse is exact up to floating
/// rounding, so a write followed by a read returns the written value
/// within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineScaling {
    /// Multiplicative factor (must be non-zero).
    pub scale: f64,
    /// Additive offset in device units.
    pub offset: f64,
}

impl Default for AffineScaling {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl AffineScaling {
    /// Map a user-facing value to device raw units.
    pub fn to_device(&self, user: f64) -> f64 {
        user * self.scale + self.offset
    }

    /// Map a device raw value back to user-facing units.
    pub fn to_user(&self, device: f64) -> f64 {
        (device - self.offset) / self.scale
    }
}

/// Inclusive travel bounds for move targets, in user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        // Phase is a rotational offset
        Self {
            min: 0.0,
            max: 360.0,
        }
    }
}

impl Bounds {
    /// Clamp a move target into the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}
