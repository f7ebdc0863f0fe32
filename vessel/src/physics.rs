//! Height/volume conversion and density correction.
//!
//! Heights and cross-section dimensions are in millimeters, volumes in the
//! liters used by the gauging tables, densities in kg/m³. None of these
//! functions validate their input; a tank configuration should pass
//! [`validate_configuration`](crate::validate_configuration) first.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Volumetric expansion of petroleum products per °C.
pub const THERMAL_EXPANSION_COEFFICIENT: f64 = 0.0007;

const VOLUME_SCALE: f64 = 1000.0;

/// Horizontal cross-section of an upright tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
  Cylindrical { diameter: f64 },
  /// A `length` of `1.0` gives the per-unit-length volume of a
  /// width-only section.
  Rectangular { width: f64, length: f64 },
}

impl Shape {
  /// Cross-sectional area in mm².
  pub fn area(&self) -> f64 {
    match *self {
      Shape::Cylindrical { diameter } => PI * (diameter / 2.0).powi(2),
      Shape::Rectangular { width, length } => width * length,
    }
  }
}

pub fn volume_from_height(height: f64, shape: Shape) -> f64 {
  (shape.area() * height / VOLUME_SCALE).round()
}

pub fn height_from_volume(volume: f64, shape: Shape) -> f64 {
  (volume * VOLUME_SCALE / shape.area()).round()
}

pub fn density_at_temperature(base_density: f64, base_temperature: f64, current_temperature: f64) -> f64 {
  let correction = 1.0 - THERMAL_EXPANSION_COEFFICIENT * (current_temperature - base_temperature);
  round_to(base_density * correction, 2)
}

/// Mass in kilograms of `volume` liters at `density` kg/m³.
pub fn mass(volume: f64, density: f64) -> f64 {
  round_to(volume * density / 1000.0, 2)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round() / factor
}
