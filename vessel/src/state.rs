use std::fmt;
use std::str::FromStr;

use measurements::Length;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::Shape;
use crate::tank::CUBIC_MILLIMETERS_PER_LITER;

pub const DEFAULT_SAFETY_MARGIN_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankStatus {
  #[default]
  Active,
  Inactive,
  Maintenance,
  Filling,
  Emptying,
}

impl TankStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      TankStatus::Active => "active",
      TankStatus::Inactive => "inactive",
      TankStatus::Maintenance => "maintenance",
      TankStatus::Filling => "filling",
      TankStatus::Emptying => "emptying",
    }
  }

  /// Whether fuel may be moved in or out of a tank in this status.
  pub fn accepts_operations(&self) -> bool {
    matches!(self, TankStatus::Active | TankStatus::Filling)
  }
}

impl fmt::Display for TankStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tank status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for TankStatus {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "active" => Ok(TankStatus::Active),
      "inactive" => Ok(TankStatus::Inactive),
      "maintenance" => Ok(TankStatus::Maintenance),
      "filling" => Ok(TankStatus::Filling),
      "emptying" => Ok(TankStatus::Emptying),
      other => Err(UnknownStatus(other.to_owned())),
    }
  }
}

/// Snapshot of a tank as supplied by the data layer.
///
/// Volumes are in liters. The invariants (`0 ≤ current_volume ≤ capacity`
/// and friends) are not enforced here; see
/// [`validate_configuration`](crate::validate_configuration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankState {
  pub id: String,
  #[serde(default)]
  pub name: String,
  pub capacity: f64,
  pub current_volume: f64,
  #[serde(default)]
  pub min_volume: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_volume: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub safety_margin_percent: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shape: Option<Shape>,
  #[serde(default)]
  pub status: TankStatus,
  #[serde(default)]
  pub priority: u32,
}

impl TankState {
  pub fn new(id: impl Into<String>, capacity: f64, current_volume: f64, min_volume: f64) -> Self {
    let id = id.into();
    Self {
      name: id.clone(),
      id,
      capacity,
      current_volume,
      min_volume,
      max_volume: None,
      safety_margin_percent: None,
      shape: None,
      status: TankStatus::Active,
      priority: 0,
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_max_volume(mut self, max_volume: f64) -> Self {
    self.max_volume = Some(max_volume);
    self
  }

  pub fn with_safety_margin(mut self, percent: f64) -> Self {
    self.safety_margin_percent = Some(percent);
    self
  }

  pub fn with_shape(mut self, shape: Shape) -> Self {
    self.shape = Some(shape);
    self
  }

  pub fn with_status(mut self, status: TankStatus) -> Self {
    self.status = status;
    self
  }

  pub fn with_priority(mut self, priority: u32) -> Self {
    self.priority = priority;
    self
  }

  pub fn fill_percentage(&self) -> f64 {
    self.current_volume / self.capacity * 100.0
  }

  pub fn safety_margin(&self) -> f64 {
    self.safety_margin_percent.unwrap_or(DEFAULT_SAFETY_MARGIN_PERCENT)
  }

  /// Ceiling above which loading risks an overflow.
  pub fn max_safe_volume(&self) -> f64 {
    self.max_volume.unwrap_or_else(|| self.capacity * (100.0 - self.safety_margin()) / 100.0)
  }

  pub fn free_space(&self) -> f64 {
    self.capacity - self.current_volume
  }

  /// Geometric fill height, if the tank geometry is known.
  ///
  /// Unlike [`height_from_volume`](crate::physics::height_from_volume),
  /// which works in gauging-table units, this matches
  /// [`Tank::level`](crate::Tank::level).
  pub fn fill_height(&self) -> Option<Length> {
    self
      .shape
      .map(|shape| Length::from_millimeters(self.current_volume * CUBIC_MILLIMETERS_PER_LITER / shape.area()))
  }

  pub(crate) fn with_volume(&self, current_volume: f64) -> Self {
    Self { current_volume, ..self.clone() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{CuboidTank, Tank};

  #[test]
  fn default_safe_ceiling() {
    let tank = TankState::new("T1", 1000.0, 500.0, 50.0);
    assert_eq!(tank.max_safe_volume(), 950.0);
    assert_eq!(tank.with_safety_margin(10.0).max_safe_volume(), 900.0);
  }

  #[test]
  fn explicit_max_volume_wins() {
    let tank = TankState::new("T1", 1000.0, 500.0, 50.0).with_safety_margin(10.0).with_max_volume(980.0);
    assert_eq!(tank.max_safe_volume(), 980.0);
  }

  #[test]
  fn fill_height_needs_shape() {
    let tank = TankState::new("T1", 1000.0, 500.0, 50.0);
    assert_eq!(tank.fill_height(), None);

    let tank = tank.with_shape(Shape::Rectangular { width: 1000.0, length: 2000.0 });
    let height = tank.fill_height().unwrap();
    assert!((height.as_millimeters() - 250.0).abs() < 1e-9);
  }

  #[test]
  fn fill_height_matches_tank_geometry() {
    let cuboid = CuboidTank::new(Length::from_millimeters(2000.0), Length::from_millimeters(1000.0), Length::from_millimeters(1000.0));
    let height = TankState::new("T1", 2000.0, 500.0, 50.0).with_shape(cuboid.shape()).fill_height().unwrap();

    assert!((cuboid.level(height).volume().as_liters() - 500.0).abs() < 1e-9);
  }

  #[test]
  fn deserialize_snapshot() {
    let tank: TankState = serde_json::from_str(
      r#"{"id":"A","name":"Diesel 1","capacity":20000,"currentVolume":8000,"minVolume":1000,"status":"filling","priority":3}"#,
    )
    .unwrap();

    assert_eq!(tank.status, TankStatus::Filling);
    assert_eq!(tank.priority, 3);
    assert_eq!(tank.max_volume, None);
    assert_eq!(tank.fill_percentage(), 40.0);
  }

  #[test]
  fn unknown_status_is_rejected_at_the_boundary() {
    let result = serde_json::from_str::<TankState>(r#"{"id":"A","capacity":1,"currentVolume":0,"status":"broken"}"#);
    assert!(result.is_err());
    assert_eq!("broken".parse::<TankStatus>(), Err(UnknownStatus("broken".into())));
  }
}
