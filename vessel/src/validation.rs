use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{TankState, TankStatus};

const NEARLY_FULL_PERCENTAGE: f64 = 95.0;
const LOADING_CEILING_RATIO: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
  Loading,
  Unloading,
  TransferIn,
  TransferOut,
}

impl Operation {
  pub fn as_str(&self) -> &'static str {
    match self {
      Operation::Loading => "loading",
      Operation::Unloading => "unloading",
      Operation::TransferIn => "transfer_in",
      Operation::TransferOut => "transfer_out",
    }
  }

  /// Whether the operation adds fuel to the tank it is applied to.
  pub fn is_inbound(&self) -> bool {
    matches!(self, Operation::Loading | Operation::TransferIn)
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operation '{0}', expected one of loading, unloading, transfer_in, transfer_out")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
  type Err = UnknownOperation;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "loading" => Ok(Operation::Loading),
      "unloading" => Ok(Operation::Unloading),
      "transfer_in" => Ok(Operation::TransferIn),
      "transfer_out" => Ok(Operation::TransferOut),
      other => Err(UnknownOperation(other.to_owned())),
    }
  }
}

/// A single finding of a validation run, either blocking or advisory
/// depending on which list of [`ValidationResult`] it ends up in.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
  #[error("tank name is required")]
  MissingName,
  #[error("capacity must be greater than zero, got {capacity} l")]
  NonPositiveCapacity { capacity: f64 },
  #[error("current volume cannot be negative, got {volume} l")]
  NegativeVolume { volume: f64 },
  #[error("minimum volume cannot be negative, got {volume} l")]
  NegativeMinVolume { volume: f64 },
  #[error("current volume {volume} l exceeds capacity {capacity} l")]
  VolumeExceedsCapacity { volume: f64, capacity: f64 },
  #[error("minimum volume {volume} l exceeds capacity {capacity} l")]
  MinVolumeExceedsCapacity { volume: f64, capacity: f64 },
  #[error("maximum volume {volume} l exceeds capacity {capacity} l")]
  MaxVolumeExceedsCapacity { volume: f64, capacity: f64 },
  #[error("safety margin must be within 0 % and 100 %, got {percent} %")]
  InvalidSafetyMargin { percent: f64 },
  #[error("volume {volume} l is below the minimum of {min_volume} l")]
  BelowMinimum { volume: f64, min_volume: f64 },
  #[error("tank is nearly full at {percentage:.1} %")]
  NearlyFull { percentage: f64 },
  #[error("amount must be greater than zero, got {amount} l")]
  NonPositiveAmount { amount: f64 },
  #[error("tank status '{status}' does not allow operations")]
  UnavailableTank { status: TankStatus },
  #[error("resulting volume {volume} l would exceed capacity {capacity} l")]
  WouldExceedCapacity { volume: f64, capacity: f64 },
  #[error("resulting volume {volume} l would exceed the safe maximum of {max_volume} l")]
  AboveSafeMaximum { volume: f64, max_volume: f64 },
  #[error("resulting volume {volume} l would be negative")]
  WouldBeNegative { volume: f64 },
  #[error("target tank '{tank_id}' would exceed capacity: {volume} l of {capacity} l")]
  TargetWouldExceedCapacity { tank_id: String, volume: f64, capacity: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
  pub errors: Vec<ValidationIssue>,
  pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  fn error(&mut self, issue: ValidationIssue) {
    trace!("Validation error: {}", issue);
    self.errors.push(issue);
  }

  fn warning(&mut self, issue: ValidationIssue) {
    trace!("Validation warning: {}", issue);
    self.warnings.push(issue);
  }
}

/// Checks a tank snapshot against the volume invariants.
///
/// Warnings never make the result invalid; whether to proceed on them is up
/// to the caller.
pub fn validate_configuration(tank: &TankState) -> ValidationResult {
  let mut result = ValidationResult::default();

  if tank.name.trim().is_empty() {
    result.error(ValidationIssue::MissingName);
  }

  if tank.capacity <= 0.0 {
    result.error(ValidationIssue::NonPositiveCapacity { capacity: tank.capacity });
  }

  if tank.current_volume < 0.0 {
    result.error(ValidationIssue::NegativeVolume { volume: tank.current_volume });
  }

  if tank.min_volume < 0.0 {
    result.error(ValidationIssue::NegativeMinVolume { volume: tank.min_volume });
  }

  if tank.current_volume > tank.capacity {
    result.error(ValidationIssue::VolumeExceedsCapacity { volume: tank.current_volume, capacity: tank.capacity });
  }

  if tank.min_volume > tank.capacity {
    result.error(ValidationIssue::MinVolumeExceedsCapacity { volume: tank.min_volume, capacity: tank.capacity });
  }

  if let Some(max_volume) = tank.max_volume {
    if max_volume > tank.capacity {
      result.error(ValidationIssue::MaxVolumeExceedsCapacity { volume: max_volume, capacity: tank.capacity });
    }
  }

  if let Some(percent) = tank.safety_margin_percent {
    if !(0.0..100.0).contains(&percent) {
      result.error(ValidationIssue::InvalidSafetyMargin { percent });
    }
  }

  if tank.current_volume < tank.min_volume {
    result.warning(ValidationIssue::BelowMinimum { volume: tank.current_volume, min_volume: tank.min_volume });
  }

  let percentage = tank.fill_percentage();
  if percentage > NEARLY_FULL_PERCENTAGE {
    result.warning(ValidationIssue::NearlyFull { percentage });
  }

  result
}

/// Checks whether `operation` of `amount` liters may be applied to `tank`.
///
/// `target` is only consulted for [`Operation::TransferOut`]. An invalid
/// result means the operation must not be applied.
pub fn validate_operation(operation: Operation, tank: &TankState, amount: f64, target: Option<&TankState>) -> ValidationResult {
  let mut result = ValidationResult::default();

  if amount <= 0.0 {
    result.error(ValidationIssue::NonPositiveAmount { amount });
  }

  if !tank.status.accepts_operations() {
    result.error(ValidationIssue::UnavailableTank { status: tank.status });
  }

  let added = tank.current_volume + amount;
  let removed = tank.current_volume - amount;

  match operation {
    Operation::Loading => {
      if added > tank.capacity {
        result.error(ValidationIssue::WouldExceedCapacity { volume: added, capacity: tank.capacity });
      }

      let max_volume = tank.max_volume.unwrap_or(tank.capacity * LOADING_CEILING_RATIO);
      if added > max_volume {
        result.warning(ValidationIssue::AboveSafeMaximum { volume: added, max_volume });
      }
    },
    Operation::Unloading => {
      if removed < 0.0 {
        result.error(ValidationIssue::WouldBeNegative { volume: removed });
      }

      if removed < tank.min_volume {
        result.warning(ValidationIssue::BelowMinimum { volume: removed, min_volume: tank.min_volume });
      }
    },
    Operation::TransferIn => {
      if added > tank.capacity {
        result.error(ValidationIssue::WouldExceedCapacity { volume: added, capacity: tank.capacity });
      }
    },
    Operation::TransferOut => {
      if removed < tank.min_volume {
        result.error(ValidationIssue::BelowMinimum { volume: removed, min_volume: tank.min_volume });
      }

      if let Some(target) = target {
        let target_volume = target.current_volume + amount;
        if target_volume > target.capacity {
          result.error(ValidationIssue::TargetWouldExceedCapacity {
            tank_id: target.id.clone(),
            volume: target_volume,
            capacity: target.capacity,
          });
        }
      }
    },
  }

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tank(current: f64) -> TankState {
    TankState::new("T1", 1000.0, current, 50.0).with_name("Diesel")
  }

  #[test]
  fn valid_configuration() {
    let result = validate_configuration(&tank(500.0));
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
  }

  #[test]
  fn missing_name_and_overfilled() {
    let result = validate_configuration(&tank(1200.0).with_name(""));
    assert!(!result.is_valid());
    assert!(result.errors.contains(&ValidationIssue::MissingName));
    assert!(result.errors.contains(&ValidationIssue::VolumeExceedsCapacity { volume: 1200.0, capacity: 1000.0 }));
  }

  #[test]
  fn every_configuration_error() {
    let mut state = TankState::new("T1", 0.0, -1.0, -1.0).with_max_volume(10.0).with_safety_margin(100.0);
    state.name = "  ".into();

    let result = validate_configuration(&state);
    assert_eq!(result.errors, vec![
      ValidationIssue::MissingName,
      ValidationIssue::NonPositiveCapacity { capacity: 0.0 },
      ValidationIssue::NegativeVolume { volume: -1.0 },
      ValidationIssue::NegativeMinVolume { volume: -1.0 },
      ValidationIssue::MaxVolumeExceedsCapacity { volume: 10.0, capacity: 0.0 },
      ValidationIssue::InvalidSafetyMargin { percent: 100.0 },
    ]);
  }

  #[test]
  fn minimum_above_capacity() {
    let state = TankState::new("T1", 1000.0, 500.0, 1500.0);
    let result = validate_configuration(&state);
    assert!(result.errors.contains(&ValidationIssue::MinVolumeExceedsCapacity { volume: 1500.0, capacity: 1000.0 }));
  }

  #[test]
  fn configuration_warnings_do_not_invalidate() {
    let result = validate_configuration(&tank(20.0));
    assert!(result.is_valid());
    assert_eq!(result.warnings, vec![ValidationIssue::BelowMinimum { volume: 20.0, min_volume: 50.0 }]);

    let result = validate_configuration(&tank(980.0));
    assert!(result.is_valid());
    assert!(matches!(result.warnings[..], [ValidationIssue::NearlyFull { .. }]));
  }

  #[test]
  fn unloading_below_zero() {
    let result = validate_operation(Operation::Unloading, &tank(100.0), 200.0, None);
    assert!(!result.is_valid());
    assert!(result.errors.contains(&ValidationIssue::WouldBeNegative { volume: -100.0 }));
  }

  #[test]
  fn unloading_below_minimum_is_a_warning() {
    let result = validate_operation(Operation::Unloading, &tank(100.0), 70.0, None);
    assert!(result.is_valid());
    assert_eq!(result.warnings, vec![ValidationIssue::BelowMinimum { volume: 30.0, min_volume: 50.0 }]);
  }

  #[test]
  fn loading() {
    assert!(validate_operation(Operation::Loading, &tank(500.0), 400.0, None) == ValidationResult::default());

    let result = validate_operation(Operation::Loading, &tank(500.0), 460.0, None);
    assert!(result.is_valid());
    assert_eq!(result.warnings, vec![ValidationIssue::AboveSafeMaximum { volume: 960.0, max_volume: 950.0 }]);

    let result = validate_operation(Operation::Loading, &tank(500.0), 501.0, None);
    assert!(!result.is_valid());
  }

  #[test]
  fn loading_above_explicit_max_volume() {
    let tank = tank(500.0).with_max_volume(800.0);

    let result = validate_operation(Operation::Loading, &tank, 350.0, None);
    assert!(result.is_valid());
    assert_eq!(result.warnings, vec![ValidationIssue::AboveSafeMaximum { volume: 850.0, max_volume: 800.0 }]);

    assert!(validate_operation(Operation::Loading, &tank, 300.0, None).warnings.is_empty());
  }

  #[test]
  fn amount_must_be_positive() {
    let result = validate_operation(Operation::Loading, &tank(500.0), 0.0, None);
    assert_eq!(result.errors, vec![ValidationIssue::NonPositiveAmount { amount: 0.0 }]);
  }

  #[test]
  fn status_gates_operations() {
    let filling = tank(500.0).with_status(TankStatus::Filling);
    assert!(validate_operation(Operation::Loading, &filling, 100.0, None).is_valid());

    let maintenance = tank(500.0).with_status(TankStatus::Maintenance);
    let result = validate_operation(Operation::Loading, &maintenance, 100.0, None);
    assert_eq!(result.errors, vec![ValidationIssue::UnavailableTank { status: TankStatus::Maintenance }]);
  }

  #[test]
  fn transfers() {
    assert!(!validate_operation(Operation::TransferIn, &tank(900.0), 200.0, None).is_valid());
    assert!(validate_operation(Operation::TransferIn, &tank(700.0), 200.0, None).is_valid());

    let result = validate_operation(Operation::TransferOut, &tank(100.0), 60.0, None);
    assert_eq!(result.errors, vec![ValidationIssue::BelowMinimum { volume: 40.0, min_volume: 50.0 }]);

    let target = TankState::new("T2", 500.0, 450.0, 0.0);
    let result = validate_operation(Operation::TransferOut, &tank(600.0), 100.0, Some(&target));
    assert_eq!(result.errors, vec![ValidationIssue::TargetWouldExceedCapacity {
      tank_id: "T2".into(),
      volume: 550.0,
      capacity: 500.0,
    }]);
  }

  #[test]
  fn parse_operation() {
    assert_eq!("transfer_out".parse::<Operation>(), Ok(Operation::TransferOut));
    assert_eq!("drain".parse::<Operation>(), Err(UnknownOperation("drain".into())));
  }

  #[test]
  fn issues_read_as_sentences() {
    assert_eq!(ValidationIssue::MissingName.to_string(), "tank name is required");
    assert_eq!(
      ValidationIssue::VolumeExceedsCapacity { volume: 1200.0, capacity: 1000.0 }.to_string(),
      "current volume 1200 l exceeds capacity 1000 l",
    );
  }
}
