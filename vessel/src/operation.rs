use log::debug;
use thiserror::Error;

use crate::event::TankEvent;
use crate::state::TankState;
use crate::validation::{validate_operation, Operation, ValidationIssue};

#[derive(Debug, Error, PartialEq)]
#[error("{operation} of {amount} l rejected for tank '{tank_id}': {}", list(.errors))]
pub struct OperationRejected {
  pub tank_id: String,
  pub operation: Operation,
  pub amount: f64,
  pub errors: Vec<ValidationIssue>,
}

fn list(issues: &[ValidationIssue]) -> String {
  issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Outcome of an accepted operation: the new snapshot, the event to log
/// and any warnings raised during validation.
#[derive(Debug, Clone)]
pub struct Applied {
  pub tank: TankState,
  pub event: TankEvent,
  pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone)]
pub struct Transfer {
  pub source: Applied,
  pub target: Applied,
}

/// Validates `operation` and returns the resulting snapshot.
///
/// `tank` itself is left untouched; persisting the new state and the event
/// is up to the caller.
pub fn apply(operation: Operation, tank: &TankState, amount: f64, operator: Option<&str>) -> Result<Applied, OperationRejected> {
  let result = validate_operation(operation, tank, amount, None);

  if !result.is_valid() {
    debug!("Rejected {} of {} l for tank '{}'", operation, amount, tank.id);

    return Err(OperationRejected {
      tank_id: tank.id.clone(),
      operation,
      amount,
      errors: result.errors,
    })
  }

  Ok(applied(operation, tank, amount, operator, result.warnings))
}

/// Moves `amount` liters from `source` to `target`, validating both sides.
pub fn transfer(source: &TankState, target: &TankState, amount: f64, operator: Option<&str>) -> Result<Transfer, OperationRejected> {
  let outbound = validate_operation(Operation::TransferOut, source, amount, Some(target));
  if !outbound.is_valid() {
    return Err(OperationRejected {
      tank_id: source.id.clone(),
      operation: Operation::TransferOut,
      amount,
      errors: outbound.errors,
    })
  }

  let inbound = validate_operation(Operation::TransferIn, target, amount, None);
  if !inbound.is_valid() {
    return Err(OperationRejected {
      tank_id: target.id.clone(),
      operation: Operation::TransferIn,
      amount,
      errors: inbound.errors,
    })
  }

  Ok(Transfer {
    source: applied(Operation::TransferOut, source, amount, operator, outbound.warnings),
    target: applied(Operation::TransferIn, target, amount, operator, inbound.warnings),
  })
}

fn applied(operation: Operation, tank: &TankState, amount: f64, operator: Option<&str>, warnings: Vec<ValidationIssue>) -> Applied {
  let new_volume = if operation.is_inbound() {
    tank.current_volume + amount
  } else {
    tank.current_volume - amount
  };

  let event = TankEvent::volume_change(&tank.id, tank.current_volume, new_volume)
    .operator(operator)
    .metadata("operation", operation.as_str())
    .metadata("amount", amount)
    .build();

  Applied { tank: tank.with_volume(new_volume), event, warnings }
}
