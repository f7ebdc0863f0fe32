use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::event::{EventType, TankEvent};
use crate::state::TankState;

const CRITICAL_PERCENTAGE: f64 = 10.0;
const LOW_PERCENTAGE: f64 = 20.0;
const HIGH_PERCENTAGE: f64 = 90.0;

/// Severity tiers, ordered from harmless to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
  Safe,
  Warning,
  Critical,
  Emergency,
}

impl fmt::Display for SafetyLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SafetyLevel::Safe => "safe",
      SafetyLevel::Warning => "warning",
      SafetyLevel::Critical => "critical",
      SafetyLevel::Emergency => "emergency",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheckResult {
  pub level: SafetyLevel,
  pub alerts: Vec<String>,
  pub recommendations: Vec<String>,
}

impl SafetyCheckResult {
  fn new(level: SafetyLevel, alerts: &[String], recommendations: &[&str]) -> Self {
    Self {
      level,
      alerts: alerts.to_vec(),
      recommendations: recommendations.iter().map(|r| (*r).to_owned()).collect(),
    }
  }

  pub fn safe() -> Self {
    Self::new(SafetyLevel::Safe, &[], &[])
  }

  pub fn is_safe(&self) -> bool {
    self.level == SafetyLevel::Safe
  }

  /// Alert event for the audit log, unless the tank is safe.
  pub fn alert_event(&self, tank: &TankState) -> Option<TankEvent> {
    if self.is_safe() {
      return None
    }

    let description = self.alerts.first().cloned().unwrap_or_else(|| format!("Tank level {}", self.level));

    Some(
      TankEvent::builder(&tank.id, EventType::Alert, description)
        .new_value(tank.current_volume)
        .metadata("level", self.level.to_string())
        .metadata("fillPercentage", tank.fill_percentage())
        .metadata("recommendations", self.recommendations.clone())
        .build(),
    )
  }
}

/// Classifies the fill state of `tank`.
///
/// Checks run top to bottom and the first match wins, so an empty tank is
/// an emergency even when its minimum is above 10 %.
pub fn evaluate(tank: &TankState) -> SafetyCheckResult {
  let percentage = tank.fill_percentage();

  let result = if tank.current_volume <= tank.min_volume {
    SafetyCheckResult::new(
      SafetyLevel::Emergency,
      &[format!("Tank practically empty: {:.0} l left, minimum is {:.0} l", tank.current_volume, tank.min_volume)],
      &["Stop dispensing immediately", "Schedule an urgent delivery"],
    )
  } else if percentage < CRITICAL_PERCENTAGE {
    SafetyCheckResult::new(
      SafetyLevel::Critical,
      &[format!("Critically low level: {:.1} %", percentage)],
      &["Order a delivery within 24 hours"],
    )
  } else if percentage < LOW_PERCENTAGE {
    SafetyCheckResult::new(
      SafetyLevel::Warning,
      &[format!("Low level: {:.1} %", percentage)],
      &["Schedule a delivery soon"],
    )
  } else if tank.current_volume >= tank.max_safe_volume() {
    SafetyCheckResult::new(
      SafetyLevel::Emergency,
      &[format!("Overflow risk: {:.0} l reaches the safe maximum of {:.0} l", tank.current_volume, tank.max_safe_volume())],
      &["Stop loading immediately", "Inspect the level-control systems"],
    )
  } else if percentage > HIGH_PERCENTAGE {
    SafetyCheckResult::new(
      SafetyLevel::Warning,
      &[format!("High level: {:.1} %", percentage)],
      &["Monitor loading carefully"],
    )
  } else {
    SafetyCheckResult::safe()
  };

  debug!("Tank '{}' at {:.1} % evaluated as {}", tank.id, percentage, result.level);

  result
}
