use serde::Serialize;
use vessel::{evaluate, time_to_empty, validate_configuration, DepletionForecast, Level, SafetyCheckResult, TankEvent, TankState, ValidationIssue};

use crate::fleet::Fleet;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankReport {
  pub id: String,
  pub name: String,
  pub fill_percentage: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fill_height_mm: Option<f64>,
  #[serde(flatten)]
  pub safety: SafetyCheckResult,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub alert: Option<TankEvent>,
}

impl TankReport {
  pub fn new(tank: &TankState) -> Self {
    let safety = evaluate(tank);

    Self {
      id: tank.id.clone(),
      name: tank.name.clone(),
      fill_percentage: round1(tank.fill_percentage()),
      fill_height_mm: tank.fill_height().map(|height| round1(height.as_millimeters())),
      alert: safety.alert_event(tank),
      safety,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ConfigurationReport {
  pub id: String,
  pub valid: bool,
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
}

impl ConfigurationReport {
  pub fn new(tank: &TankState) -> Self {
    let result = validate_configuration(tank);

    Self {
      id: tank.id.clone(),
      valid: result.is_valid(),
      errors: messages(&result.errors),
      warnings: messages(&result.warnings),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
  pub id: String,
  pub message: String,
  #[serde(flatten)]
  pub forecast: DepletionForecast,
}

pub fn forecasts(fleet: &Fleet) -> Vec<ForecastReport> {
  fleet
    .tanks
    .iter()
    .filter_map(|tank| {
      let rate = tank.consumption_rate?;
      let forecast = time_to_empty(tank.state.current_volume, tank.state.min_volume, rate);

      Some(ForecastReport { id: tank.state.id.clone(), message: forecast.recommendation.to_string(), forecast })
    })
    .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReport {
  pub fill_height: f64,
  pub volume: f64,
  pub percentage: f64,
}

impl From<Level> for LevelReport {
  fn from(level: Level) -> Self {
    Self {
      fill_height: round1(level.height().as_millimeters()),
      volume: round1(level.volume().as_liters()),
      percentage: round1(level.percentage() * 100.0),
    }
  }
}

pub fn messages(issues: &[ValidationIssue]) -> Vec<String> {
  issues.iter().map(ToString::to_string).collect()
}

fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
  use measurements::Length;
  use vessel::{CylindricalTank, Gauge, Outlook, SafetyLevel, Shape};

  use super::*;
  use crate::fleet::FleetTank;

  #[test]
  fn status_report_carries_alert() {
    let report = TankReport::new(&TankState::new("T", 1000.0, 150.0, 50.0));

    assert_eq!(report.safety.level, SafetyLevel::Warning);
    assert_eq!(report.fill_percentage, 15.0);
    assert!(report.alert.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["level"], "warning");
  }

  #[test]
  fn status_report_fill_height() {
    let tank = TankState::new("D1", 30_000.0, 4_200.0, 1_500.0).with_shape(Shape::Cylindrical { diameter: 2500.0 });
    let report = TankReport::new(&tank);

    // 4200 l over π · 1250² mm²
    assert_eq!(report.fill_height_mm, Some(855.6));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["fillHeightMm"], 855.6);
    assert!(json.get("fillHeight").is_none());

    assert_eq!(TankReport::new(&TankState::new("X", 1000.0, 500.0, 50.0)).fill_height_mm, None);
  }

  #[test]
  fn configuration_report_messages() {
    let report = ConfigurationReport::new(&TankState::new("T", 1000.0, 1200.0, 50.0).with_name(""));

    assert!(!report.valid);
    assert_eq!(report.errors[0], "tank name is required");
  }

  #[test]
  fn forecasts_skip_tanks_without_rate() {
    let fleet = Fleet {
      tanks: vec![
        FleetTank { state: TankState::new("A", 10_000.0, 5_000.0, 1_000.0), consumption_rate: Some(100.0) },
        FleetTank { state: TankState::new("B", 10_000.0, 5_000.0, 1_000.0), consumption_rate: None },
      ],
    };

    let reports = forecasts(&fleet);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].forecast.hours, 40.0);
    assert_eq!(reports[0].forecast.recommendation, Outlook::Within3Days);
  }

  #[test]
  fn level_report() {
    let tank = CylindricalTank::new(Length::from_millimeters(1000.0), Length::from_millimeters(2000.0));
    let level = Gauge::new(Length::from_millimeters(40.0)).level(&tank, Length::from_millimeters(1040.0));

    let report = LevelReport::from(level);
    assert_eq!(report.fill_height, 1000.0);
    assert_eq!(report.percentage, 50.0);
    assert_eq!(report.volume, 785.4);
  }
}
