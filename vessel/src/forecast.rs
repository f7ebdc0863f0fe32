use std::fmt;

use serde::{Deserialize, Serialize};

use crate::physics::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
  NoConsumptionData,
  WithinWorkDay,
  Within24Hours,
  Within3Days,
  Normal,
}

impl fmt::Display for Outlook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Outlook::NoConsumptionData => "cannot compute, no consumption data",
      Outlook::WithinWorkDay => "fuel will run out within the work day",
      Outlook::Within24Hours => "fuel will run out within 24 hours",
      Outlook::Within3Days => "schedule a delivery within 3 days",
      Outlook::Normal => "level normal",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionForecast {
  /// Hours until the minimum volume is reached, infinite without consumption.
  pub hours: f64,
  pub is_urgent: bool,
  pub recommendation: Outlook,
}

/// Estimates when `current_volume` drains down to `min_volume` at
/// `average_consumption_rate` liters per hour.
pub fn time_to_empty(current_volume: f64, min_volume: f64, average_consumption_rate: f64) -> DepletionForecast {
  if average_consumption_rate <= 0.0 {
    return DepletionForecast {
      hours: f64::INFINITY,
      is_urgent: false,
      recommendation: Outlook::NoConsumptionData,
    }
  }

  let hours = round_to((current_volume - min_volume) / average_consumption_rate, 1);

  let (is_urgent, recommendation) = if hours < 8.0 {
    (true, Outlook::WithinWorkDay)
  } else if hours < 24.0 {
    (true, Outlook::Within24Hours)
  } else if hours < 72.0 {
    (false, Outlook::Within3Days)
  } else {
    (false, Outlook::Normal)
  };

  DepletionForecast { hours, is_urgent, recommendation }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_consumption() {
    let forecast = time_to_empty(1000.0, 200.0, 0.0);
    assert_eq!(forecast.hours, f64::INFINITY);
    assert!(!forecast.is_urgent);
    assert_eq!(forecast.recommendation, Outlook::NoConsumptionData);
  }

  #[test]
  fn thresholds() {
    assert_eq!(time_to_empty(900.0, 200.0, 100.0), DepletionForecast {
      hours: 7.0,
      is_urgent: true,
      recommendation: Outlook::WithinWorkDay,
    });
    assert_eq!(time_to_empty(1000.0, 200.0, 100.0).recommendation, Outlook::Within24Hours);
    assert_eq!(time_to_empty(3000.0, 200.0, 100.0).recommendation, Outlook::Within3Days);
    assert!(!time_to_empty(3000.0, 200.0, 100.0).is_urgent);
    assert_eq!(time_to_empty(10000.0, 200.0, 100.0).recommendation, Outlook::Normal);
  }

  #[test]
  fn day_and_three_day_boundaries() {
    let day = time_to_empty(2600.0, 200.0, 100.0);
    assert_eq!(day.hours, 24.0);
    assert!(!day.is_urgent);
    assert_eq!(day.recommendation, Outlook::Within3Days);

    let just_under_day = time_to_empty(2590.0, 200.0, 100.0);
    assert_eq!(just_under_day.hours, 23.9);
    assert!(just_under_day.is_urgent);
    assert_eq!(just_under_day.recommendation, Outlook::Within24Hours);

    let three_days = time_to_empty(7400.0, 200.0, 100.0);
    assert_eq!(three_days.hours, 72.0);
    assert!(!three_days.is_urgent);
    assert_eq!(three_days.recommendation, Outlook::Normal);

    assert_eq!(time_to_empty(7390.0, 200.0, 100.0).recommendation, Outlook::Within3Days);
  }

  #[test]
  fn hours_rounded_to_one_decimal() {
    assert_eq!(time_to_empty(1000.0, 0.0, 300.0).hours, 3.3);
  }

  #[test]
  fn already_below_minimum_is_urgent() {
    let forecast = time_to_empty(100.0, 200.0, 50.0);
    assert_eq!(forecast.hours, -2.0);
    assert!(forecast.is_urgent);
  }
}
