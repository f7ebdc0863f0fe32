//! Distribution of a delivery across several tanks.

use std::fmt;

use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::state::TankState;

const CRITICALLY_LOW_PERCENTAGE: f64 = 20.0;
const LOW_PERCENTAGE: f64 = 50.0;
const HIGH_PRIORITY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingReason {
  CriticallyLow,
  Low,
  HighPriority,
  Routine,
}

impl LoadingReason {
  fn for_tank(tank: &TankState) -> Self {
    let percentage = tank.fill_percentage();

    if percentage < CRITICALLY_LOW_PERCENTAGE {
      LoadingReason::CriticallyLow
    } else if percentage < LOW_PERCENTAGE {
      LoadingReason::Low
    } else if tank.priority > HIGH_PRIORITY {
      LoadingReason::HighPriority
    } else {
      LoadingReason::Routine
    }
  }
}

impl fmt::Display for LoadingReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      LoadingReason::CriticallyLow => "critically low level",
      LoadingReason::Low => "low level, needs replenishment",
      LoadingReason::HighPriority => "high priority",
      LoadingReason::Routine => "routine replenishment",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingAllocation {
  pub tank_id: String,
  pub recommended_volume: f64,
  pub priority: u32,
  pub reason: LoadingReason,
}

/// Plans how to unload `available_volume` liters across `tanks`.
///
/// Tanks are served by descending priority, emptier tanks first among equal
/// priority, each receiving as much as fits. This is a single greedy pass;
/// it never revisits an earlier tank. Tanks that receive nothing are left
/// out of the plan.
pub fn optimize_loading_sequence(tanks: &[TankState], available_volume: f64) -> Vec<LoadingAllocation> {
  let mut order: Vec<&TankState> = tanks.iter().collect();
  order.sort_by(|a, b| {
    b.priority
      .cmp(&a.priority)
      .then_with(|| OrderedFloat(a.fill_percentage()).cmp(&OrderedFloat(b.fill_percentage())))
  });

  let mut remaining = available_volume;
  let mut plan = Vec::new();

  for tank in order {
    if remaining <= 0.0 {
      break
    }

    let allocated = tank.free_space().min(remaining);
    if allocated <= 0.0 {
      continue
    }

    let reason = LoadingReason::for_tank(tank);
    debug!("Allocating {:.0} l to tank '{}' ({})", allocated, tank.id, reason);

    plan.push(LoadingAllocation {
      tank_id: tank.id.clone(),
      recommended_volume: allocated,
      priority: tank.priority,
      reason,
    });

    remaining -= allocated;
  }

  plan
}
