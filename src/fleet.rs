use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use vessel::TankState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetTank {
  #[serde(flatten)]
  pub state: TankState,
  /// Average consumption in liters per hour.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub consumption_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
  pub tanks: Vec<FleetTank>,
}

impl Fleet {
  pub fn load(path: &Path) -> Result<Self> {
    let contents = fs::read_to_string(path).with_context(|| format!("failed to read fleet from {}", path.display()))?;
    let fleet = Self::parse(&contents).with_context(|| format!("invalid fleet in {}", path.display()))?;

    info!("Loaded {} tanks from {}", fleet.tanks.len(), path.display());

    Ok(fleet)
  }

  pub fn parse(contents: &str) -> Result<Self> {
    Ok(serde_json::from_str(contents)?)
  }

  pub fn states(&self) -> Vec<TankState> {
    self.tanks.iter().map(|tank| tank.state.clone()).collect()
  }

  pub fn find(&self, id: &str) -> Result<&TankState> {
    self.tanks
      .iter()
      .map(|tank| &tank.state)
      .find(|state| state.id == id)
      .with_context(|| format!("no tank with id '{}' in fleet", id))
  }
}
