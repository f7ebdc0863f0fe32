use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
  VolumeChange,
  StatusChange,
  Maintenance,
  Calibration,
  Alert,
}

/// Audit record of something that happened to a tank.
///
/// Built once at the moment of the triggering action. The fields are only
/// readable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankEvent {
  id: Uuid,
  tank_id: String,
  event_type: EventType,
  timestamp: DateTime<Utc>,
  description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  old_value: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  new_value: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  operator_id: Option<String>,
  #[serde(default)]
  metadata: Map<String, Value>,
}

impl TankEvent {
  pub fn builder(tank_id: impl Into<String>, event_type: EventType, description: impl Into<String>) -> TankEventBuilder {
    TankEventBuilder {
      event: TankEvent {
        id: Uuid::new_v4(),
        tank_id: tank_id.into(),
        event_type,
        timestamp: Utc::now(),
        description: description.into(),
        old_value: None,
        new_value: None,
        operator_id: None,
        metadata: Map::new(),
      },
    }
  }

  pub fn volume_change(tank_id: impl Into<String>, old_volume: f64, new_volume: f64) -> TankEventBuilder {
    let delta = new_volume - old_volume;
    let description = if delta >= 0.0 {
      format!("Volume increased by {:.0} l", delta)
    } else {
      format!("Volume decreased by {:.0} l", -delta)
    };

    Self::builder(tank_id, EventType::VolumeChange, description).values(old_volume, new_volume)
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn tank_id(&self) -> &str {
    &self.tank_id
  }

  pub fn event_type(&self) -> EventType {
    self.event_type
  }

  pub fn timestamp(&self) -> DateTime<Utc> {
    self.timestamp
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn old_value(&self) -> Option<&Value> {
    self.old_value.as_ref()
  }

  pub fn new_value(&self) -> Option<&Value> {
    self.new_value.as_ref()
  }

  pub fn operator_id(&self) -> Option<&str> {
    self.operator_id.as_deref()
  }

  pub fn metadata(&self) -> &Map<String, Value> {
    &self.metadata
  }
}

#[derive(Debug)]
pub struct TankEventBuilder {
  event: TankEvent,
}

impl TankEventBuilder {
  pub fn values(mut self, old_value: impl Into<Value>, new_value: impl Into<Value>) -> Self {
    self.event.old_value = Some(old_value.into());
    self.event.new_value = Some(new_value.into());
    self
  }

  pub fn new_value(mut self, new_value: impl Into<Value>) -> Self {
    self.event.new_value = Some(new_value.into());
    self
  }

  pub fn operator(mut self, operator_id: Option<&str>) -> Self {
    self.event.operator_id = operator_id.map(str::to_owned);
    self
  }

  pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.event.metadata.insert(key.into(), value.into());
    self
  }

  pub fn build(self) -> TankEvent {
    self.event
  }
}
