use measurements::{Length, Volume};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
  pub(crate) height: Length,
  pub(crate) volume: Volume,
  pub(crate) percentage: f64,
}

impl Level {
  pub fn height(&self) -> Length {
    self.height
  }

  pub fn volume(&self) -> Volume {
    self.volume
  }

  /// Fill ratio between `0.0` and `1.0`.
  pub fn percentage(&self) -> f64 {
    self.percentage
  }
}

impl From<Level> for f64 {
  fn from(level: Level) -> Self {
    level.percentage
  }
}

impl From<Level> for Volume {
  fn from(level: Level) -> Self {
    level.volume
  }
}
