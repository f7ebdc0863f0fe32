use measurements::{Length, Volume};

use crate::level::Level;
use crate::physics::Shape;

pub(crate) const CUBIC_MILLIMETERS_PER_LITER: f64 = 1_000_000.0;

/// An upright tank with a constant cross-section.
pub trait Tank {
  fn height(&self) -> Length;

  /// Cross-section in millimeters, as used by the gauging tables.
  fn shape(&self) -> Shape;

  fn cross_section_area(&self) -> f64 {
    self.shape().area()
  }

  fn volume(&self) -> Volume {
    self.volume_at(self.height())
  }

  fn volume_at(&self, filling_height: Length) -> Volume {
    Volume::from_liters(self.cross_section_area() * filling_height.as_millimeters() / CUBIC_MILLIMETERS_PER_LITER)
  }

  fn level(&self, filling_height: Length) -> Level {
    Level {
      height: filling_height,
      volume: self.volume_at(filling_height),
      percentage: filling_height / self.height(),
    }
  }
}
