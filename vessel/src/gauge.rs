//! Ultrasonic level gauges mounted on top of a tank.

use measurements::Length;
use medianheap::MedianHeap;
use ordered_float::{FloatIsNan, NotNan};

use crate::level::Level;
use crate::tank::Tank;

#[derive(Debug, Clone, Copy)]
pub struct Gauge {
  sensor_offset: Length,
}

impl Gauge {
  /// `sensor_offset` is the distance between the sensor and the highest
  /// possible liquid surface.
  pub fn new(sensor_offset: Length) -> Self {
    Self { sensor_offset }
  }

  /// Fill height for a measured `distance` to the liquid surface.
  ///
  /// The distance is rounded to whole millimeters and clamped to the tank,
  /// so echoes from above the offset or below the bottom read as full or
  /// empty respectively.
  pub fn fill_height<T: Tank>(&self, tank: &T, distance: Length) -> Length {
    let millimeters = distance.as_millimeters().round();

    let mut distance = Length::from_millimeters(millimeters) - self.sensor_offset;

    if distance < Length::from_meters(0.0) {
      distance = Length::from_meters(0.0)
    } else if distance > tank.height() {
      distance = tank.height()
    }

    tank.height() - distance
  }

  pub fn level<T: Tank>(&self, tank: &T, distance: Length) -> Level {
    tank.level(self.fill_height(tank, distance))
  }
}

/// Bounded collection of distance readings, smoothing out stray echoes.
pub struct MedianFilter {
  heap: MedianHeap<NotNan<f64>>,
}

impl MedianFilter {
  pub fn with_max_size(max_size: usize) -> Self {
    Self { heap: MedianHeap::with_max_size(max_size) }
  }

  pub fn push(&mut self, reading: f64) -> Result<(), FloatIsNan> {
    self.heap.push(NotNan::new(reading)?);
    Ok(())
  }

  pub fn median(&self) -> Option<f64> {
    self.heap.median().map(NotNan::into_inner)
  }
}
