use measurements::Length;

use crate::physics::Shape;
use crate::tank::Tank;

#[derive(Debug, Clone, Copy)]
pub struct CuboidTank {
  length: Length,
  width: Length,
  height: Length,
}

impl CuboidTank {
  pub fn new(length: Length, width: Length, height: Length) -> Self {
    Self { length, width, height }
  }

  pub fn length(&self) -> Length {
    self.length
  }

  pub fn width(&self) -> Length {
    self.width
  }
}

impl Tank for CuboidTank {
  fn height(&self) -> Length {
    self.height
  }

  fn shape(&self) -> Shape {
    Shape::Rectangular { width: self.width.as_millimeters(), length: self.length.as_millimeters() }
  }
}
