use measurements::Length;

use crate::physics::Shape;
use crate::tank::Tank;

#[derive(Debug, Clone, Copy)]
pub struct CylindricalTank {
  diameter: Length,
  height: Length,
}

impl CylindricalTank {
  pub fn new(diameter: Length, height: Length) -> Self {
    Self { diameter, height }
  }

  pub fn diameter(&self) -> Length {
    self.diameter
  }
}

impl Tank for CylindricalTank {
  fn height(&self) -> Length {
    self.height
  }

  fn shape(&self) -> Shape {
    Shape::Cylindrical { diameter: self.diameter.as_millimeters() }
  }
}
