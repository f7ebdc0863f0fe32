//! Tank geometry, physics and safety rules for fuel storage tanks.
//!
//! Everything in this crate is a pure function over plain snapshots: tank
//! state is borrowed, never mutated, and derived values are returned by
//! value. Persistence and locking around concurrent updates belong to the
//! caller.

mod cuboid_tank;
mod cylindrical_tank;
mod level;
mod tank;

pub mod event;
pub mod forecast;
pub mod gauge;
pub mod loading;
pub mod operation;
pub mod physics;
pub mod safety;
pub mod state;
pub mod validation;

pub use cuboid_tank::CuboidTank;
pub use cylindrical_tank::CylindricalTank;
pub use event::{EventType, TankEvent};
pub use forecast::{time_to_empty, DepletionForecast, Outlook};
pub use gauge::{Gauge, MedianFilter};
pub use level::Level;
pub use loading::{optimize_loading_sequence, LoadingAllocation, LoadingReason};
pub use operation::{apply, transfer, Applied, OperationRejected, Transfer};
pub use physics::Shape;
pub use safety::{evaluate, SafetyCheckResult, SafetyLevel};
pub use state::{TankState, TankStatus};
pub use tank::Tank;
pub use validation::{validate_configuration, validate_operation, Operation, ValidationIssue, ValidationResult};
