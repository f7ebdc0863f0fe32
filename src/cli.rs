use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vessel::Operation;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tank safety checks and delivery planning for a fuel depot")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Args, Debug)]
pub struct FleetArgs {
  /// Fleet snapshot in JSON.
  #[arg(long, short, env = "DEPOT_FLEET")]
  pub fleet: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Safety level of every tank.
  Status {
    #[command(flatten)]
    fleet: FleetArgs,
  },
  /// Validate tank configurations; fails if any tank is invalid.
  Validate {
    #[command(flatten)]
    fleet: FleetArgs,
  },
  /// Distribute a delivery across the fleet.
  Plan {
    #[command(flatten)]
    fleet: FleetArgs,
    /// Liters on the truck.
    #[arg(long)]
    volume: f64,
  },
  /// Hours until each tank reaches its minimum.
  Forecast {
    #[command(flatten)]
    fleet: FleetArgs,
  },
  /// Validate an operation on a tank and show the resulting state.
  Check {
    #[command(flatten)]
    fleet: FleetArgs,
    tank: String,
    operation: Operation,
    amount: f64,
    /// Receiving tank of a `transfer_out`.
    #[arg(long)]
    target: Option<String>,
    #[arg(long)]
    operator: Option<String>,
  },
  /// Convert a gauge distance reading into a fill level.
  Level(LevelArgs),
}

#[derive(Args, Debug)]
pub struct LevelArgs {
  /// Inner tank height in millimeters.
  #[arg(long)]
  pub height: f64,
  /// Measured distance from the sensor to the surface in millimeters.
  /// Repeat to gauge the median of several readings.
  #[arg(long = "distance", required = true, num_args = 1..)]
  pub distances: Vec<f64>,
  /// Diameter of a cylindrical tank in millimeters.
  #[arg(long, conflicts_with_all = ["length", "width"], required_unless_present_all = ["length", "width"])]
  pub diameter: Option<f64>,
  /// Length of a cuboid tank in millimeters.
  #[arg(long, requires = "width")]
  pub length: Option<f64>,
  /// Width of a cuboid tank in millimeters.
  #[arg(long, requires = "length")]
  pub width: Option<f64>,
  /// Distance between the sensor and the highest possible surface.
  #[arg(long, default_value_t = 40.0, env = "DEPOT_SENSOR_OFFSET")]
  pub offset: f64,
}
