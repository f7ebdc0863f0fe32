use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use measurements::Length;
use serde::Serialize;
use serde_json::json;
use vessel::{apply, optimize_loading_sequence, transfer, CuboidTank, CylindricalTank, Gauge, MedianFilter, Operation};

mod cli;
mod fleet;
mod report;

use self::cli::{Cli, Command, LevelArgs};
use self::fleet::Fleet;
use self::report::{forecasts, messages, ConfigurationReport, LevelReport, TankReport};

fn print<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn level(args: &LevelArgs) -> Result<LevelReport> {
  let mut readings = MedianFilter::with_max_size(args.distances.len());
  for &distance in &args.distances {
    readings.push(distance).map_err(|_| anyhow!("distance reading is not a number"))?;
  }

  let distance = readings.median().context("no distance readings")?;
  if args.distances.len() > 1 {
    info!("Median of {} readings is {:.0} mm", args.distances.len(), distance);
  }

  let height = Length::from_millimeters(args.height);
  let distance = Length::from_millimeters(distance);
  let gauge = Gauge::new(Length::from_millimeters(args.offset));

  match (args.diameter, args.length, args.width) {
    (_, Some(length), Some(width)) => {
      let tank = CuboidTank::new(Length::from_millimeters(length), Length::from_millimeters(width), height);
      Ok(gauge.level(&tank, distance).into())
    },
    (diameter, _, _) => {
      let tank = CylindricalTank::new(Length::from_millimeters(diameter.unwrap_or_default()), height);
      Ok(gauge.level(&tank, distance).into())
    },
  }
}

fn check(fleet: &Fleet, tank: &str, operation: Operation, amount: f64, target: Option<&str>, operator: Option<&str>) -> Result<()> {
  let tank = fleet.find(tank)?;

  match (operation, target) {
    (Operation::TransferOut, Some(target)) => {
      let target = fleet.find(target)?;
      let moved = transfer(tank, target, amount, operator)?;

      print(&json!({
        "source": { "tank": moved.source.tank, "event": moved.source.event, "warnings": messages(&moved.source.warnings) },
        "target": { "tank": moved.target.tank, "event": moved.target.event, "warnings": messages(&moved.target.warnings) },
      }))
    },
    (_, target) => {
      if target.is_some() {
        warn!("Ignoring target tank, only used for transfer_out");
      }

      let applied = apply(operation, tank, amount, operator)?;

      print(&json!({
        "tank": applied.tank,
        "event": applied.event,
        "warnings": messages(&applied.warnings),
      }))
    },
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Status { fleet } => {
      let fleet = Fleet::load(&fleet.fleet)?;
      let reports: Vec<_> = fleet.tanks.iter().map(|tank| TankReport::new(&tank.state)).collect();

      for report in reports.iter().filter(|report| !report.safety.is_safe()) {
        warn!("Tank '{}' is at level {}", report.id, report.safety.level);
      }

      print(&reports)
    },
    Command::Validate { fleet } => {
      let fleet = Fleet::load(&fleet.fleet)?;
      let reports: Vec<_> = fleet.tanks.iter().map(|tank| ConfigurationReport::new(&tank.state)).collect();
      print(&reports)?;

      let invalid = reports.iter().filter(|report| !report.valid).count();
      if invalid > 0 {
        bail!("{} of {} tanks have an invalid configuration", invalid, reports.len());
      }

      Ok(())
    },
    Command::Plan { fleet, volume } => {
      let fleet = Fleet::load(&fleet.fleet)?;
      let plan = optimize_loading_sequence(&fleet.states(), volume);

      let allocated: f64 = plan.iter().map(|allocation| allocation.recommended_volume).sum();
      info!("Allocated {:.0} l of {:.0} l to {} tanks", allocated, volume, plan.len());

      print(&json!({
        "allocations": plan,
        "allocated": allocated,
        "remaining": volume - allocated,
      }))
    },
    Command::Forecast { fleet } => {
      let fleet = Fleet::load(&fleet.fleet)?;
      print(&forecasts(&fleet))
    },
    Command::Check { fleet, tank, operation, amount, target, operator } => {
      let fleet = Fleet::load(&fleet.fleet)?;
      check(&fleet, &tank, operation, amount, target.as_deref(), operator.as_deref())
    },
    Command::Level(args) => print(&level(&args)?),
  }
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  run(Cli::parse())
}
