//! `driver` subcommands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

use fleetdesk_lib::{
    Driver, DriverFields, DriverFilter, DriverId, EntityKind, Registry, ShipmentLifecycle, Store,
    Vehicle,
};

use crate::commands::{emit_deleted, parse_date, today};
use crate::output::{driver_table, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum DriverCommand {
    /// Register a driver.
    Add(DriverArgs),
    /// Change a driver's personal data; omitted flags keep their value.
    Update {
        id: DriverId,
        #[command(flatten)]
        changes: DriverChanges,
    },
    /// List drivers.
    List {
        /// Only drivers without a vehicle.
        #[arg(long)]
        unassigned: bool,
        /// License category, e.g. `CE`.
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one driver with derived experience and vehicle.
    Show { id: DriverId },
    /// Delete a driver no active shipment uses.
    Delete { id: DriverId },
}

#[derive(Args, Debug)]
pub struct DriverArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub license: String,
    #[arg(long, default_value = "C")]
    pub category: String,
    /// Hire date (YYYY-MM-DD); experience is derived from it.
    #[arg(long, value_parser = parse_date)]
    pub hire_date: NaiveDate,
}

impl From<DriverArgs> for DriverFields {
    fn from(args: DriverArgs) -> Self {
        Self {
            full_name: args.name,
            license_number: args.license,
            license_category: args.category,
            hire_date: args.hire_date,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct DriverChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub license: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub hire_date: Option<NaiveDate>,
}

impl DriverChanges {
    fn apply(self, current: &Driver) -> DriverFields {
        DriverFields {
            full_name: self.name.unwrap_or_else(|| current.full_name.clone()),
            license_number: self
                .license
                .unwrap_or_else(|| current.license_number.clone()),
            license_category: self
                .category
                .unwrap_or_else(|| current.license_category.clone()),
            hire_date: self.hire_date.unwrap_or(current.hire_date),
        }
    }
}

#[derive(Debug, Serialize)]
struct DriverDetail {
    driver: Driver,
    experience_years: u32,
    vehicle: Option<Vehicle>,
}

pub fn handle_driver(store: &mut Store, command: DriverCommand, format: OutputFormat) -> Result<()> {
    let today = today();
    match command {
        DriverCommand::Add(args) => {
            let driver = Registry::new(store)
                .add_driver(&args.into(), today)
                .context("failed to register driver")?;
            format.emit(&driver, |d| {
                format!(
                    "Registered driver #{} ({}), {} years of experience",
                    d.id,
                    d.full_name,
                    d.experience_years(today)
                )
            })
        }
        DriverCommand::Update { id, changes } => {
            let current = store.driver(id)?;
            let fields = changes.apply(&current);
            let driver = Registry::new(store)
                .update_driver(id, &fields, today)
                .with_context(|| format!("failed to update driver {id}"))?;
            format.emit(&driver, |d| format!("Updated driver #{} ({})", d.id, d.full_name))
        }
        DriverCommand::List {
            unassigned,
            category,
        } => {
            let drivers = store.drivers(&DriverFilter {
                unassigned_only: unassigned,
                license_category: category,
            })?;
            format.emit(&drivers, |d| driver_table(d, today))
        }
        DriverCommand::Show { id } => {
            let driver = store.driver(id)?;
            let vehicle = driver
                .vehicle_id
                .map(|vehicle_id| store.vehicle(vehicle_id))
                .transpose()?;
            let detail = DriverDetail {
                experience_years: driver.experience_years(today),
                driver,
                vehicle,
            };
            format.emit(&detail, |d| {
                let vehicle = d
                    .vehicle
                    .as_ref()
                    .map(|v| format!("{} (#{})", v.license_plate, v.id))
                    .unwrap_or_else(|| "none".to_string());
                format!(
                    "{}Hired: {}\nVehicle: {vehicle}\n",
                    driver_table(std::slice::from_ref(&d.driver), today),
                    d.driver.hire_date
                )
            })
        }
        DriverCommand::Delete { id } => {
            ShipmentLifecycle::new(store)
                .delete_driver(id)
                .with_context(|| format!("failed to delete driver {id}"))?;
            emit_deleted(format, EntityKind::Driver, id)
        }
    }
}
