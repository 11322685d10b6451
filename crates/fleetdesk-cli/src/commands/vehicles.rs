//! `vehicle` subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use fleetdesk_lib::{
    AssignmentManager, Driver, EntityKind, Registry, ShipmentLifecycle, Store, Vehicle,
    VehicleFields, VehicleFilter, VehicleId,
};

use crate::commands::emit_deleted;
use crate::output::{dispatch_table, vehicle_table, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Register a vehicle.
    Add(VehicleArgs),
    /// Change a vehicle; omitted flags keep their current value.
    Update {
        id: VehicleId,
        #[command(flatten)]
        changes: VehicleChanges,
    },
    /// List vehicles.
    List {
        /// Minimum load capacity in tonnes.
        #[arg(long)]
        min_capacity: Option<f64>,
        /// Maximum fuel consumption in litres per 100 km.
        #[arg(long)]
        max_fuel: Option<f64>,
        /// Only vehicles without a driver.
        #[arg(long)]
        unassigned: bool,
        #[arg(long)]
        body: Option<String>,
    },
    /// Show one vehicle and its driver.
    Show { id: VehicleId },
    /// Vehicles with a driver whose capacity covers a cargo weight.
    Dispatchable {
        /// Cargo weight in kilograms.
        #[arg(long)]
        weight: f64,
    },
    /// Delete a vehicle no active shipment uses.
    Delete { id: VehicleId },
}

#[derive(Args, Debug)]
pub struct VehicleArgs {
    #[arg(long)]
    pub brand: String,
    #[arg(long)]
    pub plate: String,
    /// Load capacity in tonnes.
    #[arg(long)]
    pub capacity: f64,
    /// Fuel consumption in litres per 100 km.
    #[arg(long, default_value_t = 0.0)]
    pub fuel: f64,
    #[arg(long, default_value = "tent")]
    pub body: String,
}

impl From<VehicleArgs> for VehicleFields {
    fn from(args: VehicleArgs) -> Self {
        Self {
            brand: args.brand,
            license_plate: args.plate,
            load_capacity_t: args.capacity,
            fuel_consumption: args.fuel,
            body_type: args.body,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct VehicleChanges {
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub plate: Option<String>,
    #[arg(long)]
    pub capacity: Option<f64>,
    #[arg(long)]
    pub fuel: Option<f64>,
    #[arg(long)]
    pub body: Option<String>,
}

impl VehicleChanges {
    fn apply(self, current: &Vehicle) -> VehicleFields {
        let mut fields = VehicleFields::from(current);
        if let Some(brand) = self.brand {
            fields.brand = brand;
        }
        if let Some(plate) = self.plate {
            fields.license_plate = plate;
        }
        if let Some(capacity) = self.capacity {
            fields.load_capacity_t = capacity;
        }
        if let Some(fuel) = self.fuel {
            fields.fuel_consumption = fuel;
        }
        if let Some(body) = self.body {
            fields.body_type = body;
        }
        fields
    }
}

#[derive(Debug, Serialize)]
struct VehicleDetail {
    vehicle: Vehicle,
    driver: Option<Driver>,
}

pub fn handle_vehicle(store: &mut Store, command: VehicleCommand, format: OutputFormat) -> Result<()> {
    match command {
        VehicleCommand::Add(args) => {
            let vehicle = Registry::new(store)
                .add_vehicle(&args.into())
                .context("failed to register vehicle")?;
            format.emit(&vehicle, |v| {
                format!("Registered vehicle #{} ({})", v.id, v.license_plate)
            })
        }
        VehicleCommand::Update { id, changes } => {
            let current = store.vehicle(id)?;
            let fields = changes.apply(&current);
            let vehicle = Registry::new(store)
                .update_vehicle(id, &fields)
                .with_context(|| format!("failed to update vehicle {id}"))?;
            format.emit(&vehicle, |v| {
                format!("Updated vehicle #{} ({})", v.id, v.license_plate)
            })
        }
        VehicleCommand::List {
            min_capacity,
            max_fuel,
            unassigned,
            body,
        } => {
            let vehicles = store.vehicles(&VehicleFilter {
                min_load_capacity_t: min_capacity,
                max_fuel_consumption: max_fuel,
                unassigned_only: unassigned,
                body_type: body,
            })?;
            format.emit(&vehicles, |v| vehicle_table(v))
        }
        VehicleCommand::Show { id } => {
            let vehicle = store.vehicle(id)?;
            let driver = AssignmentManager::new(store).vehicle_driver(id)?;
            let detail = VehicleDetail { vehicle, driver };
            format.emit(&detail, |d| {
                let driver = d
                    .driver
                    .as_ref()
                    .map(|driver| format!("{} (#{})", driver.full_name, driver.id))
                    .unwrap_or_else(|| "unassigned".to_string());
                format!(
                    "{}Driver: {driver}\nCapacity: {} kg\n",
                    vehicle_table(std::slice::from_ref(&d.vehicle)),
                    d.vehicle.capacity_kg()
                )
            })
        }
        VehicleCommand::Dispatchable { weight } => {
            let entries = AssignmentManager::new(store).dispatchable_vehicles(weight)?;
            format.emit(&entries, |e| dispatch_table(e))
        }
        VehicleCommand::Delete { id } => {
            ShipmentLifecycle::new(store)
                .delete_vehicle(id)
                .with_context(|| format!("failed to delete vehicle {id}"))?;
            emit_deleted(format, EntityKind::Vehicle, id)
        }
    }
}
