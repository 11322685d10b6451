//! `shipment` subcommands.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};

use fleetdesk_lib::{
    DriverId, EntityKind, NewShipment, RouteId, ShipmentEdit, ShipmentFilter, ShipmentId,
    ShipmentLifecycle, ShipmentStatus, Store, TariffId, VehicleId,
};

use crate::commands::{emit_deleted, parse_status, parse_timestamp};
use crate::output::{shipment_line, shipment_table, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ShipmentCommand {
    /// Create a shipment; its cost is computed from route and tariff.
    Create(CreateArgs),
    /// Change a pending or in-transit shipment and recompute its cost.
    Edit {
        id: ShipmentId,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Move a shipment to a new status.
    Status {
        id: ShipmentId,
        /// pending, in_transit, delivered or cancelled.
        #[arg(value_parser = parse_status)]
        status: ShipmentStatus,
    },
    /// List shipments, most recently scheduled first.
    List(ListArgs),
    Show { id: ShipmentId },
    /// Delete a shipment in any status.
    Delete { id: ShipmentId },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub vehicle: VehicleId,
    #[arg(long)]
    pub driver: DriverId,
    #[arg(long)]
    pub route: RouteId,
    #[arg(long)]
    pub tariff: TariffId,
    /// Scheduled time, e.g. 2024-03-15T10:30.
    #[arg(long, value_parser = parse_timestamp)]
    pub at: NaiveDateTime,
    /// Cargo weight in kilograms.
    #[arg(long)]
    pub weight: f64,
    /// Initial status (default: pending).
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ShipmentStatus>,
}

impl From<CreateArgs> for NewShipment {
    fn from(args: CreateArgs) -> Self {
        Self {
            vehicle_id: args.vehicle,
            driver_id: args.driver,
            route_id: args.route,
            tariff_id: args.tariff,
            scheduled_at: args.at,
            weight_kg: args.weight,
            status: args.status,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub vehicle: Option<VehicleId>,
    #[arg(long)]
    pub driver: Option<DriverId>,
    #[arg(long)]
    pub route: Option<RouteId>,
    #[arg(long)]
    pub tariff: Option<TariffId>,
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,
    #[arg(long)]
    pub weight: Option<f64>,
}

impl From<EditArgs> for ShipmentEdit {
    fn from(args: EditArgs) -> Self {
        Self {
            vehicle_id: args.vehicle,
            driver_id: args.driver,
            route_id: args.route,
            tariff_id: args.tariff,
            scheduled_at: args.at,
            weight_kg: args.weight,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status filter; repeat or separate with commas.
    #[arg(long, value_parser = parse_status, value_delimiter = ',')]
    pub status: Vec<ShipmentStatus>,
    /// Only pending and in-transit shipments.
    #[arg(long, conflicts_with = "status")]
    pub active: bool,
    #[arg(long)]
    pub vehicle: Option<VehicleId>,
    #[arg(long)]
    pub driver: Option<DriverId>,
    #[arg(long)]
    pub route: Option<RouteId>,
    #[arg(long)]
    pub tariff: Option<TariffId>,
    /// Scheduled at or after.
    #[arg(long, value_parser = parse_timestamp)]
    pub from: Option<NaiveDateTime>,
    /// Scheduled at or before.
    #[arg(long, value_parser = parse_timestamp)]
    pub to: Option<NaiveDateTime>,
    /// Minimum cargo weight in kg.
    #[arg(long)]
    pub min_weight: Option<f64>,
    /// Maximum cargo weight in kg.
    #[arg(long)]
    pub max_weight: Option<f64>,
}

impl ListArgs {
    pub fn filter(self) -> ShipmentFilter {
        let statuses = if self.active {
            Some(ShipmentStatus::ACTIVE.to_vec())
        } else if self.status.is_empty() {
            None
        } else {
            Some(self.status)
        };
        ShipmentFilter {
            statuses,
            vehicle_id: self.vehicle,
            driver_id: self.driver,
            route_id: self.route,
            tariff_id: self.tariff,
            scheduled_from: self.from,
            scheduled_to: self.to,
            min_weight_kg: self.min_weight,
            max_weight_kg: self.max_weight,
        }
    }
}

pub fn handle_shipment(
    store: &mut Store,
    command: ShipmentCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ShipmentCommand::Create(args) => {
            let shipment = ShipmentLifecycle::new(store)
                .create(&args.into())
                .context("failed to create shipment")?;
            format.emit(&shipment, |s| format!("Created {}", shipment_line(s)))
        }
        ShipmentCommand::Edit { id, changes } => {
            let shipment = ShipmentLifecycle::new(store)
                .edit(id, &changes.into())
                .with_context(|| format!("failed to edit shipment {id}"))?;
            format.emit(&shipment, |s| format!("Updated {}", shipment_line(s)))
        }
        ShipmentCommand::Status { id, status } => {
            let shipment = ShipmentLifecycle::new(store)
                .transition(id, status)
                .with_context(|| format!("failed to change status of shipment {id}"))?;
            format.emit(&shipment, |s| shipment_line(s))
        }
        ShipmentCommand::List(args) => {
            let shipments = store.shipments(&args.filter())?;
            format.emit(&shipments, |s| shipment_table(s))
        }
        ShipmentCommand::Show { id } => {
            let shipment = store.shipment(id)?;
            format.emit(&shipment, |s| shipment_table(std::slice::from_ref(s)))
        }
        ShipmentCommand::Delete { id } => {
            ShipmentLifecycle::new(store)
                .delete_shipment(id)
                .with_context(|| format!("failed to delete shipment {id}"))?;
            emit_deleted(format, EntityKind::Shipment, id)
        }
    }
}
