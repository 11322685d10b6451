//! FleetDesk library entry points.
//!
//! This crate holds the rules that decide what a shipment costs and whether an
//! assignment or shipment is valid: the driver/vehicle pairing, tariff
//! resolution over validity windows, cost calculation with floor pricing, and
//! the shipment lifecycle with its deletion guards. Front ends (the CLI, or any
//! other presentation layer) should only depend on the items exported here.
//!
//! Every component borrows the [`Store`] it operates on; nothing is looked up
//! through global state.

pub mod assignment;
pub mod config;
pub mod cost;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod report;
pub mod store;
pub mod tariff;

pub use assignment::{AssignmentManager, DispatchableVehicle};
pub use config::{default_database_path, resolve_database_path, DATABASE_ENV};
pub use cost::{format_cost, quote, shipment_cost};
pub use error::{Error, ErrorKind, Result};
pub use lifecycle::{RouteRevision, ShipmentLifecycle, TariffRevision};
pub use model::{
    Driver, DriverFields, DriverId, EntityKind, NewShipment, Route, RouteFields, RouteId,
    Shipment, ShipmentEdit, ShipmentId, ShipmentStatus, Tariff, TariffFields, TariffId, Vehicle,
    VehicleFields, VehicleId, MAX_EXPERIENCE_YEARS,
};
pub use registry::Registry;
pub use report::{route_statistics, shipment_summary, RouteStatistics, ShipmentSummary};
pub use store::{
    DriverFilter, RouteFilter, ShipmentFilter, Store, TariffFilter, VehicleFilter,
};
pub use tariff::TariffResolver;
