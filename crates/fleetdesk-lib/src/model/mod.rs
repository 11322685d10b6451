//! Fleet entities and their field-level validation.
//!
//! This module is organized into focused submodules:
//!
//! - [`vehicle`] - Vehicles and their rated load capacity
//! - [`driver`] - Drivers, license data, and hire-date derived experience
//! - [`route`] - Routes with distance and duration
//! - [`tariff`] - Priced rules valid over a half-open time window
//! - [`shipment`] - Shipments, their status machine, creation and edit requests
//!
//! Identifiers are plain SQLite row ids. Field structs (`VehicleFields`,
//! `DriverFields`, ...) carry everything a caller may set when creating or
//! replacing an entity; the id and derived columns are owned by the store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod driver;
pub mod route;
pub mod shipment;
pub mod tariff;
pub mod vehicle;

pub use driver::{Driver, DriverFields, DriverId, MAX_EXPERIENCE_YEARS};
pub use route::{Route, RouteFields, RouteId};
pub use shipment::{NewShipment, Shipment, ShipmentEdit, ShipmentId, ShipmentStatus};
pub use tariff::{Tariff, TariffFields, TariffId};
pub use vehicle::{Vehicle, VehicleFields, VehicleId};

/// Entity families known to the store, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Vehicle,
    Driver,
    Route,
    Tariff,
    Shipment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            EntityKind::Vehicle => "vehicle",
            EntityKind::Driver => "driver",
            EntityKind::Route => "route",
            EntityKind::Tariff => "tariff",
            EntityKind::Shipment => "shipment",
        };
        f.write_str(value)
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(
            field,
            format!("must be a finite positive number, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(
            field,
            format!("must be a finite non-negative number, got {value}"),
        ));
    }
    Ok(())
}
