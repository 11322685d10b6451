use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::{DriverId, EntityKind, ShipmentId, ShipmentStatus, TariffId, VehicleId};

/// Convenient result alias for the FleetDesk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every mutating operation either fully applies or returns exactly one of
/// these and leaves the store unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing required field.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Cargo weight exceeds the vehicle's rated load capacity.
    #[error(
        "cargo weight {weight_kg} kg exceeds the {capacity_kg} kg capacity of vehicle {vehicle_id}"
    )]
    OverCapacity {
        vehicle_id: VehicleId,
        weight_kg: f64,
        capacity_kg: f64,
    },

    /// The tariff's validity window does not contain the requested instant.
    #[error(
        "tariff {tariff_id} is not active at {at}; it is valid {}",
        format_window(.valid_from, .valid_until)
    )]
    TariffNotActive {
        tariff_id: TariffId,
        at: NaiveDateTime,
        valid_from: NaiveDateTime,
        valid_until: Option<NaiveDateTime>,
    },

    /// Requested status change is not a legal forward move.
    #[error("shipment {shipment_id} cannot move from {from} to {to}")]
    InvalidTransition {
        shipment_id: ShipmentId,
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// Deletion refused because shipments still depend on the entity.
    #[error(
        "{entity} {id} is referenced by {count} shipment(s){}",
        format_shipment_ids(.shipment_ids)
    )]
    ReferencedByActiveShipment {
        entity: EntityKind,
        id: i64,
        count: usize,
        shipment_ids: Vec<ShipmentId>,
    },

    /// Stale or unknown identifier.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// The vehicle is already bound to another driver.
    #[error("vehicle {vehicle_id} is already assigned to driver {driver_id}")]
    ConflictingAssignment {
        vehicle_id: VehicleId,
        driver_id: DriverId,
    },

    /// No platform data directory could be resolved for the default database.
    #[error("failed to resolve project directories for the fleet database")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Field-less classification of [`Error`], for callers that only switch on
/// the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    OverCapacity,
    TariffNotActive,
    InvalidTransition,
    ReferencedByActiveShipment,
    NotFound,
    ConflictingAssignment,
    Configuration,
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::OverCapacity { .. } => ErrorKind::OverCapacity,
            Error::TariffNotActive { .. } => ErrorKind::TariffNotActive,
            Error::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Error::ReferencedByActiveShipment { .. } => ErrorKind::ReferencedByActiveShipment,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::ConflictingAssignment { .. } => ErrorKind::ConflictingAssignment,
            Error::ProjectDirsUnavailable => ErrorKind::Configuration,
            Error::Sqlite(_) | Error::Io(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity: EntityKind, id: i64) -> Self {
        Error::NotFound { entity, id }
    }
}

fn format_window(valid_from: &NaiveDateTime, valid_until: &Option<NaiveDateTime>) -> String {
    match valid_until {
        Some(until) => format!("from {valid_from} until {until} (exclusive)"),
        None => format!("from {valid_from} (open-ended)"),
    }
}

fn format_shipment_ids(ids: &[ShipmentId]) -> String {
    if ids.is_empty() {
        String::new()
    } else {
        format!(
            ": {}",
            ids.iter()
                .map(|id| format!("#{id}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
