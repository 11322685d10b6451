//! Subcommand definitions and handlers.
//!
//! Each module owns one entity family: its clap subcommand enum and the
//! handler that dispatches it against an open [`Store`]. `main.rs` resolves
//! the database, opens it and hands over.

pub mod assignments;
pub mod drivers;
pub mod reports;
pub mod routes;
pub mod shipments;
pub mod tariffs;
pub mod vehicles;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use fleetdesk_lib::{EntityKind, ShipmentStatus, Store};

use crate::output::OutputFormat;

/// Open (creating if needed) the fleet database at `path`.
pub fn open_store(path: &Path) -> Result<Store> {
    Store::open(path)
        .with_context(|| format!("failed to open fleet database at {}", path.display()))
}

/// Handle `init`: create the database and report where it lives.
pub fn handle_init(store: &Store, format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct Ready {
        database: String,
    }

    let database = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    format.emit(&Ready { database }, |ready| {
        format!("Fleet database ready at {}", ready.database)
    })
}

/// Result of a successful delete command.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub entity: EntityKind,
    pub id: i64,
}

pub(crate) fn emit_deleted(format: OutputFormat, entity: EntityKind, id: i64) -> Result<()> {
    format.emit(&Deleted { entity, id }, |d| {
        format!("Deleted {} #{}", d.entity, d.id)
    })
}

/// Local calendar date, used to derive driver experience.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local wall-clock time, used as the default instant for tariff lookups.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected a date like 2024-03-15: {err}"))
}

/// Parse a timestamp as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or the same
/// with a `T` separator. A bare date means midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("expected a timestamp like 2024-03-15 or 2024-03-15T10:30, got '{value}'"))
}

/// Parse a shipment status name.
pub fn parse_status(value: &str) -> Result<ShipmentStatus, String> {
    value.parse().map_err(|err: fleetdesk_lib::Error| err.to_string())
}
