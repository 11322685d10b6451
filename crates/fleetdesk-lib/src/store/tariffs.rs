use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::model::{EntityKind, Tariff, TariffFields, TariffId};

use super::{fetch, remove, select, Conditions, Record};

/// Tariff list filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffFilter {
    /// Only tariffs whose `[valid_from, valid_until)` window contains this instant.
    pub active_at: Option<NaiveDateTime>,
    /// Exact cargo-type tag.
    pub cargo_type: Option<String>,
}

impl Record for Tariff {
    const KIND: EntityKind = EntityKind::Tariff;
    const TABLE: &'static str = "tariffs";
    const COLUMNS: &'static str =
        "id, cargo_type, price_per_km, min_price, valid_from, valid_until, description";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Tariff {
            id: row.get(0)?,
            cargo_type: row.get(1)?,
            price_per_km: row.get(2)?,
            min_price: row.get(3)?,
            valid_from: row.get(4)?,
            valid_until: row.get(5)?,
            description: row.get(6)?,
        })
    }
}

pub fn get(conn: &Connection, id: TariffId) -> Result<Tariff> {
    fetch(conn, id)
}

/// List tariffs, newest validity start first.
pub fn list(conn: &Connection, filter: &TariffFilter) -> Result<Vec<Tariff>> {
    let mut conditions = Conditions::default();
    if let Some(at) = filter.active_at {
        // Timestamps share one text encoding, so lexical order is time order.
        conditions.push("valid_from <= ?", at);
        conditions.push("(valid_until IS NULL OR valid_until > ?)", at);
    }
    if let Some(cargo_type) = &filter.cargo_type {
        conditions.push("cargo_type = ?", cargo_type.clone());
    }
    select(conn, &conditions, "valid_from DESC, id DESC")
}

/// Distinct cargo-type tags in alphabetical order.
pub fn cargo_types(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT cargo_type FROM tariffs ORDER BY cargo_type")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut types = Vec::new();
    for entry in rows {
        types.push(entry?);
    }
    Ok(types)
}

pub(crate) fn insert(conn: &Connection, fields: &TariffFields) -> Result<Tariff> {
    conn.execute(
        "INSERT INTO tariffs
            (cargo_type, price_per_km, min_price, valid_from, valid_until, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            fields.cargo_type,
            fields.price_per_km,
            fields.min_price,
            fields.valid_from,
            fields.valid_until,
            fields.description
        ],
    )?;
    fetch(conn, conn.last_insert_rowid())
}

pub(crate) fn update(conn: &Connection, id: TariffId, fields: &TariffFields) -> Result<Tariff> {
    let changed = conn.execute(
        "UPDATE tariffs
         SET cargo_type = ?2, price_per_km = ?3, min_price = ?4,
             valid_from = ?5, valid_until = ?6, description = ?7
         WHERE id = ?1",
        params![
            id,
            fields.cargo_type,
            fields.price_per_km,
            fields.min_price,
            fields.valid_from,
            fields.valid_until,
            fields.description
        ],
    )?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Tariff, id));
    }
    fetch(conn, id)
}

pub(crate) fn delete(conn: &Connection, id: TariffId) -> Result<()> {
    remove::<Tariff>(conn, id)
}
