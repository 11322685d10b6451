use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::model::{Driver, DriverFields, DriverId, EntityKind, VehicleId};

use super::{fetch, map_unique_violation, remove, select, Conditions, Record};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverFilter {
    /// Only drivers without a vehicle.
    pub unassigned_only: bool,
    pub license_category: Option<String>,
}

impl Record for Driver {
    const KIND: EntityKind = EntityKind::Driver;
    const TABLE: &'static str = "drivers";
    const COLUMNS: &'static str =
        "id, full_name, license_number, license_category, hire_date, vehicle_id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Driver {
            id: row.get(0)?,
            full_name: row.get(1)?,
            license_number: row.get(2)?,
            license_category: row.get(3)?,
            hire_date: row.get(4)?,
            vehicle_id: row.get(5)?,
        })
    }
}

pub fn get(conn: &Connection, id: DriverId) -> Result<Driver> {
    fetch(conn, id)
}

pub fn list(conn: &Connection, filter: &DriverFilter) -> Result<Vec<Driver>> {
    let mut conditions = Conditions::default();
    if filter.unassigned_only {
        conditions.push_raw("vehicle_id IS NULL");
    }
    if let Some(category) = &filter.license_category {
        conditions.push("license_category = ?", category.clone());
    }
    select(conn, &conditions, "id")
}

pub fn find_by_license(conn: &Connection, license_number: &str) -> Result<Option<Driver>> {
    let mut conditions = Conditions::default();
    conditions.push("license_number = ?", license_number.to_string());
    Ok(select(conn, &conditions, "id")?.into_iter().next())
}

/// The driver currently bound to `vehicle_id`, if any.
pub fn holder_of(conn: &Connection, vehicle_id: VehicleId) -> Result<Option<DriverId>> {
    let holder = conn
        .query_row(
            "SELECT id FROM drivers WHERE vehicle_id = ?1",
            [vehicle_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(holder)
}

pub(crate) fn insert(conn: &Connection, fields: &DriverFields) -> Result<Driver> {
    conn.execute(
        "INSERT INTO drivers (full_name, license_number, license_category, hire_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            fields.full_name,
            fields.license_number,
            fields.license_category,
            fields.hire_date
        ],
    )
    .map_err(|err| map_unique_violation(err, "license_number", &fields.license_number))?;
    fetch(conn, conn.last_insert_rowid())
}

pub(crate) fn update(conn: &Connection, id: DriverId, fields: &DriverFields) -> Result<Driver> {
    let changed = conn
        .execute(
            "UPDATE drivers
             SET full_name = ?2, license_number = ?3, license_category = ?4, hire_date = ?5
             WHERE id = ?1",
            params![
                id,
                fields.full_name,
                fields.license_number,
                fields.license_category,
                fields.hire_date
            ],
        )
        .map_err(|err| map_unique_violation(err, "license_number", &fields.license_number))?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Driver, id));
    }
    fetch(conn, id)
}

/// Write the driver's vehicle column. Callers own the exclusivity checks.
pub(crate) fn set_vehicle(
    conn: &Connection,
    id: DriverId,
    vehicle_id: Option<VehicleId>,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE drivers SET vehicle_id = ?2 WHERE id = ?1",
        params![id, vehicle_id],
    )?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Driver, id));
    }
    Ok(())
}

pub(crate) fn delete(conn: &Connection, id: DriverId) -> Result<()> {
    remove::<Driver>(conn, id)
}
