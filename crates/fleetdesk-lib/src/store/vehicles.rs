use rusqlite::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::model::{EntityKind, Vehicle, VehicleFields, VehicleId};

use super::{fetch, map_unique_violation, remove, select, Conditions, Record};

/// Vehicle list filter. Empty filter lists every vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    /// Minimum rated capacity in tonnes.
    pub min_load_capacity_t: Option<f64>,
    /// Maximum fuel consumption in l/100 km.
    pub max_fuel_consumption: Option<f64>,
    /// Only vehicles without an assigned driver.
    pub unassigned_only: bool,
    pub body_type: Option<String>,
}

impl Record for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static str =
        "id, brand, license_plate, load_capacity_t, fuel_consumption, body_type";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Vehicle {
            id: row.get(0)?,
            brand: row.get(1)?,
            license_plate: row.get(2)?,
            load_capacity_t: row.get(3)?,
            fuel_consumption: row.get(4)?,
            body_type: row.get(5)?,
        })
    }
}

pub fn get(conn: &Connection, id: VehicleId) -> Result<Vehicle> {
    fetch(conn, id)
}

pub fn list(conn: &Connection, filter: &VehicleFilter) -> Result<Vec<Vehicle>> {
    let mut conditions = Conditions::default();
    if let Some(min) = filter.min_load_capacity_t {
        conditions.push("load_capacity_t >= ?", min);
    }
    if let Some(max) = filter.max_fuel_consumption {
        conditions.push("fuel_consumption <= ?", max);
    }
    if filter.unassigned_only {
        conditions.push_raw(
            "id NOT IN (SELECT vehicle_id FROM drivers WHERE vehicle_id IS NOT NULL)",
        );
    }
    if let Some(body_type) = &filter.body_type {
        conditions.push_contains("body_type", body_type);
    }
    select(conn, &conditions, "id")
}

/// Look up a vehicle by license plate (exact match).
pub fn find_by_plate(conn: &Connection, license_plate: &str) -> Result<Option<Vehicle>> {
    let mut conditions = Conditions::default();
    conditions.push("license_plate = ?", license_plate.to_string());
    Ok(select(conn, &conditions, "id")?.into_iter().next())
}

pub(crate) fn insert(conn: &Connection, fields: &VehicleFields) -> Result<Vehicle> {
    conn.execute(
        "INSERT INTO vehicles (brand, license_plate, load_capacity_t, fuel_consumption, body_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.brand,
            fields.license_plate,
            fields.load_capacity_t,
            fields.fuel_consumption,
            fields.body_type
        ],
    )
    .map_err(|err| map_unique_violation(err, "license_plate", &fields.license_plate))?;
    fetch(conn, conn.last_insert_rowid())
}

pub(crate) fn update(conn: &Connection, id: VehicleId, fields: &VehicleFields) -> Result<Vehicle> {
    let changed = conn
        .execute(
            "UPDATE vehicles
             SET brand = ?2, license_plate = ?3, load_capacity_t = ?4,
                 fuel_consumption = ?5, body_type = ?6
             WHERE id = ?1",
            params![
                id,
                fields.brand,
                fields.license_plate,
                fields.load_capacity_t,
                fields.fuel_consumption,
                fields.body_type
            ],
        )
        .map_err(|err| map_unique_violation(err, "license_plate", &fields.license_plate))?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Vehicle, id));
    }
    fetch(conn, id)
}

pub(crate) fn delete(conn: &Connection, id: VehicleId) -> Result<()> {
    remove::<Vehicle>(conn, id)
}
