use rusqlite::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::model::{EntityKind, Route, RouteFields, RouteId};

use super::{fetch, remove, select, Conditions, Record};

/// Route list filter. Text fields match case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFilter {
    pub min_distance_km: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub road_type: Option<String>,
}

impl Record for Route {
    const KIND: EntityKind = EntityKind::Route;
    const TABLE: &'static str = "routes";
    const COLUMNS: &'static str =
        "id, origin, destination, distance_km, avg_duration_hours, road_type";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Route {
            id: row.get(0)?,
            origin: row.get(1)?,
            destination: row.get(2)?,
            distance_km: row.get(3)?,
            avg_duration_hours: row.get(4)?,
            road_type: row.get(5)?,
        })
    }
}

pub fn get(conn: &Connection, id: RouteId) -> Result<Route> {
    fetch(conn, id)
}

pub fn list(conn: &Connection, filter: &RouteFilter) -> Result<Vec<Route>> {
    let mut conditions = Conditions::default();
    if let Some(min) = filter.min_distance_km {
        conditions.push("distance_km >= ?", min);
    }
    if let Some(max) = filter.max_distance_km {
        conditions.push("distance_km <= ?", max);
    }
    if let Some(origin) = &filter.origin {
        conditions.push_contains("origin", origin);
    }
    if let Some(destination) = &filter.destination {
        conditions.push_contains("destination", destination);
    }
    if let Some(road_type) = &filter.road_type {
        conditions.push_contains("road_type", road_type);
    }
    select(conn, &conditions, "id DESC")
}

pub(crate) fn insert(conn: &Connection, fields: &RouteFields) -> Result<Route> {
    conn.execute(
        "INSERT INTO routes (origin, destination, distance_km, avg_duration_hours, road_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.origin,
            fields.destination,
            fields.distance_km,
            fields.avg_duration_hours,
            fields.road_type
        ],
    )?;
    fetch(conn, conn.last_insert_rowid())
}

pub(crate) fn update(conn: &Connection, id: RouteId, fields: &RouteFields) -> Result<Route> {
    let changed = conn.execute(
        "UPDATE routes
         SET origin = ?2, destination = ?3, distance_km = ?4,
             avg_duration_hours = ?5, road_type = ?6
         WHERE id = ?1",
        params![
            id,
            fields.origin,
            fields.destination,
            fields.distance_km,
            fields.avg_duration_hours,
            fields.road_type
        ],
    )?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Route, id));
    }
    fetch(conn, id)
}

pub(crate) fn delete(conn: &Connection, id: RouteId) -> Result<()> {
    remove::<Route>(conn, id)
}
