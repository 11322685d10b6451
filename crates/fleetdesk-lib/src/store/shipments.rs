use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::model::{
    DriverId, EntityKind, NewShipment, RouteId, Shipment, ShipmentId, ShipmentStatus, TariffId,
    VehicleId,
};

use super::{fetch, remove, select, Conditions, Record};

/// Shipment list filter. Every set field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentFilter {
    /// Allowed statuses; `None` means any.
    pub statuses: Option<Vec<ShipmentStatus>>,
    pub vehicle_id: Option<VehicleId>,
    pub driver_id: Option<DriverId>,
    pub route_id: Option<RouteId>,
    pub tariff_id: Option<TariffId>,
    /// Inclusive lower bound on the scheduled time.
    pub scheduled_from: Option<NaiveDateTime>,
    /// Inclusive upper bound on the scheduled time.
    pub scheduled_to: Option<NaiveDateTime>,
    pub min_weight_kg: Option<f64>,
    pub max_weight_kg: Option<f64>,
}

impl ShipmentFilter {
    /// Shipments that are still pending or in transit.
    pub fn active() -> Self {
        Self {
            statuses: Some(ShipmentStatus::ACTIVE.to_vec()),
            ..Self::default()
        }
    }

    pub fn with_vehicle(mut self, id: VehicleId) -> Self {
        self.vehicle_id = Some(id);
        self
    }

    pub fn with_driver(mut self, id: DriverId) -> Self {
        self.driver_id = Some(id);
        self
    }

    pub fn with_route(mut self, id: RouteId) -> Self {
        self.route_id = Some(id);
        self
    }

    pub fn with_tariff(mut self, id: TariffId) -> Self {
        self.tariff_id = Some(id);
        self
    }

    fn conditions(&self) -> Conditions {
        let mut conditions = Conditions::default();
        if let Some(statuses) = &self.statuses {
            conditions.push_in("status", statuses.clone());
        }
        if let Some(id) = self.vehicle_id {
            conditions.push("vehicle_id = ?", id);
        }
        if let Some(id) = self.driver_id {
            conditions.push("driver_id = ?", id);
        }
        if let Some(id) = self.route_id {
            conditions.push("route_id = ?", id);
        }
        if let Some(id) = self.tariff_id {
            conditions.push("tariff_id = ?", id);
        }
        if let Some(from) = self.scheduled_from {
            conditions.push("scheduled_at >= ?", from);
        }
        if let Some(to) = self.scheduled_to {
            conditions.push("scheduled_at <= ?", to);
        }
        if let Some(min) = self.min_weight_kg {
            conditions.push("weight_kg >= ?", min);
        }
        if let Some(max) = self.max_weight_kg {
            conditions.push("weight_kg <= ?", max);
        }
        conditions
    }
}

impl ToSql for ShipmentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ShipmentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err: Error| FromSqlError::Other(Box::new(err)))
    }
}

impl Record for Shipment {
    const KIND: EntityKind = EntityKind::Shipment;
    const TABLE: &'static str = "shipments";
    const COLUMNS: &'static str = "id, scheduled_at, weight_kg, status, vehicle_id, driver_id, \
                                   route_id, tariff_id, total_cost";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Shipment {
            id: row.get(0)?,
            scheduled_at: row.get(1)?,
            weight_kg: row.get(2)?,
            status: row.get(3)?,
            vehicle_id: row.get(4)?,
            driver_id: row.get(5)?,
            route_id: row.get(6)?,
            tariff_id: row.get(7)?,
            total_cost: row.get(8)?,
        })
    }
}

pub fn get(conn: &Connection, id: ShipmentId) -> Result<Shipment> {
    fetch(conn, id)
}

/// List shipments, most recently scheduled first.
pub fn list(conn: &Connection, filter: &ShipmentFilter) -> Result<Vec<Shipment>> {
    select(conn, &filter.conditions(), "scheduled_at DESC, id DESC")
}

pub(crate) fn insert(
    conn: &Connection,
    request: &NewShipment,
    status: ShipmentStatus,
    total_cost: f64,
) -> Result<Shipment> {
    conn.execute(
        "INSERT INTO shipments
            (scheduled_at, weight_kg, status, vehicle_id, driver_id, route_id, tariff_id, total_cost)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            request.scheduled_at,
            request.weight_kg,
            status,
            request.vehicle_id,
            request.driver_id,
            request.route_id,
            request.tariff_id,
            total_cost
        ],
    )?;
    fetch(conn, conn.last_insert_rowid())
}

/// Replace the references, schedule, weight and cost of an existing shipment.
pub(crate) fn replace(
    conn: &Connection,
    id: ShipmentId,
    request: &NewShipment,
    total_cost: f64,
) -> Result<Shipment> {
    let changed = conn.execute(
        "UPDATE shipments
         SET scheduled_at = ?2, weight_kg = ?3, vehicle_id = ?4, driver_id = ?5,
             route_id = ?6, tariff_id = ?7, total_cost = ?8
         WHERE id = ?1",
        params![
            id,
            request.scheduled_at,
            request.weight_kg,
            request.vehicle_id,
            request.driver_id,
            request.route_id,
            request.tariff_id,
            total_cost
        ],
    )?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Shipment, id));
    }
    fetch(conn, id)
}

pub(crate) fn set_status(conn: &Connection, id: ShipmentId, status: ShipmentStatus) -> Result<()> {
    let changed = conn.execute(
        "UPDATE shipments SET status = ?2 WHERE id = ?1",
        params![id, status],
    )?;
    if changed == 0 {
        return Err(Error::not_found(EntityKind::Shipment, id));
    }
    Ok(())
}

pub(crate) fn set_cost(conn: &Connection, id: ShipmentId, total_cost: f64) -> Result<()> {
    conn.execute(
        "UPDATE shipments SET total_cost = ?2 WHERE id = ?1",
        params![id, total_cost],
    )?;
    Ok(())
}

pub(crate) fn delete(conn: &Connection, id: ShipmentId) -> Result<()> {
    remove::<Shipment>(conn, id)
}
