//! Deletion guards.
//!
//! Vehicles, drivers and routes may be deleted once no pending or in-transit
//! shipment refers to them; terminal shipments keep the stale id. Tariffs are
//! stricter: any shipment at all blocks deletion, since billed costs were
//! derived from them.

use rusqlite::Connection;
use tracing::{info, warn};

use crate::assignment::release_vehicle;
use crate::error::{Error, Result};
use crate::model::{DriverId, EntityKind, RouteId, TariffId, VehicleId};
use crate::store::{drivers, routes, shipments, tariffs, vehicles, ShipmentFilter};

/// Number of blocking shipment ids carried in a refusal.
const LISTED_SHIPMENTS: usize = 5;

pub(crate) fn delete_vehicle(conn: &Connection, id: VehicleId) -> Result<()> {
    vehicles::get(conn, id)?;
    refuse_if_referenced(
        conn,
        EntityKind::Vehicle,
        id,
        &ShipmentFilter::active().with_vehicle(id),
    )?;
    let released = release_vehicle(conn, id)?;
    vehicles::delete(conn, id)?;
    info!(vehicle_id = id, released_driver = ?released, "deleted vehicle");
    Ok(())
}

pub(crate) fn delete_driver(conn: &Connection, id: DriverId) -> Result<()> {
    let driver = drivers::get(conn, id)?;
    refuse_if_referenced(
        conn,
        EntityKind::Driver,
        id,
        &ShipmentFilter::active().with_driver(id),
    )?;
    drivers::delete(conn, id)?;
    info!(driver_id = id, freed_vehicle = ?driver.vehicle_id, "deleted driver");
    Ok(())
}

pub(crate) fn delete_route(conn: &Connection, id: RouteId) -> Result<()> {
    routes::get(conn, id)?;
    refuse_if_referenced(
        conn,
        EntityKind::Route,
        id,
        &ShipmentFilter::active().with_route(id),
    )?;
    routes::delete(conn, id)?;
    info!(route_id = id, "deleted route");
    Ok(())
}

pub(crate) fn delete_tariff(conn: &Connection, id: TariffId) -> Result<()> {
    tariffs::get(conn, id)?;
    refuse_if_referenced(
        conn,
        EntityKind::Tariff,
        id,
        &ShipmentFilter::default().with_tariff(id),
    )?;
    tariffs::delete(conn, id)?;
    info!(tariff_id = id, "deleted tariff");
    Ok(())
}

fn refuse_if_referenced(
    conn: &Connection,
    entity: EntityKind,
    id: i64,
    filter: &ShipmentFilter,
) -> Result<()> {
    let mut shipment_ids: Vec<_> = shipments::list(conn, filter)?
        .into_iter()
        .map(|shipment| shipment.id)
        .collect();
    if shipment_ids.is_empty() {
        return Ok(());
    }

    let count = shipment_ids.len();
    shipment_ids.sort_unstable();
    shipment_ids.truncate(LISTED_SHIPMENTS);
    warn!(%entity, id, count, "refused to delete referenced entity");
    Err(Error::ReferencedByActiveShipment {
        entity,
        id,
        count,
        shipment_ids,
    })
}
