//! Shipment lifecycle: creation, edits, status transitions, deletion guards
//! and cost recomputation after tariff or route edits.
//!
//! Every method runs in a single store transaction. Validation happens inside
//! that transaction, so the tariff window check for a new shipment sees the
//! same state that is committed.

mod guard;
mod recalc;

use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use crate::cost::shipment_cost;
use crate::error::{Error, Result};
use crate::model::{
    DriverId, NewShipment, Route, RouteFields, RouteId, Shipment, ShipmentEdit, ShipmentId,
    ShipmentStatus, Tariff, TariffFields, TariffId, VehicleId,
};
use crate::store::{drivers, routes, shipments, tariffs, vehicles, Store};
use crate::tariff::ensure_active;

/// Outcome of a tariff edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffRevision {
    pub tariff: Tariff,
    /// Pending and in-transit shipments whose cost was recomputed.
    pub recalculated: usize,
}

/// Outcome of a route edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRevision {
    pub route: Route,
    /// Pending and in-transit shipments whose cost was recomputed.
    pub recalculated: usize,
}

/// Shipment operations over a borrowed [`Store`].
pub struct ShipmentLifecycle<'s> {
    store: &'s mut Store,
}

impl<'s> ShipmentLifecycle<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Validate and persist a new shipment with its computed cost.
    ///
    /// Checks run in this order: positive weight, vehicle capacity
    /// ([`Error::OverCapacity`]), driver and route existence, then tariff
    /// validity at the scheduled time ([`Error::TariffNotActive`]). The status
    /// defaults to `pending`. A failure leaves no record behind.
    pub fn create(&mut self, request: &NewShipment) -> Result<Shipment> {
        self.store.write(|tx| {
            let total_cost = price_request(tx, request)?;
            let status = request.status.unwrap_or(ShipmentStatus::Pending);
            let shipment = shipments::insert(tx, request, status, total_cost)?;
            info!(
                shipment_id = shipment.id,
                vehicle_id = shipment.vehicle_id,
                tariff_id = shipment.tariff_id,
                total_cost,
                %status,
                "created shipment"
            );
            Ok(shipment)
        })
    }

    /// Change the references, schedule or weight of a non-terminal shipment.
    ///
    /// The merged shipment goes through the same checks as [`Self::create`]
    /// and its cost is recomputed. Delivered and cancelled shipments are
    /// frozen.
    pub fn edit(&mut self, id: ShipmentId, edit: &ShipmentEdit) -> Result<Shipment> {
        self.store.write(|tx| {
            let current = shipments::get(tx, id)?;
            if current.status.is_terminal() {
                return Err(Error::validation(
                    "status",
                    format!(
                        "shipment {id} is {} and can no longer be edited",
                        current.status
                    ),
                ));
            }
            if edit.is_empty() {
                return Ok(current);
            }

            let request = edit.apply_to(&current);
            let total_cost = price_request(tx, &request)?;
            let shipment = shipments::replace(tx, id, &request, total_cost)?;
            info!(
                shipment_id = id,
                previous_cost = current.total_cost,
                total_cost,
                "edited shipment"
            );
            Ok(shipment)
        })
    }

    /// Move a shipment to `to` if the status machine allows it.
    pub fn transition(&mut self, id: ShipmentId, to: ShipmentStatus) -> Result<Shipment> {
        self.store.write(|tx| {
            let shipment = shipments::get(tx, id)?;
            if !shipment.status.can_transition_to(to) {
                return Err(Error::InvalidTransition {
                    shipment_id: id,
                    from: shipment.status,
                    to,
                });
            }
            shipments::set_status(tx, id, to)?;
            info!(shipment_id = id, from = %shipment.status, to = %to, "shipment status changed");
            Ok(Shipment {
                status: to,
                ..shipment
            })
        })
    }

    /// Remove a shipment regardless of status.
    pub fn delete_shipment(&mut self, id: ShipmentId) -> Result<()> {
        self.store.write(|tx| {
            shipments::delete(tx, id)?;
            info!(shipment_id = id, "deleted shipment");
            Ok(())
        })
    }

    /// Replace a tariff's fields. When the per-km or minimum price changes,
    /// every pending or in-transit shipment under it is repriced in the same
    /// transaction; terminal shipments keep their billed cost.
    pub fn update_tariff(&mut self, id: TariffId, fields: &TariffFields) -> Result<TariffRevision> {
        fields.validate()?;
        self.store.write(|tx| {
            let current = tariffs::get(tx, id)?;
            let tariff = tariffs::update(tx, id, fields)?;
            let recalculated = if fields.changes_pricing_of(&current) {
                recalc::reprice_tariff(tx, &tariff)?
            } else {
                0
            };
            info!(tariff_id = id, recalculated, "updated tariff");
            Ok(TariffRevision {
                tariff,
                recalculated,
            })
        })
    }

    /// Replace a route's fields, repricing active shipments when the distance
    /// changes.
    pub fn update_route(&mut self, id: RouteId, fields: &RouteFields) -> Result<RouteRevision> {
        fields.validate()?;
        self.store.write(|tx| {
            let current = routes::get(tx, id)?;
            let route = routes::update(tx, id, fields)?;
            let recalculated = if route.distance_km != current.distance_km {
                recalc::reprice_route(tx, &route)?
            } else {
                0
            };
            info!(route_id = id, recalculated, "updated route");
            Ok(RouteRevision {
                route,
                recalculated,
            })
        })
    }

    /// Reprice the active shipments of a tariff from its current figures.
    pub fn recalculate_tariff(&mut self, id: TariffId) -> Result<usize> {
        self.store.write(|tx| {
            let tariff = tariffs::get(tx, id)?;
            let recalculated = recalc::reprice_tariff(tx, &tariff)?;
            info!(tariff_id = id, recalculated, "recalculated tariff shipments");
            Ok(recalculated)
        })
    }

    /// Delete a vehicle no active shipment uses, releasing its driver.
    pub fn delete_vehicle(&mut self, id: VehicleId) -> Result<()> {
        self.store.write(|tx| guard::delete_vehicle(tx, id))
    }

    /// Delete a driver no active shipment uses.
    pub fn delete_driver(&mut self, id: DriverId) -> Result<()> {
        self.store.write(|tx| guard::delete_driver(tx, id))
    }

    /// Delete a route no active shipment uses.
    pub fn delete_route(&mut self, id: RouteId) -> Result<()> {
        self.store.write(|tx| guard::delete_route(tx, id))
    }

    /// Delete a tariff no shipment has ever been billed under.
    pub fn delete_tariff(&mut self, id: TariffId) -> Result<()> {
        self.store.write(|tx| guard::delete_tariff(tx, id))
    }
}

/// Run the creation checks for `request` and return its cost.
fn price_request(conn: &Connection, request: &NewShipment) -> Result<f64> {
    if !request.weight_kg.is_finite() || request.weight_kg <= 0.0 {
        return Err(Error::validation(
            "weight_kg",
            format!("must be a positive number, got {}", request.weight_kg),
        ));
    }

    let vehicle = vehicles::get(conn, request.vehicle_id)?;
    if !vehicle.can_carry(request.weight_kg) {
        return Err(Error::OverCapacity {
            vehicle_id: vehicle.id,
            weight_kg: request.weight_kg,
            capacity_kg: vehicle.capacity_kg(),
        });
    }

    drivers::get(conn, request.driver_id)?;
    let route = routes::get(conn, request.route_id)?;
    let tariff = ensure_active(conn, request.tariff_id, request.scheduled_at)?;
    Ok(shipment_cost(&route, &tariff))
}
