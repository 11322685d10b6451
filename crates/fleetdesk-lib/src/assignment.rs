//! Exclusive driver/vehicle pairing.
//!
//! The nullable, unique `vehicle_id` column on the driver row is the only
//! ownership edge between a driver and a vehicle; the vehicle side is derived
//! from it. Every write to that column goes through this module so the 1:1
//! invariant is maintained in one place:
//!
//! - a vehicle is held by at most one driver, and assignment never steals a
//!   vehicle from its current holder;
//! - a driver holds at most one vehicle, so assigning a new one releases the
//!   old one;
//! - swaps exchange both references in a single transaction.

use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Driver, DriverId, Vehicle, VehicleId};
use crate::store::{drivers, fetch, vehicles, DriverFilter, Store, VehicleFilter};

/// A vehicle that has a driver and can carry a requested weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchableVehicle {
    pub vehicle: Vehicle,
    pub driver: Driver,
}

/// Maintains the driver/vehicle assignment over a borrowed [`Store`].
pub struct AssignmentManager<'s> {
    store: &'s mut Store,
}

impl<'s> AssignmentManager<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Bind `driver_id` to `vehicle_id`, or release its vehicle when `None`.
    ///
    /// Fails with [`Error::ConflictingAssignment`] when the vehicle is held by
    /// another driver; re-assigning a driver's own vehicle is a no-op success.
    pub fn assign(&mut self, driver_id: DriverId, vehicle_id: Option<VehicleId>) -> Result<Driver> {
        self.store.write(|tx| assign_in(tx, driver_id, vehicle_id))
    }

    /// Release whatever vehicle `driver_id` holds.
    pub fn unassign(&mut self, driver_id: DriverId) -> Result<Driver> {
        self.assign(driver_id, None)
    }

    /// Exchange the vehicles (either may be none) of two drivers atomically.
    pub fn swap(&mut self, first: DriverId, second: DriverId) -> Result<(Driver, Driver)> {
        self.store.write(|tx| swap_in(tx, first, second))
    }

    /// The driver holding `vehicle_id`, if any.
    pub fn vehicle_driver(&self, vehicle_id: VehicleId) -> Result<Option<Driver>> {
        let conn = self.store.connection();
        fetch::<Vehicle>(conn, vehicle_id)?;
        drivers::holder_of(conn, vehicle_id)?
            .map(|id| drivers::get(conn, id))
            .transpose()
    }

    /// Vehicles nobody drives.
    pub fn available_vehicles(&self) -> Result<Vec<Vehicle>> {
        vehicles::list(
            self.store.connection(),
            &VehicleFilter {
                unassigned_only: true,
                ..VehicleFilter::default()
            },
        )
    }

    /// Drivers without a vehicle.
    pub fn available_drivers(&self) -> Result<Vec<Driver>> {
        drivers::list(
            self.store.connection(),
            &DriverFilter {
                unassigned_only: true,
                ..DriverFilter::default()
            },
        )
    }

    /// Vehicles with an assigned driver whose capacity covers `weight_kg`.
    pub fn dispatchable_vehicles(&self, weight_kg: f64) -> Result<Vec<DispatchableVehicle>> {
        let conn = self.store.connection();
        let assigned = drivers::list(conn, &DriverFilter::default())?;

        let mut dispatchable = Vec::new();
        for driver in assigned {
            let Some(vehicle_id) = driver.vehicle_id else {
                continue;
            };
            let vehicle = vehicles::get(conn, vehicle_id)?;
            if vehicle.can_carry(weight_kg) {
                dispatchable.push(DispatchableVehicle { vehicle, driver });
            }
        }
        dispatchable.sort_by_key(|entry| entry.vehicle.id);
        debug!(weight_kg, count = dispatchable.len(), "listed dispatchable vehicles");
        Ok(dispatchable)
    }
}

fn assign_in(conn: &Connection, driver_id: DriverId, vehicle_id: Option<VehicleId>) -> Result<Driver> {
    let driver = drivers::get(conn, driver_id)?;

    if let Some(vehicle_id) = vehicle_id {
        fetch::<Vehicle>(conn, vehicle_id)?;
        match drivers::holder_of(conn, vehicle_id)? {
            Some(holder) if holder == driver_id => return Ok(driver),
            Some(holder) => {
                return Err(Error::ConflictingAssignment {
                    vehicle_id,
                    driver_id: holder,
                })
            }
            None => {}
        }
    }

    drivers::set_vehicle(conn, driver_id, vehicle_id)?;
    info!(
        driver_id,
        previous_vehicle = ?driver.vehicle_id,
        vehicle_id = ?vehicle_id,
        "driver assignment changed"
    );
    Ok(Driver {
        vehicle_id,
        ..driver
    })
}

fn swap_in(conn: &Connection, first: DriverId, second: DriverId) -> Result<(Driver, Driver)> {
    let a = drivers::get(conn, first)?;
    let b = drivers::get(conn, second)?;
    if a.id == b.id || a.vehicle_id == b.vehicle_id {
        return Ok((a, b));
    }

    // The vehicle column is unique, so park the first driver before moving
    // its vehicle across.
    drivers::set_vehicle(conn, a.id, None)?;
    drivers::set_vehicle(conn, b.id, a.vehicle_id)?;
    drivers::set_vehicle(conn, a.id, b.vehicle_id)?;

    info!(
        first = a.id,
        second = b.id,
        first_vehicle = ?b.vehicle_id,
        second_vehicle = ?a.vehicle_id,
        "swapped driver vehicles"
    );
    Ok((
        Driver {
            vehicle_id: b.vehicle_id,
            ..a.clone()
        },
        Driver {
            vehicle_id: a.vehicle_id,
            ..b
        },
    ))
}

/// Detach whichever driver holds `vehicle_id`. Used before deleting a vehicle.
pub(crate) fn release_vehicle(conn: &Connection, vehicle_id: VehicleId) -> Result<Option<DriverId>> {
    let holder = drivers::holder_of(conn, vehicle_id)?;
    if let Some(driver_id) = holder {
        drivers::set_vehicle(conn, driver_id, None)?;
        info!(driver_id, vehicle_id, "released vehicle from driver");
    }
    Ok(holder)
}
