//! Create and update operations for vehicles, drivers, routes and tariffs.
//!
//! Field validation lives on the `*Fields` types; this module adds the checks
//! that need the store (unique plate and license numbers, capacity against
//! active shipments). Route and tariff edits that affect pricing go through
//! [`crate::ShipmentLifecycle`] instead.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{
    Driver, DriverFields, DriverId, Route, RouteFields, Tariff, TariffFields, Vehicle,
    VehicleFields, VehicleId,
};
use crate::store::{drivers, routes, shipments, tariffs, vehicles, ShipmentFilter, Store};

/// Entity registration over a borrowed [`Store`].
pub struct Registry<'s> {
    store: &'s mut Store,
}

impl<'s> Registry<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    pub fn add_vehicle(&mut self, fields: &VehicleFields) -> Result<Vehicle> {
        fields.validate()?;
        self.store.write(|tx| {
            if vehicles::find_by_plate(tx, &fields.license_plate)?.is_some() {
                return Err(duplicate("license_plate", &fields.license_plate));
            }
            let vehicle = vehicles::insert(tx, fields)?;
            info!(vehicle_id = vehicle.id, plate = %vehicle.license_plate, "registered vehicle");
            Ok(vehicle)
        })
    }

    /// Replace a vehicle's fields.
    ///
    /// Lowering the capacity below the weight of a pending or in-transit
    /// shipment on this vehicle fails with [`Error::OverCapacity`].
    pub fn update_vehicle(&mut self, id: VehicleId, fields: &VehicleFields) -> Result<Vehicle> {
        fields.validate()?;
        self.store.write(|tx| {
            vehicles::get(tx, id)?;
            if let Some(other) = vehicles::find_by_plate(tx, &fields.license_plate)? {
                if other.id != id {
                    return Err(duplicate("license_plate", &fields.license_plate));
                }
            }

            let capacity_kg = fields.capacity_kg();
            let heaviest = shipments::list(tx, &ShipmentFilter::active().with_vehicle(id))?
                .into_iter()
                .map(|shipment| shipment.weight_kg)
                .fold(0.0_f64, f64::max);
            if heaviest > capacity_kg {
                return Err(Error::OverCapacity {
                    vehicle_id: id,
                    weight_kg: heaviest,
                    capacity_kg,
                });
            }

            let vehicle = vehicles::update(tx, id, fields)?;
            info!(vehicle_id = id, "updated vehicle");
            Ok(vehicle)
        })
    }

    /// Register a driver. Experience is derived from `hire_date` as of `today`.
    pub fn add_driver(&mut self, fields: &DriverFields, today: NaiveDate) -> Result<Driver> {
        fields.validate(today)?;
        self.store.write(|tx| {
            if drivers::find_by_license(tx, &fields.license_number)?.is_some() {
                return Err(duplicate("license_number", &fields.license_number));
            }
            let driver = drivers::insert(tx, fields)?;
            info!(
                driver_id = driver.id,
                experience_years = driver.experience_years(today),
                "registered driver"
            );
            Ok(driver)
        })
    }

    /// Replace a driver's personal fields. The vehicle assignment is untouched.
    pub fn update_driver(
        &mut self,
        id: DriverId,
        fields: &DriverFields,
        today: NaiveDate,
    ) -> Result<Driver> {
        fields.validate(today)?;
        self.store.write(|tx| {
            drivers::get(tx, id)?;
            if let Some(other) = drivers::find_by_license(tx, &fields.license_number)? {
                if other.id != id {
                    return Err(duplicate("license_number", &fields.license_number));
                }
            }
            let driver = drivers::update(tx, id, fields)?;
            info!(driver_id = id, "updated driver");
            Ok(driver)
        })
    }

    pub fn add_route(&mut self, fields: &RouteFields) -> Result<Route> {
        fields.validate()?;
        self.store.write(|tx| {
            let route = routes::insert(tx, fields)?;
            info!(route_id = route.id, distance_km = route.distance_km, "registered route");
            Ok(route)
        })
    }

    pub fn add_tariff(&mut self, fields: &TariffFields) -> Result<Tariff> {
        fields.validate()?;
        self.store.write(|tx| {
            let tariff = tariffs::insert(tx, fields)?;
            info!(
                tariff_id = tariff.id,
                cargo_type = %tariff.cargo_type,
                validity = %tariff.validity_label(),
                "registered tariff"
            );
            Ok(tariff)
        })
    }
}

fn duplicate(field: &'static str, value: &str) -> Error {
    Error::validation(field, format!("'{value}' is already registered"))
}
