//! Common test utilities and fixture builders.
//!
//! [`Fleet`] wraps an in-memory store seeded with one vehicle, one driver
//! assigned to it, one 500 km route and one tariff (10 per km, 3000 floor,
//! valid `2024-01-01 .. 2024-06-01`).

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fleetdesk_lib::{
    AssignmentManager, Driver, DriverFields, NewShipment, Registry, Route, RouteFields, Shipment,
    ShipmentLifecycle, Store, Tariff, TariffFields, Vehicle, VehicleFields,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
}

/// Reference "today" for experience calculations.
pub fn today() -> NaiveDate {
    date(2024, 3, 1)
}

/// Scheduled time used by [`Fleet::request`].
pub fn scheduled() -> NaiveDateTime {
    date(2024, 3, 15)
        .and_hms_opt(10, 30, 0)
        .expect("valid time")
}

pub fn vehicle_fields(plate: &str, load_capacity_t: f64) -> VehicleFields {
    VehicleFields {
        brand: "Volvo FH".to_string(),
        license_plate: plate.to_string(),
        load_capacity_t,
        fuel_consumption: 28.5,
        body_type: "tent".to_string(),
    }
}

pub fn driver_fields(license: &str, hire_date: NaiveDate) -> DriverFields {
    DriverFields {
        full_name: format!("Driver {license}"),
        license_number: license.to_string(),
        license_category: "CE".to_string(),
        hire_date,
    }
}

pub fn route_fields(distance_km: f64) -> RouteFields {
    RouteFields {
        origin: "Moscow".to_string(),
        destination: "Saint Petersburg".to_string(),
        distance_km,
        avg_duration_hours: distance_km / 70.0,
        road_type: "highway".to_string(),
    }
}

pub fn tariff_fields(
    price_per_km: f64,
    min_price: f64,
    valid_from: NaiveDateTime,
    valid_until: Option<NaiveDateTime>,
) -> TariffFields {
    TariffFields {
        cargo_type: "general".to_string(),
        price_per_km,
        min_price,
        valid_from,
        valid_until,
        description: None,
    }
}

pub struct Fleet {
    pub store: Store,
    pub vehicle: Vehicle,
    pub driver: Driver,
    pub route: Route,
    pub tariff: Tariff,
}

impl Fleet {
    pub fn seeded() -> Self {
        let mut store = Store::open_in_memory().expect("open in-memory store");
        let (vehicle, driver, route, tariff) = {
            let mut registry = Registry::new(&mut store);
            let vehicle = registry
                .add_vehicle(&vehicle_fields("A100AA77", 10.0))
                .expect("seed vehicle");
            let driver = registry
                .add_driver(&driver_fields("77 01 000001", date(2015, 5, 20)), today())
                .expect("seed driver");
            let route = registry
                .add_route(&route_fields(500.0))
                .expect("seed route");
            let tariff = registry
                .add_tariff(&tariff_fields(
                    10.0,
                    3000.0,
                    at(2024, 1, 1),
                    Some(at(2024, 6, 1)),
                ))
                .expect("seed tariff");
            (vehicle, driver, route, tariff)
        };
        let driver = AssignmentManager::new(&mut store)
            .assign(driver.id, Some(vehicle.id))
            .expect("seed assignment");

        Self {
            store,
            vehicle,
            driver,
            route,
            tariff,
        }
    }

    pub fn registry(&mut self) -> Registry<'_> {
        Registry::new(&mut self.store)
    }

    pub fn assignments(&mut self) -> AssignmentManager<'_> {
        AssignmentManager::new(&mut self.store)
    }

    pub fn lifecycle(&mut self) -> ShipmentLifecycle<'_> {
        ShipmentLifecycle::new(&mut self.store)
    }

    pub fn add_vehicle(&mut self, plate: &str, load_capacity_t: f64) -> Vehicle {
        self.registry()
            .add_vehicle(&vehicle_fields(plate, load_capacity_t))
            .expect("add vehicle")
    }

    pub fn add_driver(&mut self, license: &str) -> Driver {
        self.registry()
            .add_driver(&driver_fields(license, date(2018, 9, 1)), today())
            .expect("add driver")
    }

    pub fn add_route(&mut self, distance_km: f64) -> Route {
        self.registry()
            .add_route(&route_fields(distance_km))
            .expect("add route")
    }

    /// Open-ended tariff starting 2024-01-01.
    pub fn add_tariff(&mut self, price_per_km: f64, min_price: f64) -> Tariff {
        self.registry()
            .add_tariff(&tariff_fields(price_per_km, min_price, at(2024, 1, 1), None))
            .expect("add tariff")
    }

    /// Shipment request over the seeded entities.
    pub fn request(&self, weight_kg: f64) -> NewShipment {
        NewShipment {
            vehicle_id: self.vehicle.id,
            driver_id: self.driver.id,
            route_id: self.route.id,
            tariff_id: self.tariff.id,
            scheduled_at: scheduled(),
            weight_kg,
            status: None,
        }
    }

    pub fn ship(&mut self, weight_kg: f64) -> Shipment {
        let request = self.request(weight_kg);
        self.lifecycle().create(&request).expect("create shipment")
    }
}
