mod common;

use common::{date, driver_fields, today, vehicle_fields, Fleet};
use fleetdesk_lib::{
    route_statistics, shipment_summary, Error, ErrorKind, ShipmentFilter, ShipmentStatus, Store,
    VehicleFilter,
};

#[test]
fn duplicate_plate_is_rejected_on_create_and_update() {
    let mut fleet = Fleet::seeded();
    let err = fleet
        .registry()
        .add_vehicle(&vehicle_fields("A100AA77", 3.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            field: "license_plate",
            ..
        }
    ));

    let spare = fleet.add_vehicle("B200BB77", 3.0);
    let err = fleet
        .registry()
        .update_vehicle(spare.id, &vehicle_fields("A100AA77", 3.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Keeping one's own plate is fine.
    let updated = fleet
        .registry()
        .update_vehicle(spare.id, &vehicle_fields("B200BB77", 4.5))
        .unwrap();
    assert_eq!(updated.load_capacity_t, 4.5);
}

#[test]
fn capacity_cannot_drop_below_active_cargo() {
    let mut fleet = Fleet::seeded();
    fleet.ship(6_000.0);
    let vehicle_id = fleet.vehicle.id;

    let err = fleet
        .registry()
        .update_vehicle(vehicle_id, &vehicle_fields("A100AA77", 5.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::OverCapacity {
            weight_kg,
            capacity_kg,
            ..
        } if weight_kg == 6_000.0 && capacity_kg == 5_000.0
    ));

    fleet
        .registry()
        .update_vehicle(vehicle_id, &vehicle_fields("A100AA77", 6.0))
        .expect("capacity equal to the heaviest cargo is allowed");
}

#[test]
fn driver_experience_is_derived_and_capped() {
    let mut fleet = Fleet::seeded();

    let veteran = fleet
        .registry()
        .add_driver(&driver_fields("50 00 000040", date(1984, 3, 1)), today())
        .unwrap();
    assert_eq!(veteran.experience_years(today()), 40);

    let err = fleet
        .registry()
        .add_driver(&driver_fields("50 00 000041", date(1983, 3, 1)), today())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            field: "hire_date",
            ..
        }
    ));

    let err = fleet
        .registry()
        .add_driver(&driver_fields("50 00 000042", date(2024, 3, 2)), today())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn duplicate_license_number_is_rejected() {
    let mut fleet = Fleet::seeded();
    let err = fleet
        .registry()
        .add_driver(&driver_fields("77 01 000001", date(2020, 1, 1)), today())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            field: "license_number",
            ..
        }
    ));
}

#[test]
fn updating_a_driver_keeps_the_assignment() {
    let mut fleet = Fleet::seeded();
    let driver_id = fleet.driver.id;
    let mut fields = driver_fields("77 01 000001", date(2016, 1, 10));
    fields.full_name = "Ivan Petrov".to_string();

    let driver = fleet
        .registry()
        .update_driver(driver_id, &fields, today())
        .unwrap();
    assert_eq!(driver.full_name, "Ivan Petrov");
    assert_eq!(driver.vehicle_id, Some(fleet.vehicle.id));
}

#[test]
fn vehicle_filters() {
    let mut fleet = Fleet::seeded();
    fleet.add_vehicle("B200BB77", 2.0);
    fleet.add_vehicle("C300CC77", 20.0);

    let heavy = fleet
        .store
        .vehicles(&VehicleFilter {
            min_load_capacity_t: Some(10.0),
            ..VehicleFilter::default()
        })
        .unwrap();
    assert_eq!(heavy.len(), 2);

    let idle_heavy = fleet
        .store
        .vehicles(&VehicleFilter {
            min_load_capacity_t: Some(10.0),
            unassigned_only: true,
            ..VehicleFilter::default()
        })
        .unwrap();
    assert_eq!(idle_heavy.len(), 1);
    assert_eq!(idle_heavy[0].license_plate, "C300CC77");
}

#[test]
fn reports_summarise_routes_and_shipments() {
    let mut fleet = Fleet::seeded();
    fleet.add_route(100.0);
    let delivered = fleet.ship(1_000.0).id;
    let cancelled = fleet.ship(1_000.0).id;
    fleet.ship(1_000.0);
    {
        let mut lifecycle = fleet.lifecycle();
        lifecycle.transition(delivered, ShipmentStatus::InTransit).unwrap();
        lifecycle.transition(delivered, ShipmentStatus::Delivered).unwrap();
        lifecycle.transition(cancelled, ShipmentStatus::Cancelled).unwrap();
    }

    let stats = route_statistics(&fleet.store).unwrap();
    assert_eq!(stats.route_count, 2);
    assert_eq!(stats.total_distance_km, 600.0);
    assert_eq!(stats.average_distance_km, Some(300.0));
    assert_eq!(stats.min_distance_km, Some(100.0));
    assert_eq!(stats.max_distance_km, Some(500.0));

    let summary = shipment_summary(&fleet.store, &ShipmentFilter::default()).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(
        (summary.pending, summary.in_transit, summary.delivered, summary.cancelled),
        (1, 0, 1, 1)
    );
    assert_eq!(summary.billed_cost, 10_000.0);

    let active = shipment_summary(&fleet.store, &ShipmentFilter::active()).unwrap();
    assert_eq!(active.total, 1);
}

#[test]
fn shipment_weight_range_is_inclusive() {
    let mut fleet = Fleet::seeded();
    let light = fleet.ship(500.0).id;
    let medium = fleet.ship(2_000.0).id;
    let heavy = fleet.ship(8_000.0).id;

    let ids = |filter: &ShipmentFilter| -> Vec<i64> {
        let mut ids: Vec<_> = fleet
            .store
            .shipments(filter)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids
    };

    let mid_band = ShipmentFilter {
        min_weight_kg: Some(500.0),
        max_weight_kg: Some(2_000.0),
        ..ShipmentFilter::default()
    };
    assert_eq!(ids(&mid_band), vec![light, medium]);

    let heavy_only = ShipmentFilter {
        min_weight_kg: Some(2_000.01),
        ..ShipmentFilter::default()
    };
    assert_eq!(ids(&heavy_only), vec![heavy]);

    let summary = shipment_summary(&fleet.store, &mid_band).unwrap();
    assert_eq!(summary.total, 2);
}

#[test]
fn empty_store_reports_no_averages() {
    let store = Store::open_in_memory().unwrap();
    let stats = route_statistics(&store).unwrap();
    assert_eq!(stats.route_count, 0);
    assert_eq!(stats.average_distance_km, None);
    assert_eq!(stats.max_distance_km, None);
}

#[test]
fn file_backed_store_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("fleet.db");
    {
        let mut store = Store::open(&path).unwrap();
        fleetdesk_lib::Registry::new(&mut store)
            .add_vehicle(&vehicle_fields("E500EE77", 7.5))
            .unwrap();
    }
    let store = Store::open(&path).unwrap();
    assert_eq!(store.path(), Some(path.as_path()));
    let vehicles = store.vehicles(&VehicleFilter::default()).unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].capacity_kg(), 7_500.0);
}
