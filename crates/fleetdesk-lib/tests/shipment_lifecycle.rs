mod common;

use common::{at, Fleet};
use fleetdesk_lib::{
    Error, ErrorKind, ShipmentEdit, ShipmentFilter, ShipmentStatus,
};

#[test]
fn creation_prices_and_defaults_to_pending() {
    let mut fleet = Fleet::seeded();
    let shipment = fleet.ship(4_000.0);

    assert_eq!(shipment.status, ShipmentStatus::Pending);
    // 500 km at 10 per km clears the 3000 floor.
    assert_eq!(shipment.total_cost, 5000.0);
    assert_eq!(fleet.store.shipment(shipment.id).unwrap(), shipment);
}

#[test]
fn floor_price_applies_to_short_routes() {
    let mut fleet = Fleet::seeded();
    let short = fleet.add_route(100.0);
    let mut request = fleet.request(1_000.0);
    request.route_id = short.id;

    let shipment = fleet.lifecycle().create(&request).unwrap();
    assert_eq!(shipment.total_cost, 3000.0);
}

#[test]
fn over_capacity_creates_no_record() {
    let mut fleet = Fleet::seeded();
    let request = fleet.request(10_000.5);

    let err = fleet.lifecycle().create(&request).unwrap_err();
    match err {
        Error::OverCapacity {
            weight_kg,
            capacity_kg,
            ..
        } => {
            assert_eq!(weight_kg, 10_000.5);
            assert_eq!(capacity_kg, 10_000.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fleet
        .store
        .shipments(&ShipmentFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn exact_capacity_is_accepted() {
    let mut fleet = Fleet::seeded();
    let shipment = fleet.ship(10_000.0);
    assert_eq!(shipment.weight_kg, 10_000.0);
}

#[test]
fn exact_capacity_of_fractional_rating_is_accepted() {
    let mut fleet = Fleet::seeded();
    let small = fleet.add_vehicle("B201BB77", 2.01);
    let mut request = fleet.request(2_010.0);
    request.vehicle_id = small.id;

    let shipment = fleet.lifecycle().create(&request).unwrap();
    assert_eq!(shipment.weight_kg, 2_010.0);

    request.weight_kg = 2_010.001;
    let err = fleet.lifecycle().create(&request).unwrap_err();
    assert!(matches!(
        err,
        Error::OverCapacity { capacity_kg, .. } if capacity_kg == 2_010.0
    ));
}

#[test]
fn non_positive_weight_is_a_validation_error() {
    let mut fleet = Fleet::seeded();
    for weight in [0.0, -5.0, f64::NAN] {
        let request = fleet.request(weight);
        let err = fleet.lifecycle().create(&request).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "weight_kg",
                ..
            }
        ));
    }
}

#[test]
fn tariff_must_be_active_at_the_scheduled_time() {
    let mut fleet = Fleet::seeded();
    let mut request = fleet.request(1_000.0);
    request.scheduled_at = at(2024, 6, 1);

    let err = fleet.lifecycle().create(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TariffNotActive);
    assert!(fleet
        .store
        .shipments(&ShipmentFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn missing_references_are_not_found() {
    let mut fleet = Fleet::seeded();
    let mut request = fleet.request(1_000.0);
    request.driver_id = 999;
    let err = fleet.lifecycle().create(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn status_override_at_creation() {
    let mut fleet = Fleet::seeded();
    let mut request = fleet.request(1_000.0);
    request.status = Some(ShipmentStatus::InTransit);
    let shipment = fleet.lifecycle().create(&request).unwrap();
    assert_eq!(shipment.status, ShipmentStatus::InTransit);
}

#[test]
fn forward_transitions_reach_delivered() {
    let mut fleet = Fleet::seeded();
    let id = fleet.ship(2_000.0).id;

    let moving = fleet
        .lifecycle()
        .transition(id, ShipmentStatus::InTransit)
        .unwrap();
    assert_eq!(moving.status, ShipmentStatus::InTransit);
    fleet
        .lifecycle()
        .transition(id, ShipmentStatus::Delivered)
        .unwrap();
    assert_eq!(
        fleet.store.shipment(id).unwrap().status,
        ShipmentStatus::Delivered
    );
}

#[test]
fn illegal_transitions_leave_status_unchanged() {
    let mut fleet = Fleet::seeded();
    let id = fleet.ship(2_000.0).id;

    let err = fleet
        .lifecycle()
        .transition(id, ShipmentStatus::Delivered)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition {
            from: ShipmentStatus::Pending,
            to: ShipmentStatus::Delivered,
            ..
        }
    ));

    fleet
        .lifecycle()
        .transition(id, ShipmentStatus::Cancelled)
        .unwrap();
    let err = fleet
        .lifecycle()
        .transition(id, ShipmentStatus::Pending)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(
        fleet.store.shipment(id).unwrap().status,
        ShipmentStatus::Cancelled
    );
}

#[test]
fn edit_reruns_checks_and_reprices() {
    let mut fleet = Fleet::seeded();
    let id = fleet.ship(2_000.0).id;
    let long = fleet.add_route(800.0);

    let edited = fleet
        .lifecycle()
        .edit(
            id,
            &ShipmentEdit {
                route_id: Some(long.id),
                weight_kg: Some(3_500.0),
                ..ShipmentEdit::default()
            },
        )
        .unwrap();
    assert_eq!(edited.route_id, long.id);
    assert_eq!(edited.weight_kg, 3_500.0);
    assert_eq!(edited.total_cost, 8000.0);

    let err = fleet
        .lifecycle()
        .edit(
            id,
            &ShipmentEdit {
                weight_kg: Some(12_000.0),
                ..ShipmentEdit::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OverCapacity);
    assert_eq!(fleet.store.shipment(id).unwrap(), edited);
}

#[test]
fn terminal_shipments_cannot_be_edited() {
    let mut fleet = Fleet::seeded();
    let id = fleet.ship(2_000.0).id;
    fleet
        .lifecycle()
        .transition(id, ShipmentStatus::Cancelled)
        .unwrap();

    let err = fleet
        .lifecycle()
        .edit(
            id,
            &ShipmentEdit {
                weight_kg: Some(100.0),
                ..ShipmentEdit::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "status", .. }));
}

#[test]
fn explicit_deletion_works_in_any_status() {
    let mut fleet = Fleet::seeded();
    let id = fleet.ship(2_000.0).id;
    fleet
        .lifecycle()
        .transition(id, ShipmentStatus::InTransit)
        .unwrap();

    fleet.lifecycle().delete_shipment(id).unwrap();
    assert_eq!(fleet.store.shipment(id).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        fleet.lifecycle().delete_shipment(id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}
