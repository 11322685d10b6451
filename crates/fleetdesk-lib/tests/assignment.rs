mod common;

use common::Fleet;
use fleetdesk_lib::{EntityKind, Error, ErrorKind};

#[test]
fn assigning_a_held_vehicle_conflicts() {
    let mut fleet = Fleet::seeded();
    let other = fleet.add_driver("77 01 000002");
    let vehicle_id = fleet.vehicle.id;
    let holder = fleet.driver.id;

    let err = fleet
        .assignments()
        .assign(other.id, Some(vehicle_id))
        .unwrap_err();
    match err {
        Error::ConflictingAssignment {
            vehicle_id: v,
            driver_id,
        } => {
            assert_eq!(v, vehicle_id);
            assert_eq!(driver_id, holder);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing moved.
    assert_eq!(fleet.store.driver(holder).unwrap().vehicle_id, Some(vehicle_id));
    assert_eq!(fleet.store.driver(other.id).unwrap().vehicle_id, None);
}

#[test]
fn reassigning_own_vehicle_is_a_no_op() {
    let mut fleet = Fleet::seeded();
    let (driver_id, vehicle_id) = (fleet.driver.id, fleet.vehicle.id);

    let driver = fleet
        .assignments()
        .assign(driver_id, Some(vehicle_id))
        .expect("reassignment succeeds");
    assert_eq!(driver.vehicle_id, Some(vehicle_id));
}

#[test]
fn assigning_a_new_vehicle_releases_the_old_one() {
    let mut fleet = Fleet::seeded();
    let spare = fleet.add_vehicle("B200BB77", 5.0);
    let (driver_id, old_vehicle) = (fleet.driver.id, fleet.vehicle.id);

    fleet
        .assignments()
        .assign(driver_id, Some(spare.id))
        .expect("assign spare vehicle");

    let manager = fleet.assignments();
    assert!(manager.vehicle_driver(old_vehicle).unwrap().is_none());
    assert_eq!(
        manager.vehicle_driver(spare.id).unwrap().map(|d| d.id),
        Some(driver_id)
    );
    let available: Vec<_> = manager
        .available_vehicles()
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(available, vec![old_vehicle]);
}

#[test]
fn unassign_frees_both_sides() {
    let mut fleet = Fleet::seeded();
    let (driver_id, vehicle_id) = (fleet.driver.id, fleet.vehicle.id);

    let driver = fleet.assignments().unassign(driver_id).unwrap();
    assert_eq!(driver.vehicle_id, None);

    let manager = fleet.assignments();
    assert!(manager.vehicle_driver(vehicle_id).unwrap().is_none());
    assert_eq!(manager.available_drivers().unwrap().len(), 1);
}

#[test]
fn swap_twice_restores_original_assignment() {
    let mut fleet = Fleet::seeded();
    let truck = fleet.add_vehicle("C300CC77", 20.0);
    let second = fleet.add_driver("77 01 000003");
    fleet
        .assignments()
        .assign(second.id, Some(truck.id))
        .unwrap();
    let first = fleet.driver.id;
    let van = fleet.vehicle.id;

    let (a, b) = fleet.assignments().swap(first, second.id).unwrap();
    assert_eq!(a.vehicle_id, Some(truck.id));
    assert_eq!(b.vehicle_id, Some(van));
    assert_eq!(fleet.store.driver(first).unwrap().vehicle_id, Some(truck.id));
    assert_eq!(fleet.store.driver(second.id).unwrap().vehicle_id, Some(van));

    fleet.assignments().swap(first, second.id).unwrap();
    assert_eq!(fleet.store.driver(first).unwrap().vehicle_id, Some(van));
    assert_eq!(fleet.store.driver(second.id).unwrap().vehicle_id, Some(truck.id));
}

#[test]
fn swap_with_an_unassigned_driver_moves_the_vehicle() {
    let mut fleet = Fleet::seeded();
    let idle = fleet.add_driver("77 01 000004");
    let (first, van) = (fleet.driver.id, fleet.vehicle.id);

    let (a, b) = fleet.assignments().swap(first, idle.id).unwrap();
    assert_eq!(a.vehicle_id, None);
    assert_eq!(b.vehicle_id, Some(van));
    assert_eq!(fleet.store.driver(idle.id).unwrap().vehicle_id, Some(van));
}

#[test]
fn swap_with_unknown_driver_changes_nothing() {
    let mut fleet = Fleet::seeded();
    let (first, van) = (fleet.driver.id, fleet.vehicle.id);

    let err = fleet.assignments().swap(first, 999).unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            entity: EntityKind::Driver,
            id: 999
        }
    ));
    assert_eq!(fleet.store.driver(first).unwrap().vehicle_id, Some(van));
}

#[test]
fn assigning_unknown_vehicle_is_not_found() {
    let mut fleet = Fleet::seeded();
    let driver_id = fleet.driver.id;
    let err = fleet.assignments().assign(driver_id, Some(404)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn dispatchable_vehicles_need_driver_and_capacity() {
    let mut fleet = Fleet::seeded();
    // Unassigned truck with plenty of capacity is not dispatchable.
    fleet.add_vehicle("D400DD77", 40.0);

    let manager = fleet.assignments();
    let fits = manager.dispatchable_vehicles(8_000.0).unwrap();
    assert_eq!(fits.len(), 1);
    assert_eq!(fits[0].vehicle.license_plate, "A100AA77");

    assert!(manager.dispatchable_vehicles(10_000.5).unwrap().is_empty());
}
