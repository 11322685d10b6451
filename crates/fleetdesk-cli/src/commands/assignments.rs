//! `assign`, `unassign` and `swap` commands.

use anyhow::{Context, Result};

use fleetdesk_lib::{AssignmentManager, Driver, DriverId, Store, VehicleId};

use crate::output::OutputFormat;

fn describe(driver: &Driver) -> String {
    match driver.vehicle_id {
        Some(vehicle_id) => format!("driver #{} now drives vehicle #{vehicle_id}", driver.id),
        None => format!("driver #{} has no vehicle", driver.id),
    }
}

pub fn handle_assign(
    store: &mut Store,
    driver_id: DriverId,
    vehicle_id: VehicleId,
    format: OutputFormat,
) -> Result<()> {
    let driver = AssignmentManager::new(store)
        .assign(driver_id, Some(vehicle_id))
        .with_context(|| format!("failed to assign vehicle {vehicle_id} to driver {driver_id}"))?;
    format.emit(&driver, describe)
}

pub fn handle_unassign(store: &mut Store, driver_id: DriverId, format: OutputFormat) -> Result<()> {
    let driver = AssignmentManager::new(store)
        .unassign(driver_id)
        .with_context(|| format!("failed to unassign driver {driver_id}"))?;
    format.emit(&driver, describe)
}

pub fn handle_swap(
    store: &mut Store,
    first: DriverId,
    second: DriverId,
    format: OutputFormat,
) -> Result<()> {
    let pair = AssignmentManager::new(store)
        .swap(first, second)
        .with_context(|| format!("failed to swap vehicles of drivers {first} and {second}"))?;
    format.emit(&pair, |(a, b)| format!("Swapped: {}; {}", describe(a), describe(b)))
}
