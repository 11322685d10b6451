use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rusqlite::Connection;
use tracing::debug;

use crate::cost::shipment_cost;
use crate::error::Result;
use crate::model::{Route, RouteId, Shipment, Tariff, TariffId};
use crate::store::{routes, shipments, tariffs, ShipmentFilter};

/// Routes and tariffs already loaded during one recomputation pass.
#[derive(Default)]
struct PriceBook {
    routes: HashMap<RouteId, Route>,
    tariffs: HashMap<TariffId, Tariff>,
}

impl PriceBook {
    fn cost_of(&mut self, conn: &Connection, shipment: &Shipment) -> Result<f64> {
        let route = match self.routes.entry(shipment.route_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(routes::get(conn, shipment.route_id)?),
        };
        let tariff = match self.tariffs.entry(shipment.tariff_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(tariffs::get(conn, shipment.tariff_id)?),
        };
        Ok(shipment_cost(route, tariff))
    }
}

/// Recompute every pending or in-transit shipment billed under `tariff`.
pub(crate) fn reprice_tariff(conn: &Connection, tariff: &Tariff) -> Result<usize> {
    let mut book = PriceBook::default();
    book.tariffs.insert(tariff.id, tariff.clone());
    reprice(conn, &ShipmentFilter::active().with_tariff(tariff.id), book)
}

/// Recompute every pending or in-transit shipment travelling `route`.
pub(crate) fn reprice_route(conn: &Connection, route: &Route) -> Result<usize> {
    let mut book = PriceBook::default();
    book.routes.insert(route.id, route.clone());
    reprice(conn, &ShipmentFilter::active().with_route(route.id), book)
}

fn reprice(conn: &Connection, filter: &ShipmentFilter, mut book: PriceBook) -> Result<usize> {
    let active = shipments::list(conn, filter)?;
    for shipment in &active {
        let cost = book.cost_of(conn, shipment)?;
        if cost != shipment.total_cost {
            shipments::set_cost(conn, shipment.id, cost)?;
            debug!(
                shipment_id = shipment.id,
                previous = shipment.total_cost,
                total_cost = cost,
                "repriced shipment"
            );
        }
    }
    Ok(active.len())
}
