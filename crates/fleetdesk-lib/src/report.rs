//! Aggregate views over routes and shipments.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::ShipmentStatus;
use crate::store::{RouteFilter, ShipmentFilter, Store};

/// Distance and duration figures across all routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStatistics {
    pub route_count: usize,
    pub total_distance_km: f64,
    pub average_distance_km: Option<f64>,
    pub min_distance_km: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub average_duration_hours: Option<f64>,
}

/// Shipment counts per status and the billed total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipmentSummary {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
    /// Sum of `total_cost` over shipments that were not cancelled.
    pub billed_cost: f64,
}

pub fn route_statistics(store: &Store) -> Result<RouteStatistics> {
    let routes = store.routes(&RouteFilter::default())?;
    let route_count = routes.len();
    let total_distance_km: f64 = routes.iter().map(|route| route.distance_km).sum();
    let total_duration: f64 = routes.iter().map(|route| route.avg_duration_hours).sum();

    let (average_distance_km, average_duration_hours) = if route_count == 0 {
        (None, None)
    } else {
        let n = route_count as f64;
        (Some(total_distance_km / n), Some(total_duration / n))
    };

    let distances = routes.iter().map(|route| route.distance_km);
    Ok(RouteStatistics {
        route_count,
        total_distance_km,
        average_distance_km,
        min_distance_km: distances.clone().reduce(f64::min),
        max_distance_km: distances.reduce(f64::max),
        average_duration_hours,
    })
}

/// Summarise the shipments matching `filter`.
pub fn shipment_summary(store: &Store, filter: &ShipmentFilter) -> Result<ShipmentSummary> {
    let mut summary = ShipmentSummary::default();
    for shipment in store.shipments(filter)? {
        summary.total += 1;
        match shipment.status {
            ShipmentStatus::Pending => summary.pending += 1,
            ShipmentStatus::InTransit => summary.in_transit += 1,
            ShipmentStatus::Delivered => summary.delivered += 1,
            ShipmentStatus::Cancelled => summary.cancelled += 1,
        }
        if shipment.status != ShipmentStatus::Cancelled {
            summary.billed_cost += shipment.total_cost;
        }
    }
    debug!(total = summary.total, billed_cost = summary.billed_cost, "summarised shipments");
    Ok(summary)
}
