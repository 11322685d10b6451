//! Shipment cost calculation.
//!
//! Cost is `max(distance_km * price_per_km, min_price)`. Stored costs are never
//! rounded; [`format_cost`] applies currency precision at presentation time.

use crate::model::{Route, Tariff};

/// Cost of carrying a shipment along `route` under `tariff`.
///
/// # Examples
/// ```
/// use fleetdesk_lib::quote;
///
/// // 500 km at 10 per km clears the 3000 floor.
/// assert_eq!(quote(500.0, 10.0, 3000.0), 5000.0);
/// // 100 km at 10 per km does not; the floor applies.
/// assert_eq!(quote(100.0, 10.0, 3000.0), 3000.0);
/// ```
pub fn shipment_cost(route: &Route, tariff: &Tariff) -> f64 {
    quote(route.distance_km, tariff.price_per_km, tariff.min_price)
}

/// Floor-priced cost from raw figures.
pub fn quote(distance_km: f64, price_per_km: f64, min_price: f64) -> f64 {
    (distance_km * price_per_km).max(min_price)
}

/// Render an amount with two decimal places.
pub fn format_cost(amount: f64) -> String {
    format!("{amount:.2}")
}
