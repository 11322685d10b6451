//! Output formatting for command results.
//!
//! Every handler produces a serializable value. `--format json` prints it as
//! pretty JSON; `--format text` prints the matching human-readable table or
//! line from this module.

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use fleetdesk_lib::{
    format_cost, DispatchableVehicle, Driver, Route, RouteStatistics, Shipment, ShipmentSummary,
    Tariff, Vehicle,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Print `value` as JSON, or the text produced by `text`.
    pub fn emit<T: Serialize + ?Sized>(self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, value)?;
                writeln!(stdout)?;
            }
            OutputFormat::Text => {
                let rendered = text(value);
                write!(stdout, "{rendered}")?;
                if !rendered.ends_with('\n') {
                    writeln!(stdout)?;
                }
            }
        }
        Ok(())
    }
}

pub fn vehicle_table(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "No vehicles.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<12} {:<16} {:>10} {:>10}  {}\n",
        "ID", "Plate", "Brand", "Load (t)", "L/100km", "Body"
    );
    for v in vehicles {
        out.push_str(&format!(
            "{:>4}  {:<12} {:<16} {:>10.2} {:>10.1}  {}\n",
            v.id, v.license_plate, v.brand, v.load_capacity_t, v.fuel_consumption, v.body_type
        ));
    }
    out
}

pub fn dispatch_table(entries: &[DispatchableVehicle]) -> String {
    if entries.is_empty() {
        return "No dispatchable vehicles.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<12} {:>10}  {}\n",
        "ID", "Plate", "Load (t)", "Driver"
    );
    for entry in entries {
        out.push_str(&format!(
            "{:>4}  {:<12} {:>10.2}  {} (#{})\n",
            entry.vehicle.id,
            entry.vehicle.license_plate,
            entry.vehicle.load_capacity_t,
            entry.driver.full_name,
            entry.driver.id
        ));
    }
    out
}

pub fn driver_table(drivers: &[Driver], today: NaiveDate) -> String {
    if drivers.is_empty() {
        return "No drivers.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<24} {:<14} {:<4} {:>5}  {}\n",
        "ID", "Name", "License", "Cat", "Years", "Vehicle"
    );
    for d in drivers {
        let vehicle = d
            .vehicle_id
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>4}  {:<24} {:<14} {:<4} {:>5}  {}\n",
            d.id,
            d.full_name,
            d.license_number,
            d.license_category,
            d.experience_years(today),
            vehicle
        ));
    }
    out
}

pub fn route_table(routes: &[Route]) -> String {
    if routes.is_empty() {
        return "No routes.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<36} {:>10} {:>8}  {}\n",
        "ID", "Route", "Km", "Hours", "Road"
    );
    for r in routes {
        out.push_str(&format!(
            "{:>4}  {:<36} {:>10.1} {:>8.1}  {}\n",
            r.id,
            r.label(),
            r.distance_km,
            r.avg_duration_hours,
            r.road_type
        ));
    }
    out
}

pub fn tariff_table(tariffs: &[Tariff]) -> String {
    if tariffs.is_empty() {
        return "No tariffs.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<12} {:>10} {:>10}  {}\n",
        "ID", "Cargo", "Per km", "Minimum", "Validity"
    );
    for t in tariffs {
        out.push_str(&format!(
            "{:>4}  {:<12} {:>10} {:>10}  {}\n",
            t.id,
            t.cargo_type,
            format_cost(t.price_per_km),
            format_cost(t.min_price),
            t.validity_label()
        ));
    }
    out
}

pub fn shipment_table(shipments: &[Shipment]) -> String {
    if shipments.is_empty() {
        return "No shipments.\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<16} {:<10} {:>10} {:>12}  {}\n",
        "ID", "Scheduled", "Status", "Kg", "Cost", "Vehicle/Driver/Route/Tariff"
    );
    for s in shipments {
        out.push_str(&format!(
            "{:>4}  {:<16} {:<10} {:>10.1} {:>12}  #{}/#{}/#{}/#{}\n",
            s.id,
            s.scheduled_at.format("%Y-%m-%d %H:%M"),
            s.status,
            s.weight_kg,
            format_cost(s.total_cost),
            s.vehicle_id,
            s.driver_id,
            s.route_id,
            s.tariff_id
        ));
    }
    out
}

pub fn shipment_line(shipment: &Shipment) -> String {
    format!(
        "Shipment #{} ({}) scheduled {}: {} kg, cost {}",
        shipment.id,
        shipment.status,
        shipment.scheduled_at.format("%Y-%m-%d %H:%M"),
        shipment.weight_kg,
        format_cost(shipment.total_cost)
    )
}

pub fn route_statistics_text(stats: &RouteStatistics) -> String {
    let figure = |value: Option<f64>| {
        value
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "Routes: {}\nTotal distance: {:.1} km\nAverage distance: {} km\n\
         Shortest: {} km\nLongest: {} km\nAverage duration: {} h\n",
        stats.route_count,
        stats.total_distance_km,
        figure(stats.average_distance_km),
        figure(stats.min_distance_km),
        figure(stats.max_distance_km),
        figure(stats.average_duration_hours)
    )
}

pub fn shipment_summary_text(summary: &ShipmentSummary) -> String {
    format!(
        "Shipments: {} (pending {}, in transit {}, delivered {}, cancelled {})\n\
         Billed cost: {}\n",
        summary.total,
        summary.pending,
        summary.in_transit,
        summary.delivered,
        summary.cancelled,
        format_cost(summary.billed_cost)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdesk_lib::ShipmentStatus;

    fn shipment() -> Shipment {
        Shipment {
            id: 3,
            scheduled_at: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            weight_kg: 1500.0,
            status: ShipmentStatus::InTransit,
            vehicle_id: 1,
            driver_id: 2,
            route_id: 4,
            tariff_id: 5,
            total_cost: 5000.0,
        }
    }

    #[test]
    fn shipment_rows_show_cost_with_two_decimals() {
        let table = shipment_table(&[shipment()]);
        assert!(table.contains("in_transit"));
        assert!(table.contains("5000.00"));
        assert!(table.contains("#1/#2/#4/#5"));
        assert!(shipment_line(&shipment()).contains("cost 5000.00"));
    }

    #[test]
    fn empty_listings_say_so() {
        assert_eq!(vehicle_table(&[]), "No vehicles.\n");
        assert_eq!(shipment_table(&[]), "No shipments.\n");
    }

    #[test]
    fn statistics_without_routes_show_placeholders() {
        let text = route_statistics_text(&RouteStatistics {
            route_count: 0,
            total_distance_km: 0.0,
            average_distance_km: None,
            min_distance_km: None,
            max_distance_km: None,
            average_duration_hours: None,
        });
        assert!(text.contains("Routes: 0"));
        assert!(text.contains("Average distance: - km"));
    }
}
