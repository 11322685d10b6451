//! Shipments and their status machine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::driver::DriverId;
use super::route::RouteId;
use super::tariff::TariffId;
use super::vehicle::VehicleId;

/// Numeric identifier for a shipment.
pub type ShipmentId = i64;

/// Shipment status.
///
/// Legal moves are forward only: `pending -> in_transit -> delivered`, and
/// `pending | in_transit -> cancelled`. `delivered` and `cancelled` are
/// terminal; shipments in those states are frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// Statuses whose cost still follows tariff and route edits.
    pub const ACTIVE: [ShipmentStatus; 2] = [ShipmentStatus::Pending, ShipmentStatus::InTransit];

    pub const ALL: [ShipmentStatus; 4] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
        ShipmentStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
    }

    /// Whether `self -> next` is a legal transition. Self-transitions are not.
    pub fn can_transition_to(self, next: ShipmentStatus) -> bool {
        use ShipmentStatus::*;
        matches!(
            (self, next),
            (Pending, InTransit) | (InTransit, Delivered) | (Pending | InTransit, Cancelled)
        )
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ShipmentStatus::Pending),
            "in_transit" | "in-transit" => Ok(ShipmentStatus::InTransit),
            "delivered" => Ok(ShipmentStatus::Delivered),
            "cancelled" | "canceled" => Ok(ShipmentStatus::Cancelled),
            other => Err(Error::validation(
                "status",
                format!(
                    "unknown status '{other}'; expected pending, in_transit, delivered or cancelled"
                ),
            )),
        }
    }
}

/// A persisted shipment with its cached cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub scheduled_at: NaiveDateTime,
    pub weight_kg: f64,
    pub status: ShipmentStatus,
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub route_id: RouteId,
    pub tariff_id: TariffId,
    /// Unrounded `max(distance * price_per_km, min_price)` at the last
    /// recomputation.
    pub total_cost: f64,
}

/// Request to create a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShipment {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub route_id: RouteId,
    pub tariff_id: TariffId,
    pub scheduled_at: NaiveDateTime,
    pub weight_kg: f64,
    /// Initial status; `pending` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
}

/// Partial edit of a non-terminal shipment. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentEdit {
    pub vehicle_id: Option<VehicleId>,
    pub driver_id: Option<DriverId>,
    pub route_id: Option<RouteId>,
    pub tariff_id: Option<TariffId>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub weight_kg: Option<f64>,
}

impl ShipmentEdit {
    pub fn is_empty(&self) -> bool {
        self == &ShipmentEdit::default()
    }

    /// Overlay this edit on `shipment`, producing the request to re-validate.
    pub(crate) fn apply_to(&self, shipment: &Shipment) -> NewShipment {
        NewShipment {
            vehicle_id: self.vehicle_id.unwrap_or(shipment.vehicle_id),
            driver_id: self.driver_id.unwrap_or(shipment.driver_id),
            route_id: self.route_id.unwrap_or(shipment.route_id),
            tariff_id: self.tariff_id.unwrap_or(shipment.tariff_id),
            scheduled_at: self.scheduled_at.unwrap_or(shipment.scheduled_at),
            weight_kg: self.weight_kg.unwrap_or(shipment.weight_kg),
            status: Some(shipment.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShipmentStatus::*;

    #[test]
    fn forward_transitions_are_legal() {
        assert!(Pending.can_transition_to(InTransit));
        assert!(InTransit.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InTransit.can_transition_to(Cancelled));
    }

    #[test]
    fn reverse_skipping_and_self_transitions_are_illegal() {
        for from in ShipmentStatus::ALL {
            assert!(!from.can_transition_to(from), "{from} -> {from}");
        }
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!InTransit.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(InTransit));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_statuses() {
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(ShipmentStatus::ACTIVE.iter().all(|s| !s.is_terminal()));
    }

    #[test]
    fn parses_and_displays_snake_case() {
        assert_eq!("in_transit".parse::<ShipmentStatus>().unwrap(), InTransit);
        assert_eq!("In-Transit".parse::<ShipmentStatus>().unwrap(), InTransit);
        assert_eq!("canceled".parse::<ShipmentStatus>().unwrap(), Cancelled);
        assert_eq!(InTransit.to_string(), "in_transit");
        assert!("lost".parse::<ShipmentStatus>().is_err());
        assert_eq!(serde_json::to_string(&InTransit).unwrap(), "\"in_transit\"");
    }

    #[test]
    fn empty_edit_is_detected() {
        assert!(ShipmentEdit::default().is_empty());
        let edit = ShipmentEdit {
            weight_kg: Some(10.0),
            ..ShipmentEdit::default()
        };
        assert!(!edit.is_empty());
    }
}
