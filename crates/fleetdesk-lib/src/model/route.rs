use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{require_positive, require_text};

/// Numeric identifier for a route.
pub type RouteId = i64;

/// A transport route between two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub avg_duration_hours: f64,
    pub road_type: String,
}

impl Route {
    /// Short human label, e.g. `Moscow -> Kazan (820 km)`.
    pub fn label(&self) -> String {
        format!(
            "{} -> {} ({} km)",
            self.origin, self.destination, self.distance_km
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFields {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub avg_duration_hours: f64,
    pub road_type: String,
}

impl RouteFields {
    pub fn validate(&self) -> Result<()> {
        require_text("origin", &self.origin)?;
        require_text("destination", &self.destination)?;
        require_text("road_type", &self.road_type)?;
        require_positive("distance_km", self.distance_km)?;
        require_positive("avg_duration_hours", self.avg_duration_hours)?;
        Ok(())
    }
}

impl From<&Route> for RouteFields {
    fn from(route: &Route) -> Self {
        Self {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            distance_km: route.distance_km,
            avg_duration_hours: route.avg_duration_hours,
            road_type: route.road_type.clone(),
        }
    }
}
