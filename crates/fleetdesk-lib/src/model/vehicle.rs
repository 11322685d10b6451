//! Vehicles and their rated load capacity.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{require_non_negative, require_positive, require_text};

/// Numeric identifier for a vehicle.
pub type VehicleId = i64;

/// Kilograms per tonne of rated load capacity.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Capacities are kept to the milligram so that ratings such as 2.01 t
/// convert to exactly 2010 kg.
const KG_SCALE: f64 = 1e6;

fn tonnes_to_kg(tonnes: f64) -> f64 {
    (tonnes * KG_PER_TONNE * KG_SCALE).round() / KG_SCALE
}

/// A vehicle of the fleet.
///
/// The assigned driver is not stored here: the driver row holds the only
/// ownership edge (see [`crate::assignment`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub license_plate: String,
    /// Rated load capacity in tonnes.
    pub load_capacity_t: f64,
    /// Fuel consumption in litres per 100 km.
    pub fuel_consumption: f64,
    pub body_type: String,
}

impl Vehicle {
    /// Rated load capacity in kilograms.
    pub fn capacity_kg(&self) -> f64 {
        tonnes_to_kg(self.load_capacity_t)
    }

    /// Whether a cargo of `weight_kg` fits within the rated capacity.
    pub fn can_carry(&self, weight_kg: f64) -> bool {
        weight_kg <= self.capacity_kg()
    }
}

/// Editable vehicle attributes, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFields {
    pub brand: String,
    pub license_plate: String,
    pub load_capacity_t: f64,
    pub fuel_consumption: f64,
    pub body_type: String,
}

impl VehicleFields {
    pub fn validate(&self) -> Result<()> {
        require_text("brand", &self.brand)?;
        require_text("license_plate", &self.license_plate)?;
        require_text("body_type", &self.body_type)?;
        require_positive("load_capacity_t", self.load_capacity_t)?;
        require_non_negative("fuel_consumption", self.fuel_consumption)?;
        Ok(())
    }

    pub fn capacity_kg(&self) -> f64 {
        tonnes_to_kg(self.load_capacity_t)
    }
}

impl From<&Vehicle> for VehicleFields {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand.clone(),
            license_plate: vehicle.license_plate.clone(),
            load_capacity_t: vehicle.load_capacity_t,
            fuel_consumption: vehicle.fuel_consumption,
            body_type: vehicle.body_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn fields() -> VehicleFields {
        VehicleFields {
            brand: "Volvo FH".to_string(),
            license_plate: "A123BC".to_string(),
            load_capacity_t: 20.0,
            fuel_consumption: 31.5,
            body_type: "tent".to_string(),
        }
    }

    #[test]
    fn capacity_is_reported_in_kilograms() {
        let vehicle = Vehicle {
            id: 1,
            brand: "GAZelle".to_string(),
            license_plate: "X001XX".to_string(),
            load_capacity_t: 1.5,
            fuel_consumption: 12.0,
            body_type: "van".to_string(),
        };
        assert_eq!(vehicle.capacity_kg(), 1500.0);
        assert!(vehicle.can_carry(1500.0));
        assert!(!vehicle.can_carry(1500.1));
    }

    #[test]
    fn fractional_ratings_convert_exactly() {
        for (tonnes, kg) in [
            (2.01, 2_010.0),
            (2.03, 2_030.0),
            (4.02, 4_020.0),
            (8.03, 8_030.0),
            (32.3, 32_300.0),
            (64.1, 64_100.0),
        ] {
            let mut f = fields();
            f.load_capacity_t = tonnes;
            assert_eq!(f.capacity_kg(), kg, "{tonnes} t");
        }
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let mut f = fields();
        f.load_capacity_t = 0.0;
        let err = f.validate().expect_err("zero capacity must fail");
        assert!(matches!(
            err,
            Error::Validation {
                field: "load_capacity_t",
                ..
            }
        ));

        f.load_capacity_t = f64::NAN;
        assert!(f.validate().is_err());
    }

    #[test]
    fn rejects_blank_plate() {
        let mut f = fields();
        f.license_plate = "   ".to_string();
        assert!(matches!(
            f.validate(),
            Err(Error::Validation {
                field: "license_plate",
                ..
            })
        ));
        assert!(fields().validate().is_ok());
    }
}
