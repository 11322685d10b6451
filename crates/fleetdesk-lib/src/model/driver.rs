//! Drivers, license data, and hire-date derived experience.
//!
//! The hire date is the single source of truth for experience. Years of
//! experience are derived from it on demand and are never accepted as input,
//! so there is exactly one way for the 40-year cap to fail.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::require_text;
use super::vehicle::VehicleId;

/// Numeric identifier for a driver.
pub type DriverId = i64;

/// Upper bound (inclusive) on derived years of experience.
pub const MAX_EXPERIENCE_YEARS: u32 = 40;

/// A driver, optionally bound to one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub full_name: String,
    pub license_number: String,
    pub license_category: String,
    pub hire_date: NaiveDate,
    /// Assigned vehicle. Written only through [`crate::AssignmentManager`].
    pub vehicle_id: Option<VehicleId>,
}

impl Driver {
    /// Completed years since the hire date, as of `today`.
    ///
    /// Returns zero when the hire date lies after `today`.
    pub fn experience_years(&self, today: NaiveDate) -> u32 {
        today.years_since(self.hire_date).unwrap_or(0)
    }
}

/// Editable driver attributes.
///
/// The vehicle binding is intentionally absent; it is managed by the
/// assignment module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverFields {
    pub full_name: String,
    pub license_number: String,
    pub license_category: String,
    pub hire_date: NaiveDate,
}

impl DriverFields {
    /// Validate text fields and the hire date against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        require_text("full_name", &self.full_name)?;
        require_text("license_number", &self.license_number)?;
        require_text("license_category", &self.license_category)?;
        validate_hire_date(self.hire_date, today)
    }
}

impl From<&Driver> for DriverFields {
    fn from(driver: &Driver) -> Self {
        Self {
            full_name: driver.full_name.clone(),
            license_number: driver.license_number.clone(),
            license_category: driver.license_category.clone(),
            hire_date: driver.hire_date,
        }
    }
}

fn validate_hire_date(hire_date: NaiveDate, today: NaiveDate) -> Result<()> {
    let Some(years) = today.years_since(hire_date) else {
        return Err(Error::validation(
            "hire_date",
            format!("hire date {hire_date} lies in the future (today is {today})"),
        ));
    };

    if years > MAX_EXPERIENCE_YEARS {
        return Err(Error::validation(
            "hire_date",
            format!(
                "experience derived from hire date {hire_date} is {years} years; \
                 at most {MAX_EXPERIENCE_YEARS} are allowed"
            ),
        ));
    }

    Ok(())
}
