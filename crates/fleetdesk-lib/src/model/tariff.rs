//! Tariffs: priced rules valid over a half-open time window.
//!
//! A tariff is active at instant `t` when `valid_from <= t` and either it has
//! no end or `t < valid_until`. The end bound is exclusive everywhere: in the
//! active-tariff query, in the shipment creation guard, and here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{require_non_negative, require_positive, require_text};

/// Numeric identifier for a tariff.
pub type TariffId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub id: TariffId,
    pub cargo_type: String,
    pub price_per_km: f64,
    pub min_price: f64,
    /// Inclusive start of validity.
    pub valid_from: NaiveDateTime,
    /// Exclusive end of validity; `None` means open-ended.
    pub valid_until: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl Tariff {
    /// Whether the tariff applies at `at` under half-open `[from, until)`.
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        window_contains(self.valid_from, self.valid_until, at)
    }

    /// Human-readable validity window, e.g. `2024-01-01 - 2024-06-01`.
    pub fn validity_label(&self) -> String {
        let from = self.valid_from.format("%Y-%m-%d");
        match self.valid_until {
            Some(until) => format!("{from} - {}", until.format("%Y-%m-%d")),
            None => format!("from {from} (open-ended)"),
        }
    }
}

pub(crate) fn window_contains(
    valid_from: NaiveDateTime,
    valid_until: Option<NaiveDateTime>,
    at: NaiveDateTime,
) -> bool {
    valid_from <= at && !matches!(valid_until, Some(until) if at >= until)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffFields {
    pub cargo_type: String,
    pub price_per_km: f64,
    pub min_price: f64,
    pub valid_from: NaiveDateTime,
    pub valid_until: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl TariffFields {
    pub fn validate(&self) -> Result<()> {
        require_text("cargo_type", &self.cargo_type)?;
        require_positive("price_per_km", self.price_per_km)?;
        require_non_negative("min_price", self.min_price)?;
        if let Some(until) = self.valid_until {
            if until <= self.valid_from {
                return Err(Error::validation(
                    "valid_until",
                    format!(
                        "end of validity ({until}) must be later than its start ({})",
                        self.valid_from
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Whether applying these fields over `current` changes what shipments cost.
    pub fn changes_pricing_of(&self, current: &Tariff) -> bool {
        self.price_per_km != current.price_per_km || self.min_price != current.min_price
    }
}

impl From<&Tariff> for TariffFields {
    fn from(tariff: &Tariff) -> Self {
        Self {
            cargo_type: tariff.cargo_type.clone(),
            price_per_km: tariff.price_per_km,
            min_price: tariff.min_price,
            valid_from: tariff.valid_from,
            valid_until: tariff.valid_until,
            description: tariff.description.clone(),
        }
    }
}
