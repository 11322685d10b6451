//! Tariff resolution over validity windows.
//!
//! Validity is the half-open interval `[valid_from, valid_until)`: a tariff
//! starts applying at its start instant and stops applying at its end
//! instant. A tariff valid `2024-01-01 .. 2024-06-01` is therefore NOT active
//! at `2024-06-01T00:00:00`. The same convention is used by the active-tariff
//! query and by the shipment creation guard, so a tariff offered as active is
//! always accepted for a shipment at the same instant.

use chrono::NaiveDateTime;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Tariff, TariffId};
use crate::store::{tariffs, Store, TariffFilter};

/// Read-only tariff lookups over a borrowed [`Store`].
pub struct TariffResolver<'s> {
    store: &'s Store,
}

impl<'s> TariffResolver<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Every tariff active at `at`, newest start first.
    pub fn active_tariffs(&self, at: NaiveDateTime) -> Result<Vec<Tariff>> {
        let active = tariffs::list(
            self.store.connection(),
            &TariffFilter {
                active_at: Some(at),
                ..TariffFilter::default()
            },
        )?;
        debug!(%at, count = active.len(), "resolved active tariffs");
        Ok(active)
    }

    /// Whether `tariff_id` applies at `at`. Unknown ids are an error.
    pub fn is_valid_for(&self, tariff_id: TariffId, at: NaiveDateTime) -> Result<bool> {
        Ok(tariffs::get(self.store.connection(), tariff_id)?.is_active_at(at))
    }

    /// Return the tariff when it applies at `at`, else [`Error::TariffNotActive`].
    pub fn ensure_valid_for(&self, tariff_id: TariffId, at: NaiveDateTime) -> Result<Tariff> {
        ensure_active(self.store.connection(), tariff_id, at)
    }

    /// Tariffs for one cargo-type tag, newest start first.
    pub fn tariffs_for_cargo_type(&self, cargo_type: &str) -> Result<Vec<Tariff>> {
        tariffs::list(
            self.store.connection(),
            &TariffFilter {
                cargo_type: Some(cargo_type.to_string()),
                ..TariffFilter::default()
            },
        )
    }

    /// Distinct cargo-type tags.
    pub fn cargo_types(&self) -> Result<Vec<String>> {
        tariffs::cargo_types(self.store.connection())
    }
}

pub(crate) fn ensure_active(
    conn: &Connection,
    tariff_id: TariffId,
    at: NaiveDateTime,
) -> Result<Tariff> {
    let tariff = tariffs::get(conn, tariff_id)?;
    if !tariff.is_active_at(at) {
        return Err(Error::TariffNotActive {
            tariff_id,
            at,
            valid_from: tariff.valid_from,
            valid_until: tariff.valid_until,
        });
    }
    Ok(tariff)
}
