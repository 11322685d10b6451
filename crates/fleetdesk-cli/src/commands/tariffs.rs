//! `tariff` subcommands.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use serde::Serialize;

use fleetdesk_lib::{
    EntityKind, Registry, ShipmentLifecycle, Store, Tariff, TariffFields, TariffFilter, TariffId,
    TariffResolver,
};

use crate::commands::{emit_deleted, now, parse_timestamp};
use crate::output::{tariff_table, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum TariffCommand {
    /// Register a tariff.
    Add(TariffArgs),
    /// Change a tariff. Price changes reprice pending and in-transit shipments.
    Update {
        id: TariffId,
        #[command(flatten)]
        changes: TariffChanges,
    },
    /// List tariffs, newest validity start first.
    List {
        /// Only tariffs valid at this instant.
        #[arg(long, value_parser = parse_timestamp)]
        active_at: Option<NaiveDateTime>,
        #[arg(long)]
        cargo_type: Option<String>,
    },
    /// Tariffs valid at an instant (default: now).
    Active {
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },
    /// Distinct cargo types.
    CargoTypes,
    Show { id: TariffId },
    /// Recompute the cost of the tariff's active shipments.
    Recalculate { id: TariffId },
    /// Delete a tariff no shipment was ever billed under.
    Delete { id: TariffId },
}

#[derive(Args, Debug)]
pub struct TariffArgs {
    #[arg(long)]
    pub cargo_type: String,
    #[arg(long)]
    pub price_per_km: f64,
    #[arg(long, default_value_t = 0.0)]
    pub min_price: f64,
    /// Start of validity (inclusive).
    #[arg(long, value_parser = parse_timestamp)]
    pub from: NaiveDateTime,
    /// End of validity (exclusive); open-ended when omitted.
    #[arg(long, value_parser = parse_timestamp)]
    pub until: Option<NaiveDateTime>,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<TariffArgs> for TariffFields {
    fn from(args: TariffArgs) -> Self {
        Self {
            cargo_type: args.cargo_type,
            price_per_km: args.price_per_km,
            min_price: args.min_price,
            valid_from: args.from,
            valid_until: args.until,
            description: args.description,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct TariffChanges {
    #[arg(long)]
    pub cargo_type: Option<String>,
    #[arg(long)]
    pub price_per_km: Option<f64>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long, value_parser = parse_timestamp)]
    pub from: Option<NaiveDateTime>,
    #[arg(long, value_parser = parse_timestamp, conflicts_with = "open_ended")]
    pub until: Option<NaiveDateTime>,
    /// Remove the end of validity.
    #[arg(long)]
    pub open_ended: bool,
    #[arg(long)]
    pub description: Option<String>,
}

impl TariffChanges {
    fn apply(self, current: &Tariff) -> TariffFields {
        let mut fields = TariffFields::from(current);
        if let Some(cargo_type) = self.cargo_type {
            fields.cargo_type = cargo_type;
        }
        if let Some(price) = self.price_per_km {
            fields.price_per_km = price;
        }
        if let Some(min_price) = self.min_price {
            fields.min_price = min_price;
        }
        if let Some(from) = self.from {
            fields.valid_from = from;
        }
        if self.open_ended {
            fields.valid_until = None;
        } else if let Some(until) = self.until {
            fields.valid_until = Some(until);
        }
        if let Some(description) = self.description {
            fields.description = Some(description);
        }
        fields
    }
}

#[derive(Debug, Serialize)]
struct Recalculated {
    tariff_id: TariffId,
    recalculated: usize,
}

pub fn handle_tariff(store: &mut Store, command: TariffCommand, format: OutputFormat) -> Result<()> {
    match command {
        TariffCommand::Add(args) => {
            let tariff = Registry::new(store)
                .add_tariff(&args.into())
                .context("failed to register tariff")?;
            format.emit(&tariff, |t| {
                format!(
                    "Registered tariff #{} ({}, valid {})",
                    t.id,
                    t.cargo_type,
                    t.validity_label()
                )
            })
        }
        TariffCommand::Update { id, changes } => {
            let current = store.tariff(id)?;
            let fields = changes.apply(&current);
            let revision = ShipmentLifecycle::new(store)
                .update_tariff(id, &fields)
                .with_context(|| format!("failed to update tariff {id}"))?;
            format.emit(&revision, |r| {
                format!(
                    "Updated tariff #{}; repriced {} active shipment(s)",
                    r.tariff.id, r.recalculated
                )
            })
        }
        TariffCommand::List {
            active_at,
            cargo_type,
        } => {
            let tariffs = store.tariffs(&TariffFilter {
                active_at,
                cargo_type,
            })?;
            format.emit(&tariffs, |t| tariff_table(t))
        }
        TariffCommand::Active { at } => {
            let at = at.unwrap_or_else(now);
            let tariffs = TariffResolver::new(store).active_tariffs(at)?;
            format.emit(&tariffs, |t| tariff_table(t))
        }
        TariffCommand::CargoTypes => {
            let types = TariffResolver::new(store).cargo_types()?;
            format.emit(&types, |t| {
                if t.is_empty() {
                    "No cargo types.".to_string()
                } else {
                    t.join("\n")
                }
            })
        }
        TariffCommand::Show { id } => {
            let tariff = store.tariff(id)?;
            format.emit(&tariff, |t| {
                let mut text = tariff_table(std::slice::from_ref(t));
                if let Some(description) = &t.description {
                    text.push_str(&format!("Description: {description}\n"));
                }
                text
            })
        }
        TariffCommand::Recalculate { id } => {
            let recalculated = ShipmentLifecycle::new(store)
                .recalculate_tariff(id)
                .with_context(|| format!("failed to recalculate tariff {id}"))?;
            format.emit(
                &Recalculated {
                    tariff_id: id,
                    recalculated,
                },
                |r| {
                    format!(
                        "Repriced {} active shipment(s) under tariff #{}",
                        r.recalculated, r.tariff_id
                    )
                },
            )
        }
        TariffCommand::Delete { id } => {
            ShipmentLifecycle::new(store)
                .delete_tariff(id)
                .with_context(|| format!("failed to delete tariff {id}"))?;
            emit_deleted(format, EntityKind::Tariff, id)
        }
    }
}
