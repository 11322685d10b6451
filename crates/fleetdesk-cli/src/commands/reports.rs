//! `report` subcommands.

use anyhow::Result;
use clap::Subcommand;

use fleetdesk_lib::{route_statistics, shipment_summary, Store};

use crate::commands::shipments::ListArgs;
use crate::output::{route_statistics_text, shipment_summary_text, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Distance and duration statistics over all routes.
    Routes,
    /// Shipment counts per status and billed cost.
    Shipments(ListArgs),
}

pub fn handle_report(store: &Store, command: ReportCommand, format: OutputFormat) -> Result<()> {
    match command {
        ReportCommand::Routes => {
            let stats = route_statistics(store)?;
            format.emit(&stats, route_statistics_text)
        }
        ReportCommand::Shipments(args) => {
            let summary = shipment_summary(store, &args.filter())?;
            format.emit(&summary, shipment_summary_text)
        }
    }
}
