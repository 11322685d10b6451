use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use fleetdesk_cli::commands::drivers::{self, DriverCommand};
use fleetdesk_cli::commands::reports::{self, ReportCommand};
use fleetdesk_cli::commands::routes::{self, RouteCommand};
use fleetdesk_cli::commands::shipments::{self, ShipmentCommand};
use fleetdesk_cli::commands::tariffs::{self, TariffCommand};
use fleetdesk_cli::commands::vehicles::{self, VehicleCommand};
use fleetdesk_cli::commands::{assignments, handle_init, open_store};
use fleetdesk_cli::logging::{init_logging, LoggingConfig};
use fleetdesk_cli::output::OutputFormat;
use fleetdesk_lib::{resolve_database_path, DriverId, VehicleId};

#[derive(Parser, Debug)]
#[command(author, version, about = "FleetDesk fleet management: vehicles, drivers, tariffs and shipments")]
struct Cli {
    /// Fleet database file (default: $FLEETDESK_DB, then the platform data directory).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the fleet database if needed and print its location.
    Init,
    /// Manage vehicles.
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Manage drivers.
    #[command(subcommand)]
    Driver(DriverCommand),
    /// Manage routes.
    #[command(subcommand)]
    Route(RouteCommand),
    /// Manage tariffs.
    #[command(subcommand)]
    Tariff(TariffCommand),
    /// Manage shipments.
    #[command(subcommand)]
    Shipment(ShipmentCommand),
    /// Give a driver a vehicle nobody else drives.
    Assign { driver: DriverId, vehicle: VehicleId },
    /// Take a driver's vehicle away.
    Unassign { driver: DriverId },
    /// Exchange the vehicles of two drivers.
    Swap { first: DriverId, second: DriverId },
    /// Aggregate reports.
    #[command(subcommand)]
    Report(ReportCommand),
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let path = resolve_database_path(cli.db.as_deref())
        .context("failed to determine the fleet database location")?;
    debug!(path = %path.display(), "using fleet database");
    let mut store = open_store(&path)?;
    let format = cli.format;

    match cli.command {
        Command::Init => handle_init(&store, format),
        Command::Vehicle(command) => vehicles::handle_vehicle(&mut store, command, format),
        Command::Driver(command) => drivers::handle_driver(&mut store, command, format),
        Command::Route(command) => routes::handle_route(&mut store, command, format),
        Command::Tariff(command) => tariffs::handle_tariff(&mut store, command, format),
        Command::Shipment(command) => shipments::handle_shipment(&mut store, command, format),
        Command::Assign { driver, vehicle } => {
            assignments::handle_assign(&mut store, driver, vehicle, format)
        }
        Command::Unassign { driver } => assignments::handle_unassign(&mut store, driver, format),
        Command::Swap { first, second } => {
            assignments::handle_swap(&mut store, first, second, format)
        }
        Command::Report(command) => reports::handle_report(&store, command, format),
    }
}
