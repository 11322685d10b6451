//! `route` subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use fleetdesk_lib::{
    EntityKind, Registry, Route, RouteFields, RouteFilter, RouteId, ShipmentLifecycle, Store,
};

use crate::commands::emit_deleted;
use crate::output::{route_table, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum RouteCommand {
    /// Register a route.
    Add(RouteArgs),
    /// Change a route. A new distance reprices its active shipments.
    Update {
        id: RouteId,
        #[command(flatten)]
        changes: RouteChanges,
    },
    /// List routes, newest first.
    List {
        #[arg(long)]
        min_distance: Option<f64>,
        #[arg(long)]
        max_distance: Option<f64>,
        /// Case-insensitive substring of the origin.
        #[arg(long)]
        origin: Option<String>,
        /// Case-insensitive substring of the destination.
        #[arg(long)]
        destination: Option<String>,
        /// Case-insensitive substring of the road type.
        #[arg(long)]
        road_type: Option<String>,
    },
    Show { id: RouteId },
    /// Delete a route no active shipment uses.
    Delete { id: RouteId },
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[arg(long)]
    pub origin: String,
    #[arg(long)]
    pub destination: String,
    /// Distance in kilometres.
    #[arg(long)]
    pub distance: f64,
    /// Average duration in hours.
    #[arg(long)]
    pub duration: f64,
    #[arg(long, default_value = "highway")]
    pub road_type: String,
}

impl From<RouteArgs> for RouteFields {
    fn from(args: RouteArgs) -> Self {
        Self {
            origin: args.origin,
            destination: args.destination,
            distance_km: args.distance,
            avg_duration_hours: args.duration,
            road_type: args.road_type,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RouteChanges {
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    #[arg(long)]
    pub distance: Option<f64>,
    #[arg(long)]
    pub duration: Option<f64>,
    #[arg(long)]
    pub road_type: Option<String>,
}

impl RouteChanges {
    fn apply(self, current: &Route) -> RouteFields {
        RouteFields {
            origin: self.origin.unwrap_or_else(|| current.origin.clone()),
            destination: self
                .destination
                .unwrap_or_else(|| current.destination.clone()),
            distance_km: self.distance.unwrap_or(current.distance_km),
            avg_duration_hours: self.duration.unwrap_or(current.avg_duration_hours),
            road_type: self.road_type.unwrap_or_else(|| current.road_type.clone()),
        }
    }
}

pub fn handle_route(store: &mut Store, command: RouteCommand, format: OutputFormat) -> Result<()> {
    match command {
        RouteCommand::Add(args) => {
            let route = Registry::new(store)
                .add_route(&args.into())
                .context("failed to register route")?;
            format.emit(&route, |r| {
                format!("Registered route #{} ({}, {} km)", r.id, r.label(), r.distance_km)
            })
        }
        RouteCommand::Update { id, changes } => {
            let current = store.route(id)?;
            let fields = changes.apply(&current);
            let revision = ShipmentLifecycle::new(store)
                .update_route(id, &fields)
                .with_context(|| format!("failed to update route {id}"))?;
            format.emit(&revision, |r| {
                format!(
                    "Updated route #{} ({}); repriced {} active shipment(s)",
                    r.route.id,
                    r.route.label(),
                    r.recalculated
                )
            })
        }
        RouteCommand::List {
            min_distance,
            max_distance,
            origin,
            destination,
            road_type,
        } => {
            let routes = store.routes(&RouteFilter {
                min_distance_km: min_distance,
                max_distance_km: max_distance,
                origin,
                destination,
                road_type,
            })?;
            format.emit(&routes, |r| route_table(r))
        }
        RouteCommand::Show { id } => {
            let route = store.route(id)?;
            format.emit(&route, |r| route_table(std::slice::from_ref(r)))
        }
        RouteCommand::Delete { id } => {
            ShipmentLifecycle::new(store)
                .delete_route(id)
                .with_context(|| format!("failed to delete route {id}"))?;
            emit_deleted(format, EntityKind::Route, id)
        }
    }
}
