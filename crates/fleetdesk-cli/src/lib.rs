//! FleetDesk CLI library.
//!
//! Subcommand definitions and handlers, output rendering and logging setup
//! for the `fleetdesk` binary. All fleet rules live in `fleetdesk-lib`; this
//! crate only parses arguments and presents results.

pub mod commands;
pub mod logging;
pub mod output;
