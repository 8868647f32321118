//! Command-line interface for the intermodal comparison engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compare;
mod document;
mod error;
mod fs;
mod route;

pub use error::CliError;

use compare::CompareArgs;
use route::RouteArgs;

pub(crate) const ARG_COMPARE_REQUEST: &str = "request";
pub(crate) const ARG_COMPARE_METHOD: &str = "method";
pub(crate) const ENV_COMPARE_REQUEST: &str = "INTERMODAL_CMDS_COMPARE_REQUEST_PATH";
pub(crate) const ARG_ROUTE_REQUEST: &str = "request";
pub(crate) const ARG_ROUTE_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_ROUTE_TIMEOUT: &str = "timeout-secs";
pub(crate) const ENV_ROUTE_REQUEST: &str = "INTERMODAL_CMDS_ROUTE_REQUEST_PATH";

/// Run the intermodal CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Compare(args) => compare::run_compare(args, &mut stdout),
        Command::Route(args) => route::run_route(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "intermodal",
    about = "Compare single-mode and multi-modal freight options",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score candidate plans and recommend one.
    Compare(CompareArgs),
    /// Resolve a road itinerary through waypoints against OSRM.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
