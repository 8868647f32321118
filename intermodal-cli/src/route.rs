//! Route command implementation for the intermodal CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use intermodal_core::{DistanceService, Location, VehicleClass};
use intermodal_routing::{
    HttpDistanceService, HttpDistanceServiceConfig, ResolverConfig, RouteResolver, WaypointRoute,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::document::{load_request, require_existing, write_output};
use crate::{
    ARG_ROUTE_OSRM_BASE_URL, ARG_ROUTE_REQUEST, ARG_ROUTE_TIMEOUT, CliError, ENV_ROUTE_REQUEST,
};

/// Base URL used when none is configured.
pub(crate) const DEFAULT_OSRM_BASE_URL: &str = "http://localhost:5000";

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve road distance and duration through an ordered list \
                 of stops by querying an OSRM instance. The request is a \
                 JSON document holding the origin, the destination, and \
                 any intermediate waypoints.",
    about = "Resolve a road itinerary through waypoints"
)]
#[ortho_config(prefix = "INTERMODAL")]
pub(crate) struct RouteArgs {
    /// Path to a JSON file containing a route request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_ROUTE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_ROUTE_TIMEOUT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Base URL for the OSRM route service.
    pub(crate) osrm_base_url: String,
    /// Timeout applied to each OSRM request.
    pub(crate) timeout: Option<Duration>,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_REQUEST,
            env: ENV_ROUTE_REQUEST,
        })?;
        let osrm_base_url = args
            .osrm_base_url
            .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned());
        Ok(Self {
            request_path,
            osrm_base_url,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// JSON document accepted by `route`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RouteRequest {
    pub(crate) origin: Location,
    pub(crate) destination: Location,
    /// Intermediate stops in travel order.
    #[serde(default)]
    pub(crate) waypoints: Vec<Location>,
    #[serde(default)]
    pub(crate) vehicle: VehicleClass,
}

/// Builds the distance service for the current route invocation.
pub(crate) trait DistanceServiceBuilder {
    type Service: DistanceService;

    fn build(&self, config: &RouteConfig) -> Result<Self::Service, CliError>;
}

pub(crate) struct OsrmServiceBuilder;

impl DistanceServiceBuilder for OsrmServiceBuilder {
    type Service = HttpDistanceService;

    fn build(&self, config: &RouteConfig) -> Result<Self::Service, CliError> {
        let mut service_config = HttpDistanceServiceConfig::new(config.osrm_base_url.clone());
        if let Some(timeout) = config.timeout {
            service_config = service_config.with_timeout(timeout);
        }
        HttpDistanceService::with_config(service_config).map_err(|source| {
            CliError::BuildDistanceService {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })
    }
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_route_with(args, &OsrmServiceBuilder, writer)
}

pub(crate) fn run_route_with<B: DistanceServiceBuilder>(
    args: RouteArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_ROUTE_REQUEST)?;
    let request: RouteRequest = load_request(&config.request_path)?;
    let service = builder.build(&config)?;
    let route = execute_route(service, &request)?;
    write_output(writer, &route)
}

/// Resolve `request` on a fresh current-thread runtime.
pub(crate) fn execute_route<S: DistanceService>(
    service: S,
    request: &RouteRequest,
) -> Result<WaypointRoute, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let resolver = RouteResolver::with_config(
        service,
        ResolverConfig::default().with_vehicle(request.vehicle),
    );
    log::debug!(
        "resolving {} to {} through {} waypoints",
        request.origin.id,
        request.destination.id,
        request.waypoints.len()
    );
    let route = runtime.block_on(resolver.plan_with_waypoints(
        &request.origin,
        &request.destination,
        &request.waypoints,
    ))?;
    Ok(route)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
