//! Behaviour-driven step definitions driving the route CLI scenarios.

use super::helpers::{write_json, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use crate::route::{
    DistanceServiceBuilder, RouteConfig, RouteRequest, run_route, run_route_with,
};
use intermodal_core::test_support::{StraightLineDistanceService, sample_locations};
use intermodal_core::{Location, LocationKind, VehicleClass};
use intermodal_routing::{ResolveError, WaypointRoute};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Default)]
struct StraightLineBuilder {
    seen: RefCell<Option<RouteConfig>>,
}

impl DistanceServiceBuilder for StraightLineBuilder {
    type Service = StraightLineDistanceService;

    fn build(&self, config: &RouteConfig) -> Result<Self::Service, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(StraightLineDistanceService::new(60.0))
    }
}

#[derive(Debug)]
struct RouteWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    builder: StraightLineBuilder,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RouteWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("route.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            builder: StraightLineBuilder::default(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["intermodal".to_owned(), "route".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn run(&self, live: bool) {
        let invocation = self.build_command_line();
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Route(args) => {
                let mut buffer = self.stdout.borrow_mut();
                if live {
                    run_route(args, &mut *buffer)
                } else {
                    run_route_with(args, &self.builder, &mut *buffer)
                }
            }
            Command::Compare(_) => panic!("expected route command"),
        });

        self.result.replace(Some(outcome));
    }

    fn route(&self) -> WaypointRoute {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON route")
    }

    fn error<T>(&self, check: impl FnOnce(&CliError) -> T) -> T {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error)
    }
}

#[fixture]
fn world() -> RouteWorld {
    RouteWorld::new()
}

fn location(id: &str) -> Location {
    sample_locations()
        .into_iter()
        .find(|location| location.id == id)
        .expect("fixture location")
}

fn amsterdam_to_bremen(waypoints: Vec<Location>) -> RouteRequest {
    RouteRequest {
        origin: location("AMS"),
        destination: location("BRE"),
        waypoints,
        vehicle: VehicleClass::Truck,
    }
}

#[given("a route request through Rotterdam exists on disk")]
fn route_request_through_rotterdam(#[from(world)] world: &RouteWorld) {
    write_json(
        &world.request_path,
        &amsterdam_to_bremen(vec![location("RTM")]),
    );
}

#[given("a route request with an invalid waypoint exists on disk")]
fn route_request_with_invalid_waypoint(#[from(world)] world: &RouteWorld) {
    let invalid = Location::new("BAD", "Nowhere", 95.0, 0.0, LocationKind::City);
    write_json(&world.request_path, &amsterdam_to_bremen(vec![invalid]));
}

#[given("the route request contains invalid JSON")]
fn route_request_contains_invalid_json(#[from(world)] world: &RouteWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the route request path")]
fn omit_route_request_path(#[from(world)] world: &RouteWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I set the route timeout to {seconds} seconds")]
fn set_route_timeout(#[from(world)] world: &RouteWorld, seconds: u64) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_ROUTE_TIMEOUT}"), seconds.to_string()]);
}

#[given("I point the route command at {url}")]
fn point_route_command_at(#[from(world)] world: &RouteWorld, url: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_ROUTE_OSRM_BASE_URL}"), url]);
}

#[when("I run the route command with a straight-line service")]
fn run_route_command(#[from(world)] world: &RouteWorld) {
    world.run(false);
}

#[when("I run the route command with the OSRM client")]
fn run_route_command_with_osrm(#[from(world)] world: &RouteWorld) {
    world.run(true);
}

#[then("the route command prints {count} legs")]
fn command_prints_route(#[from(world)] world: &RouteWorld, count: usize) {
    let route = world.route();
    assert_eq!(route.legs.len(), count);
    let distance: f64 = route.legs.iter().map(|leg| leg.distance_km).sum();
    let duration: f64 = route.legs.iter().map(|leg| leg.duration_hours).sum();
    assert!((route.total_distance_km - distance).abs() < 1e-9);
    assert!((route.total_duration_hours - duration).abs() < 1e-9);
}

#[then("the distance service uses a {seconds} second timeout")]
fn distance_service_uses_timeout(#[from(world)] world: &RouteWorld, seconds: u64) {
    let seen = world.builder.seen.borrow();
    let config = seen.as_ref().expect("builder invoked");
    assert_eq!(config.timeout, Some(Duration::from_secs(seconds)));
}

#[then("the route command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &RouteWorld) {
    world.error(|error| match error {
        CliError::ParseRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    });
}

#[then("the route command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &RouteWorld) {
    world.error(|error| match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_ROUTE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

#[then("the route command fails because a coordinate is invalid")]
fn command_fails_invalid_coordinate(#[from(world)] world: &RouteWorld) {
    world.error(|error| {
        assert!(
            matches!(error, CliError::Resolve(ResolveError::InvalidCoordinates(_))),
            "found {error:?}"
        );
    });
}

#[then("the route command fails because the OSRM URL is invalid")]
fn command_fails_invalid_url(#[from(world)] world: &RouteWorld) {
    world.error(|error| match error {
        CliError::BuildDistanceService { base_url, .. } => assert_eq!(base_url, "not-a-url"),
        other => panic!("expected BuildDistanceService, found {other:?}"),
    });
}

macro_rules! register_route_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/route_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RouteWorld) {
            let _ = world;
        }
    };
}

register_route_scenario!(route_through_waypoint, "resolving a route through a waypoint");
register_route_scenario!(route_timeout_flag, "passing the request timeout to the service");
register_route_scenario!(route_invalid_json, "rejecting invalid JSON input");
register_route_scenario!(route_missing_request, "rejecting missing request paths");
register_route_scenario!(route_invalid_waypoint, "rejecting invalid waypoints");
register_route_scenario!(route_invalid_url, "rejecting an invalid OSRM base URL");
