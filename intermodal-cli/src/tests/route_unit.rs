//! Focused unit tests covering route CLI configuration and execution.

use super::*;
use crate::route::{
    DEFAULT_OSRM_BASE_URL, DistanceServiceBuilder, OsrmServiceBuilder, RouteConfig, RouteRequest,
    config_from_layers_for_test, execute_route,
};
use intermodal_core::test_support::{StraightLineDistanceService, sample_locations};
use intermodal_core::{Location, LocationKind, VehicleClass};
use intermodal_routing::ResolveError;
use rstest::{fixture, rstest};
use std::time::Duration;

fn location(id: &str) -> Location {
    sample_locations()
        .into_iter()
        .find(|location| location.id == id)
        .expect("fixture location")
}

#[fixture]
fn request() -> RouteRequest {
    RouteRequest {
        origin: location("AMS"),
        destination: location("BRE"),
        waypoints: vec![location("RTM")],
        vehicle: VehicleClass::Truck,
    }
}

#[rstest]
fn converting_route_without_request_errors() {
    let err = RouteConfig::try_from(RouteArgs::default()).expect_err("missing request");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ROUTE_REQUEST);
            assert_eq!(env, ENV_ROUTE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn route_config_defaults_base_url_and_timeout() {
    let args = RouteArgs {
        request_path: Some("route.json".into()),
        osrm_base_url: None,
        timeout_secs: None,
    };

    let config = RouteConfig::try_from(args).expect("config should build");
    assert_eq!(config.osrm_base_url, DEFAULT_OSRM_BASE_URL);
    assert_eq!(config.timeout, None);
}

#[rstest]
fn osrm_builder_rejects_invalid_base_url() {
    let config = RouteConfig {
        request_path: "route.json".into(),
        osrm_base_url: "not a url".to_owned(),
        timeout: Some(Duration::from_secs(2)),
    };

    let err = OsrmServiceBuilder
        .build(&config)
        .expect_err("invalid url should fail");
    match err {
        CliError::BuildDistanceService { base_url, .. } => assert_eq!(base_url, "not a url"),
        other => panic!("expected BuildDistanceService, found {other:?}"),
    }
}

#[rstest]
fn execute_route_sums_legs_through_waypoints(request: RouteRequest) {
    let route = execute_route(StraightLineDistanceService::new(60.0), &request)
        .expect("route resolves");

    let stops: Vec<&str> = route.legs.iter().map(|leg| leg.from.as_str()).collect();
    assert_eq!(stops, ["AMS", "RTM"]);
    let summed: f64 = route.legs.iter().map(|leg| leg.distance_km).sum();
    assert!((route.total_distance_km - summed).abs() < 1e-9);
    assert!((route.total_duration_hours - route.total_distance_km / 60.0).abs() < 1e-9);
}

#[rstest]
fn execute_route_reports_invalid_coordinates(mut request: RouteRequest) {
    request.waypoints = vec![Location::new("BAD", "Nowhere", 95.0, 0.0, LocationKind::City)];

    let err = execute_route(StraightLineDistanceService::new(60.0), &request)
        .expect_err("invalid waypoint");
    assert!(
        matches!(err, CliError::Resolve(ResolveError::InvalidCoordinates(_))),
        "found {err:?}"
    );
}

#[rstest]
fn route_request_defaults_waypoints_and_vehicle() {
    let json = r#"{
        "origin": {"id":"AMS","name":"Amsterdam","latitude":52.37,"longitude":4.9,"kind":"city"},
        "destination": {"id":"BRE","name":"Bremen","latitude":53.08,"longitude":8.8,"kind":"city"}
    }"#;

    let request: RouteRequest = serde_json::from_str(json).expect("minimal request parses");

    assert!(request.waypoints.is_empty());
    assert_eq!(request.vehicle, VehicleClass::Truck);
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "osrm_base_url": "http://from-file:5000",
            "timeout_secs": 30,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
    }));
    composer.push_cli(json!({
        "timeout_secs": 5,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, "from-env.json");
    assert_eq!(config.osrm_base_url, "http://from-file:5000");
    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
}
