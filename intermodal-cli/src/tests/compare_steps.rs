//! Behaviour-driven step definitions driving the compare CLI scenarios.

use super::helpers::{sample_compare_request, write_json, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use crate::compare::run_compare;
use intermodal_core::WeightFactors;
use intermodal_scorer::{ComparisonResult, NormalisationMethod};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct CompareWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CompareWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["intermodal".to_owned(), "compare".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn write_request(&self, weights: WeightFactors) {
        write_json(&self.request_path, &sample_compare_request(weights));
    }

    fn output(&self) -> serde_json::Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be JSON")
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
fn world() -> CompareWorld {
    CompareWorld::new()
}

#[given("a cost-weighted comparison request exists on disk")]
fn cost_weighted_request_exists(#[from(world)] world: &CompareWorld) {
    world.write_request(WeightFactors::new(0.2, 0.6, 0.2));
}

#[given("a time-weighted comparison request exists on disk")]
fn time_weighted_request_exists(#[from(world)] world: &CompareWorld) {
    world.write_request(WeightFactors::new(0.8, 0.1, 0.1));
}

#[given("the comparison request contains invalid JSON")]
fn comparison_request_contains_invalid_json(#[from(world)] world: &CompareWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the comparison request has no plans")]
fn comparison_request_has_no_plans(#[from(world)] world: &CompareWorld) {
    let mut request = sample_compare_request(WeightFactors::balanced());
    request.plans.clear();
    write_json(&world.request_path, &request);
}

#[given("I omit the comparison request path")]
fn omit_comparison_request_path(#[from(world)] world: &CompareWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I request a sensitivity analysis")]
fn request_sensitivity_analysis(#[from(world)] world: &CompareWorld) {
    world.cli_args.borrow_mut().push("--sensitivity".to_owned());
}

#[given("I select the {method} normalisation method")]
fn select_normalisation_method(#[from(world)] world: &CompareWorld, method: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_COMPARE_METHOD}"), method]);
}

#[when("I run the compare command")]
fn run_compare_command(#[from(world)] world: &CompareWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Compare(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_compare(args, &mut *buffer)
        }
        Command::Route(_) => panic!("expected compare command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the command recommends the {key} plan")]
fn command_recommends_plan(#[from(world)] world: &CompareWorld, key: String) {
    let output = world.output();
    let result: ComparisonResult =
        serde_json::from_value(output["result"].clone()).expect("comparison result");
    assert_eq!(result.recommendation.key, key);
}

#[then("the output explains {count} plans")]
fn output_explains_plans(#[from(world)] world: &CompareWorld, count: usize) {
    let output = world.output();
    let breakdown = output["breakdown"].as_array().expect("breakdown array");
    let factors = output["dominant_factors"].as_array().expect("factors array");
    assert_eq!(breakdown.len(), count);
    assert_eq!(factors.len(), count);
}

#[then("the output includes a sensitivity report")]
fn output_includes_sensitivity(#[from(world)] world: &CompareWorld) {
    let output = world.output();
    assert!(output["sensitivity"].is_object(), "output: {output}");
}

#[then("the output omits the sensitivity report")]
fn output_omits_sensitivity(#[from(world)] world: &CompareWorld) {
    let output = world.output();
    assert!(output.get("sensitivity").is_none(), "output: {output}");
}

#[then("the result reports the {method} normalisation method")]
fn result_reports_method(#[from(world)] world: &CompareWorld, method: String) {
    let output = world.output();
    let result: ComparisonResult =
        serde_json::from_value(output["result"].clone()).expect("comparison result");
    let expected: NormalisationMethod = method.parse().expect("known method");
    assert_eq!(result.metadata.method, expected);
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &CompareWorld) {
    world.error(|error| match error {
        CliError::ParseRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    });
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &CompareWorld) {
    world.error(|error| match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_COMPARE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

#[then("the command fails because the method is unknown")]
fn command_fails_unknown_method(#[from(world)] world: &CompareWorld) {
    world.error(|error| {
        assert!(matches!(error, CliError::InvalidMethod(_)), "found {error:?}");
    });
}

#[then("the command fails because there is nothing to compare")]
fn command_fails_no_candidates(#[from(world)] world: &CompareWorld) {
    world.error(|error| {
        assert!(matches!(error, CliError::Compare(_)), "found {error:?}");
    });
}

macro_rules! register_compare_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/compare_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CompareWorld) {
            let _ = world;
        }
    };
}

register_compare_scenario!(compare_cost_weighted, "recommending the cheaper plan");
register_compare_scenario!(compare_time_weighted, "recommending the faster plan");
register_compare_scenario!(compare_with_method, "forcing z-score normalisation");
register_compare_scenario!(compare_invalid_json, "rejecting invalid JSON input");
register_compare_scenario!(compare_missing_request, "rejecting missing request paths");
register_compare_scenario!(compare_unknown_method, "rejecting unknown normalisation methods");
register_compare_scenario!(compare_no_plans, "rejecting requests without plans");
