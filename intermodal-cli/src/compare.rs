//! Compare command implementation for the intermodal CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use intermodal_core::{TransportPlan, WeightFactors};
use intermodal_scorer::{
    ComparisonResult, NormalisationMethod, OptimizerConfig, PlanFactors, RequestMetadata,
    ScoreBreakdown, ScoreOptimizer, SensitivityReport,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::document::{load_request, require_existing, write_output};
use crate::{ARG_COMPARE_METHOD, ARG_COMPARE_REQUEST, CliError, ENV_COMPARE_REQUEST};

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compare candidate transport plans under importance weights. \
                 The request is a JSON document holding the plans, the \
                 weights, and optional cargo and location metadata. The \
                 output holds the recommendation with its rationale, the \
                 per-plan score breakdown, and the dominant factors.",
    about = "Recommend one of several transport plans"
)]
#[ortho_config(prefix = "INTERMODAL")]
pub(crate) struct CompareArgs {
    /// Path to a JSON file containing a comparison request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Metric normalisation method (`min-max` or `z-score`).
    #[arg(long = ARG_COMPARE_METHOD, value_name = "method")]
    #[serde(default)]
    pub(crate) method: Option<String>,
    /// Also report the weight sensitivity of the recommendation.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "bool")]
    #[serde(default)]
    pub(crate) sensitivity: Option<bool>,
}

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<CompareConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CompareConfig::try_from(merged)
    }
}

/// Resolved `compare` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompareConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Method forced from the command line, environment, or config file.
    pub(crate) method: Option<NormalisationMethod>,
    /// Whether to run the sensitivity analysis.
    pub(crate) sensitivity: bool,
}

impl TryFrom<CompareArgs> for CompareConfig {
    type Error = CliError;

    fn try_from(args: CompareArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_COMPARE_REQUEST,
            env: ENV_COMPARE_REQUEST,
        })?;
        let method = args
            .method
            .as_deref()
            .map(str::parse::<NormalisationMethod>)
            .transpose()?;
        Ok(Self {
            request_path,
            method,
            sensitivity: args.sensitivity.unwrap_or(false),
        })
    }
}

/// JSON document accepted by `compare`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct CompareRequest {
    /// Candidate plans in priority order.
    pub(crate) plans: Vec<TransportPlan>,
    /// Importance weights; balanced when omitted.
    #[serde(default = "WeightFactors::balanced")]
    pub(crate) weights: WeightFactors,
    /// Cargo and location context.
    #[serde(default)]
    pub(crate) metadata: RequestMetadata,
    /// Optimizer tuning; defaults apply to omitted fields.
    #[serde(default)]
    pub(crate) optimizer: OptimizerConfig,
}

/// JSON document printed by `compare`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CompareReport {
    pub(crate) result: ComparisonResult,
    pub(crate) breakdown: Vec<ScoreBreakdown>,
    pub(crate) dominant_factors: Vec<PlanFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sensitivity: Option<SensitivityReport>,
}

pub(crate) fn run_compare(args: CompareArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_COMPARE_REQUEST)?;
    let request: CompareRequest = load_request(&config.request_path)?;
    let report = execute_compare(&config, request)?;
    write_output(writer, &report)
}

pub(crate) fn execute_compare(
    config: &CompareConfig,
    request: CompareRequest,
) -> Result<CompareReport, CliError> {
    let mut optimizer_config = request.optimizer;
    if let Some(method) = config.method {
        optimizer_config = optimizer_config.with_method(method);
    }
    let optimizer = ScoreOptimizer::with_config(optimizer_config);
    let cargo = request.metadata.cargo_mass_kg;
    log::debug!(
        "comparing {} plans with {} normalisation",
        request.plans.len(),
        optimizer_config.method
    );

    let breakdown = optimizer.score_breakdown(&request.plans, request.weights, cargo)?;
    let dominant_factors =
        optimizer.identify_dominant_factors(&request.plans, Some(request.weights), cargo)?;
    let sensitivity = if config.sensitivity {
        Some(optimizer.analyse_sensitivity(&request.plans, cargo)?)
    } else {
        None
    };
    let result =
        optimizer.generate_comparison_result(&request.plans, request.weights, request.metadata)?;

    Ok(CompareReport {
        result,
        breakdown,
        dominant_factors,
        sensitivity,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CompareConfig, CliError> {
    let merged = CompareArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CompareConfig::try_from(merged)
}
