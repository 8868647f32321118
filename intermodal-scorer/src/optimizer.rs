//! The score optimizer and its plan comparison.

use std::collections::{BTreeMap, HashMap};

use intermodal_core::{Criterion, PlanMetrics, PlanType, TransportPlan, WeightFactors};
use serde::{Deserialize, Serialize};

use crate::overrides::check_overrides;
use crate::{
    OptimizerConfig, OptimizerError, RecommendationReason, normalise_metrics, normalise_weights,
};

/// Score of one candidate, keyed by plan type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Candidate key, e.g. `single-mode` or `multi-modal-2`.
    pub key: String,
    /// Weighted normalised score; lower is better.
    pub score: f64,
}

/// Outcome of [`ScoreOptimizer::compare_plans`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanComparison {
    /// Index of the recommended plan in the input.
    pub recommended: usize,
    /// Key of the recommended plan.
    pub recommended_key: String,
    /// Whether an override or the weighted score decided.
    pub reason: RecommendationReason,
    /// Scores of every candidate in input order, overrides notwithstanding.
    pub scores: Vec<CandidateScore>,
}

impl PlanComparison {
    /// Scores keyed by candidate key.
    #[must_use]
    pub fn scores_by_key(&self) -> BTreeMap<String, f64> {
        self.scores
            .iter()
            .map(|candidate| (candidate.key.clone(), candidate.score))
            .collect()
    }
}

/// Every intermediate value of one scoring pass.
#[derive(Debug, Clone)]
pub(crate) struct ScoreTable {
    pub(crate) keys: Vec<String>,
    pub(crate) weights: WeightFactors,
    pub(crate) raw: Vec<PlanMetrics>,
    pub(crate) normalised: Vec<PlanMetrics>,
    pub(crate) components: Vec<PlanMetrics>,
    pub(crate) totals: Vec<f64>,
}

/// Compares candidate plans under importance weights.
///
/// All operations are pure functions of their inputs and the configuration
/// supplied at construction.
///
/// # Examples
///
/// ```
/// use intermodal_core::{PlanType, TransportPlan, WeightFactors};
/// use intermodal_scorer::{RecommendationReason, ScoreOptimizer};
///
/// let plan = |plan_type, time, cost, emissions| TransportPlan {
///     plan_type,
///     total_time: time,
///     total_cost: cost,
///     total_emissions: emissions,
///     distance_km: 0.0,
///     legs: None,
/// };
/// let plans = [
///     plan(PlanType::SingleMode, 6.5, 26_000.0, 26.0),
///     plan(PlanType::MultiModal, 20.0, 9_550.0, 8.0),
/// ];
///
/// let optimizer = ScoreOptimizer::new();
/// let comparison = optimizer
///     .compare_plans(&plans, WeightFactors::new(0.2, 0.6, 0.2), None)
///     .unwrap();
/// assert_eq!(comparison.recommended_key, "multi-modal");
/// assert_eq!(comparison.reason, RecommendationReason::WeightedScore);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreOptimizer {
    config: OptimizerConfig,
}

impl ScoreOptimizer {
    /// Create an optimizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an optimizer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Rescale `weights` to sum to one; see [`normalise_weights`].
    #[must_use]
    pub fn normalise_weights(&self, weights: WeightFactors) -> WeightFactors {
        normalise_weights(weights)
    }

    /// Normalised time, cost and emissions of each plan, in input order.
    ///
    /// # Errors
    /// Returns [`OptimizerError::InvalidMetric`] for negative or non-finite
    /// plan metrics.
    pub fn normalise_metrics(
        &self,
        plans: &[TransportPlan],
    ) -> Result<Vec<PlanMetrics>, OptimizerError> {
        validate_plans(plans)?;
        let raw: Vec<PlanMetrics> = plans.iter().map(TransportPlan::metrics).collect();
        Ok(normalise_metrics(&raw, self.config.method, self.config.epsilon))
    }

    /// Weighted score of a single plan on its raw metrics; lower is better.
    ///
    /// With a cargo mass the emissions are first scaled by the plan type's
    /// load curve.
    ///
    /// # Errors
    /// Returns [`OptimizerError::InvalidMetric`] for negative or non-finite
    /// plan metrics and [`OptimizerError::InvalidCargoMass`] for an unusable
    /// cargo mass.
    pub fn calculate_score(
        &self,
        plan: &TransportPlan,
        weights: WeightFactors,
        cargo_kg: Option<f64>,
    ) -> Result<f64, OptimizerError> {
        validate_plans(std::slice::from_ref(plan))?;
        validate_cargo(cargo_kg)?;
        let weights = normalise_weights(weights);
        let metrics = self.effective_metrics(plan, cargo_kg);
        Ok(Criterion::ALL
            .iter()
            .map(|&criterion| weights.get(criterion) * metrics.get(criterion))
            .sum())
    }

    /// Recommend one of `plans`.
    ///
    /// Overrides are checked first; otherwise the plan with the lowest
    /// weighted normalised score wins, ties going to the earlier plan.
    ///
    /// # Errors
    /// Returns [`OptimizerError::NoCandidates`] for an empty slice, and the
    /// validation errors of [`calculate_score`](Self::calculate_score).
    pub fn compare_plans(
        &self,
        plans: &[TransportPlan],
        weights: WeightFactors,
        cargo_kg: Option<f64>,
    ) -> Result<PlanComparison, OptimizerError> {
        let table = self.score_table(plans, weights, cargo_kg)?;
        let (recommended, reason) =
            check_overrides(plans, table.weights, cargo_kg, &self.config.overrides)
                .unwrap_or_else(|| (lowest(&table.totals), RecommendationReason::WeightedScore));

        let scores: Vec<CandidateScore> = table
            .keys
            .iter()
            .zip(&table.totals)
            .map(|(key, score)| CandidateScore {
                key: key.clone(),
                score: *score,
            })
            .collect();
        let recommended_key = table.keys.get(recommended).cloned().unwrap_or_default();

        Ok(PlanComparison {
            recommended,
            recommended_key,
            reason,
            scores,
        })
    }

    /// Raw metrics with emissions scaled by the load curve when a cargo mass
    /// is given.
    pub(crate) fn effective_metrics(
        &self,
        plan: &TransportPlan,
        cargo_kg: Option<f64>,
    ) -> PlanMetrics {
        let metrics = plan.metrics();
        match cargo_kg {
            Some(cargo) => {
                let factor = self.config.load_curves.for_plan(plan.plan_type).factor(cargo);
                metrics.with(Criterion::Emissions, metrics.emissions * factor)
            }
            None => metrics,
        }
    }

    pub(crate) fn score_table(
        &self,
        plans: &[TransportPlan],
        weights: WeightFactors,
        cargo_kg: Option<f64>,
    ) -> Result<ScoreTable, OptimizerError> {
        validate_plans(plans)?;
        validate_cargo(cargo_kg)?;

        let weights = normalise_weights(weights);
        let raw: Vec<PlanMetrics> = plans
            .iter()
            .map(|plan| self.effective_metrics(plan, cargo_kg))
            .collect();
        let normalised = normalise_metrics(&raw, self.config.method, self.config.epsilon);
        let components: Vec<PlanMetrics> = normalised
            .iter()
            .map(|metrics| PlanMetrics {
                time: weights.time * metrics.time,
                cost: weights.cost * metrics.cost,
                emissions: weights.emissions * metrics.emissions,
            })
            .collect();
        let totals = components.iter().map(PlanMetrics::sum).collect();

        Ok(ScoreTable {
            keys: candidate_keys(plans),
            weights,
            raw,
            normalised,
            components,
            totals,
        })
    }
}

/// Keys for `plans` in input order: the plan type label, with `-2`, `-3`,
/// ... appended to repeats.
#[must_use]
pub fn candidate_keys(plans: &[TransportPlan]) -> Vec<String> {
    let mut seen: HashMap<PlanType, usize> = HashMap::new();
    plans
        .iter()
        .map(|plan| {
            let count = seen.entry(plan.plan_type).or_insert(0);
            *count += 1;
            if *count == 1 {
                plan.plan_type.as_str().to_owned()
            } else {
                format!("{}-{count}", plan.plan_type)
            }
        })
        .collect()
}

fn lowest(totals: &[f64]) -> usize {
    let mut best = 0;
    let mut best_score = f64::INFINITY;
    for (index, &score) in totals.iter().enumerate() {
        if score < best_score {
            best = index;
            best_score = score;
        }
    }
    best
}

fn validate_plans(plans: &[TransportPlan]) -> Result<(), OptimizerError> {
    if plans.is_empty() {
        return Err(OptimizerError::NoCandidates);
    }
    for (index, plan) in plans.iter().enumerate() {
        let metrics = plan.metrics();
        for criterion in Criterion::ALL {
            let value = metrics.get(criterion);
            if !value.is_finite() || value < 0.0 {
                return Err(OptimizerError::InvalidMetric {
                    index,
                    criterion,
                    value,
                });
            }
        }
    }
    Ok(())
}

fn validate_cargo(cargo_kg: Option<f64>) -> Result<(), OptimizerError> {
    match cargo_kg {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(OptimizerError::InvalidCargoMass { value })
        }
        _ => Ok(()),
    }
}
