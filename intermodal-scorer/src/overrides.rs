//! Heuristics that force a recommendation ahead of generic scoring.

use intermodal_core::{PlanType, TransportPlan, WeightFactors};
use serde::{Deserialize, Serialize};

use crate::OverrideThresholds;

/// Why a plan was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationReason {
    /// Emissions dominate the weights, the cargo is heavy, and the
    /// multi-modal plan is much cleaner.
    EnvironmentalOverride,
    /// Time dominates the weights and the single-mode plan is much faster.
    TimeOverride,
    /// Lowest weighted score among the candidates.
    WeightedScore,
}

/// Check both overrides, environmental first.
///
/// `weights` must already be normalised. The first single-mode and first
/// multi-modal plan in input order are compared on their raw totals; when
/// either kind is missing no override applies.
pub(crate) fn check_overrides(
    plans: &[TransportPlan],
    weights: WeightFactors,
    cargo_kg: Option<f64>,
    thresholds: &OverrideThresholds,
) -> Option<(usize, RecommendationReason)> {
    let (single_index, single_plan) = first_of(plans, PlanType::SingleMode)?;
    let (multi_index, multi_plan) = first_of(plans, PlanType::MultiModal)?;

    let heavy = cargo_kg.is_some_and(|cargo| cargo > thresholds.environmental_cargo_kg);
    if weights.emissions > thresholds.environmental_weight
        && heavy
        && reduction(single_plan.total_emissions, multi_plan.total_emissions)
            > thresholds.emission_reduction
    {
        log::debug!("environmental override selects plan {multi_index}");
        return Some((multi_index, RecommendationReason::EnvironmentalOverride));
    }

    if weights.time > thresholds.time_weight
        && reduction(multi_plan.total_time, single_plan.total_time) > thresholds.time_reduction
    {
        log::debug!("time override selects plan {single_index}");
        return Some((single_index, RecommendationReason::TimeOverride));
    }

    None
}

fn first_of(plans: &[TransportPlan], plan_type: PlanType) -> Option<(usize, &TransportPlan)> {
    plans
        .iter()
        .enumerate()
        .find(|(_, plan)| plan.plan_type == plan_type)
}

/// Fraction by which `candidate` undercuts `reference`; zero when the
/// reference is not positive.
fn reduction(reference: f64, candidate: f64) -> f64 {
    if reference > 0.0 {
        (reference - candidate) / reference
    } else {
        0.0
    }
}
