//! The complete comparison document returned to callers.

use std::time::Instant;

use intermodal_core::{PlanType, TransportLeg, TransportPlan, WeightFactors};
use serde::{Deserialize, Serialize};

use crate::{
    CandidateScore, NormalisationMethod, OptimizerError, RecommendationReason, ScoreOptimizer,
};

/// Upper bound of the reported confidence.
const MAX_CONFIDENCE: f64 = 95.0;

/// Caller context echoed into the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestMetadata {
    /// Cargo mass in kilograms; enables load-scaled emissions and the
    /// environmental override.
    pub cargo_mass_kg: Option<f64>,
    /// Label of the origin.
    pub origin: Option<String>,
    /// Label of the destination.
    pub destination: Option<String>,
}

/// The recommended candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Candidate key.
    pub key: String,
    /// Position of the plan in the input.
    pub index: usize,
    /// Plan type of the recommended plan.
    pub plan_type: PlanType,
    /// Whether an override or the weighted score decided.
    pub reason: RecommendationReason,
    /// Weighted score of the recommended plan.
    pub score: f64,
}

/// How the recommended plan travels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rationale {
    /// A single direct movement.
    Direct {
        /// Distance in kilometres.
        distance_km: f64,
        /// Duration in hours.
        duration_hours: f64,
    },
    /// Ordered legs of a multi-modal plan.
    Legs {
        /// Legs in travel order.
        legs: Vec<TransportLeg>,
    },
}

impl Rationale {
    fn for_plan(plan: &TransportPlan) -> Self {
        match (plan.plan_type, &plan.legs) {
            (PlanType::MultiModal, Some(legs)) if !legs.is_empty() => Self::Legs {
                legs: legs.clone(),
            },
            _ => Self::Direct {
                distance_km: plan.distance_km,
                duration_hours: plan.total_time,
            },
        }
    }
}

/// Rounded percentage by which the recommendation differs from an
/// alternative; negative values mean the recommendation is lower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageDifferences {
    /// Key of the alternative compared against.
    pub against: String,
    /// Travel time difference.
    pub time: f64,
    /// Cost difference.
    pub cost: f64,
    /// Emissions difference.
    pub emissions: f64,
}

/// Computation details accompanying a [`ComparisonResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Wall-clock time spent scoring, in milliseconds.
    pub compute_time_ms: f64,
    /// Score spread as a rounded percentage of the highest score, capped at
    /// 95.
    pub confidence: f64,
    /// Differences versus the first non-recommended candidate; absent for a
    /// single candidate.
    pub differences: Option<PercentageDifferences>,
    /// Normalisation method used.
    pub method: NormalisationMethod,
    /// Importance weights after normalisation.
    pub weights: WeightFactors,
    /// Caller context.
    pub request: RequestMetadata,
}

/// Candidates, recommendation, rationale and metadata of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Every candidate's score in input order.
    pub candidates: Vec<CandidateScore>,
    /// The chosen plan.
    pub recommendation: Recommendation,
    /// How the chosen plan travels.
    pub rationale: Rationale,
    /// Computation details.
    pub metadata: ResultMetadata,
}

impl ScoreOptimizer {
    /// Compare `plans` and package the outcome for callers.
    ///
    /// # Errors
    /// Returns the errors of [`compare_plans`](Self::compare_plans).
    pub fn generate_comparison_result(
        &self,
        plans: &[TransportPlan],
        weights: WeightFactors,
        request: RequestMetadata,
    ) -> Result<ComparisonResult, OptimizerError> {
        let started = Instant::now();
        let comparison = self.compare_plans(plans, weights, request.cargo_mass_kg)?;
        let recommended = plans
            .get(comparison.recommended)
            .ok_or(OptimizerError::NoCandidates)?;

        let score = comparison
            .scores
            .get(comparison.recommended)
            .map_or(0.0, |candidate| candidate.score);
        let differences = plans
            .iter()
            .zip(&comparison.scores)
            .enumerate()
            .find(|(index, _)| *index != comparison.recommended)
            .map(|(_, (alternative, candidate))| PercentageDifferences {
                against: candidate.key.clone(),
                time: percentage_difference(recommended.total_time, alternative.total_time),
                cost: percentage_difference(recommended.total_cost, alternative.total_cost),
                emissions: percentage_difference(
                    recommended.total_emissions,
                    alternative.total_emissions,
                ),
            });
        let confidence = confidence(&comparison.scores);

        Ok(ComparisonResult {
            recommendation: Recommendation {
                key: comparison.recommended_key,
                index: comparison.recommended,
                plan_type: recommended.plan_type,
                reason: comparison.reason,
                score,
            },
            rationale: Rationale::for_plan(recommended),
            candidates: comparison.scores,
            metadata: ResultMetadata {
                compute_time_ms: started.elapsed().as_secs_f64() * 1_000.0,
                confidence,
                differences,
                method: self.config().method,
                weights: self.normalise_weights(weights),
                request,
            },
        })
    }
}

/// `min(round((max - min) / max * 100), 95)`, or zero when the highest
/// score is not positive.
fn confidence(scores: &[CandidateScore]) -> f64 {
    let max = scores
        .iter()
        .map(|candidate| candidate.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = scores
        .iter()
        .map(|candidate| candidate.score)
        .fold(f64::INFINITY, f64::min);
    if max <= 0.0 || !max.is_finite() {
        return 0.0;
    }
    round_half_up((max - min) / max * 100.0).min(MAX_CONFIDENCE)
}

/// `round((value - reference) / reference * 100)`, or zero for a zero
/// reference.
fn percentage_difference(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        round_half_up((value - reference) / reference * 100.0)
    }
}

/// Rounds to the nearest integer with halves going towards positive
/// infinity, so `-62.5` becomes `-62`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
