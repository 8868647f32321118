//! Explainability: per-plan score decomposition and dominant factors.

use intermodal_core::{Criterion, PlanMetrics, TransportPlan, WeightFactors};
use serde::{Deserialize, Serialize};

use crate::{OptimizerError, ScoreOptimizer};

/// Share of a plan's total score above which a component dominates.
const DOMINANCE_SHARE: f64 = 0.3;

/// A criterion driving a plan's score, or none in particular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantFactor {
    /// Travel time.
    Time,
    /// Cost.
    Cost,
    /// Emissions.
    Emissions,
    /// No component exceeds the dominance share.
    Balanced,
}

impl From<Criterion> for DominantFactor {
    fn from(criterion: Criterion) -> Self {
        match criterion {
            Criterion::Time => Self::Time,
            Criterion::Cost => Self::Cost,
            Criterion::Emissions => Self::Emissions,
        }
    }
}

/// Dominant factors of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFactors {
    /// Candidate key.
    pub key: String,
    /// Dominant criteria in canonical order, or `[Balanced]`.
    pub factors: Vec<DominantFactor>,
}

/// Full computation behind one candidate's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Candidate key.
    pub key: String,
    /// Weighted normalised values; they sum to `total_score`.
    pub components: PlanMetrics,
    /// Metrics fed into normalisation, emissions load-scaled when a cargo
    /// mass was given.
    pub raw_metrics: PlanMetrics,
    /// Normalised metrics.
    pub normalised_metrics: PlanMetrics,
    /// Weighted score; lower is better.
    pub total_score: f64,
}

impl ScoreOptimizer {
    /// Criteria contributing more than 30% of each plan's score.
    ///
    /// Shares are taken over the absolute weighted components, so z-score
    /// components below the mean still count. Weights default to the
    /// balanced split. A plan whose components are all effectively zero is
    /// balanced.
    ///
    /// # Errors
    /// Returns the validation errors of
    /// [`compare_plans`](Self::compare_plans).
    pub fn identify_dominant_factors(
        &self,
        plans: &[TransportPlan],
        weights: Option<WeightFactors>,
        cargo_kg: Option<f64>,
    ) -> Result<Vec<PlanFactors>, OptimizerError> {
        let table = self.score_table(plans, weights.unwrap_or_default(), cargo_kg)?;
        let epsilon = self.config().epsilon;

        Ok(table
            .keys
            .into_iter()
            .zip(&table.components)
            .map(|(key, components)| {
                let magnitude: f64 = Criterion::ALL
                    .iter()
                    .map(|&criterion| components.get(criterion).abs())
                    .sum();
                let mut factors: Vec<DominantFactor> = if magnitude <= epsilon {
                    Vec::new()
                } else {
                    Criterion::ALL
                        .into_iter()
                        .filter(|&criterion| {
                            components.get(criterion).abs() > DOMINANCE_SHARE * magnitude
                        })
                        .map(DominantFactor::from)
                        .collect()
                };
                if factors.is_empty() {
                    factors.push(DominantFactor::Balanced);
                }
                PlanFactors { key, factors }
            })
            .collect())
    }

    /// Raw, normalised and weighted values behind every plan's score.
    ///
    /// # Errors
    /// Returns the validation errors of
    /// [`compare_plans`](Self::compare_plans).
    pub fn score_breakdown(
        &self,
        plans: &[TransportPlan],
        weights: WeightFactors,
        cargo_kg: Option<f64>,
    ) -> Result<Vec<ScoreBreakdown>, OptimizerError> {
        let table = self.score_table(plans, weights, cargo_kg)?;
        Ok(table
            .keys
            .into_iter()
            .zip(table.raw)
            .zip(table.normalised)
            .zip(table.components.into_iter().zip(table.totals))
            .map(
                |(((key, raw_metrics), normalised_metrics), (components, total_score))| {
                    ScoreBreakdown {
                        key,
                        components,
                        raw_metrics,
                        normalised_metrics,
                        total_score,
                    }
                },
            )
            .collect())
    }
}
