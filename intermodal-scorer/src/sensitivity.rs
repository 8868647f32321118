//! Weight sensitivity: how far one weight must move to flip the outcome.

use intermodal_core::{Criterion, TransportPlan, WeightFactors};
use serde::{Deserialize, Serialize};

use crate::{OptimizerError, ScoreOptimizer};

/// Maximum bisection steps per criterion.
const MAX_ITERATIONS: usize = 20;
/// Bisection stops once the bracket is narrower than this.
const PRECISION: f64 = 0.001;

type ThresholdResult = Result<Option<SensitivityThreshold>, OptimizerError>;

/// Which way a weight moved to change the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Raising the weight above the threshold flips the recommendation.
    Increase,
    /// Lowering the weight below the threshold flips the recommendation.
    Decrease,
}

/// Weight value at which the recommendation changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityThreshold {
    /// Raw weight value, before re-normalisation, at the flip point.
    pub threshold: f64,
    /// Which way the weight moved.
    pub direction: Direction,
    /// Key of the plan recommended past the threshold.
    pub flips_to: String,
}

/// Result of [`ScoreOptimizer::analyse_sensitivity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Key recommended under balanced weights.
    pub baseline: String,
    /// Threshold for the time weight, if any value in `[0, 1]` flips.
    pub time: Option<SensitivityThreshold>,
    /// Threshold for the cost weight.
    pub cost: Option<SensitivityThreshold>,
    /// Threshold for the emissions weight.
    pub emissions: Option<SensitivityThreshold>,
}

impl SensitivityReport {
    /// Threshold for `criterion`.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> Option<&SensitivityThreshold> {
        match criterion {
            Criterion::Time => self.time.as_ref(),
            Criterion::Cost => self.cost.as_ref(),
            Criterion::Emissions => self.emissions.as_ref(),
        }
    }
}

impl ScoreOptimizer {
    /// Find, per criterion, the weight at which the recommendation departs
    /// from the balanced-weights baseline.
    ///
    /// The other two weights stay at their balanced values and the triple is
    /// re-normalised after each perturbation. The end of `[0, 1]` that flips
    /// the recommendation is bisected against the baseline value; the
    /// reported threshold is the midpoint of the final bracket.
    ///
    /// # Errors
    /// Returns the validation errors of
    /// [`compare_plans`](Self::compare_plans).
    pub fn analyse_sensitivity(
        &self,
        plans: &[TransportPlan],
        cargo_kg: Option<f64>,
    ) -> Result<SensitivityReport, OptimizerError> {
        let balanced = WeightFactors::balanced();
        let baseline = self.compare_plans(plans, balanced, cargo_kg)?;
        let recommend = |criterion: Criterion, value: f64| {
            self.compare_plans(plans, balanced.with(criterion, value), cargo_kg)
                .map(|comparison| (comparison.recommended, comparison.recommended_key))
        };

        let threshold_for = |criterion: Criterion| -> ThresholdResult {
            let start = balanced.get(criterion);
            for (end, direction) in [(1.0, Direction::Increase), (0.0, Direction::Decrease)] {
                let (index, _) = recommend(criterion, end)?;
                if index != baseline.recommended {
                    return bisect(start, end, direction, |value| {
                        recommend(criterion, value)
                            .map(|(index, key)| (index != baseline.recommended).then_some(key))
                    })
                    .map(Some);
                }
            }
            Ok(None)
        };

        let time = threshold_for(Criterion::Time)?;
        let cost = threshold_for(Criterion::Cost)?;
        let emissions = threshold_for(Criterion::Emissions)?;
        Ok(SensitivityReport {
            baseline: baseline.recommended_key,
            time,
            cost,
            emissions,
        })
    }
}

/// Narrow `[same, flipped]` until it is tighter than [`PRECISION`].
///
/// `flips` returns the new recommendation key when a value flips the
/// outcome.
fn bisect<F>(
    same: f64,
    flipped: f64,
    direction: Direction,
    mut flips: F,
) -> Result<SensitivityThreshold, OptimizerError>
where
    F: FnMut(f64) -> Result<Option<String>, OptimizerError>,
{
    let mut same = same;
    let mut flipped = flipped;
    let mut flips_to = flips(flipped)?.unwrap_or_default();
    for _ in 0..MAX_ITERATIONS {
        if (flipped - same).abs() < PRECISION {
            break;
        }
        let mid = (same + flipped) / 2.0;
        match flips(mid)? {
            Some(key) => {
                flipped = mid;
                flips_to = key;
            }
            None => same = mid,
        }
    }
    Ok(SensitivityThreshold {
        threshold: (same + flipped) / 2.0,
        direction,
        flips_to,
    })
}
