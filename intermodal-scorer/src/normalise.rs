//! Weight and metric normalisation.

use intermodal_core::{Criterion, PlanMetrics, WeightFactors};

use crate::NormalisationMethod;

/// Value given to every plan when a min-max range is degenerate.
const DEGENERATE_MIN_MAX: f64 = 0.5;

/// Rescale `weights` so the components sum to one.
///
/// Negative and non-finite components count as zero. When nothing remains
/// the balanced split `{0.33, 0.33, 0.34}` is returned.
///
/// # Examples
///
/// ```
/// use intermodal_core::WeightFactors;
/// use intermodal_scorer::normalise_weights;
///
/// let weights = normalise_weights(WeightFactors::new(2.0, 1.0, 1.0));
/// assert_eq!(weights, WeightFactors::new(0.5, 0.25, 0.25));
/// assert_eq!(
///     normalise_weights(WeightFactors::new(0.0, 0.0, 0.0)),
///     WeightFactors::balanced()
/// );
/// ```
#[must_use]
pub fn normalise_weights(weights: WeightFactors) -> WeightFactors {
    let clean = |value: f64| if value.is_finite() && value > 0.0 { value } else { 0.0 };
    let cleaned = WeightFactors::new(
        clean(weights.time),
        clean(weights.cost),
        clean(weights.emissions),
    );
    let total = cleaned.total();
    if total > 0.0 && total.is_finite() {
        WeightFactors::new(
            cleaned.time / total,
            cleaned.cost / total,
            cleaned.emissions / total,
        )
    } else {
        WeightFactors::balanced()
    }
}

/// Rescale each criterion across `metrics` with `method`.
///
/// Ranges (min-max) or standard deviations (z-score) at or below `epsilon`
/// are degenerate: every plan then gets 0.5 or 0 respectively.
#[must_use]
pub fn normalise_metrics(
    metrics: &[PlanMetrics],
    method: NormalisationMethod,
    epsilon: f64,
) -> Vec<PlanMetrics> {
    let mut normalised = vec![PlanMetrics::default(); metrics.len()];
    for criterion in Criterion::ALL {
        let values: Vec<f64> = metrics.iter().map(|m| m.get(criterion)).collect();
        let rescaled = match method {
            NormalisationMethod::MinMax => min_max(&values, epsilon),
            NormalisationMethod::ZScore => z_score(&values, epsilon),
        };
        for (slot, value) in normalised.iter_mut().zip(rescaled) {
            *slot = slot.with(criterion, value);
        }
    }
    normalised
}

fn min_max(values: &[f64], epsilon: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= epsilon || !range.is_finite() {
        return vec![DEGENERATE_MIN_MAX; values.len()];
    }
    values.iter().map(|value| (value - min) / range).collect()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "candidate counts are tiny compared to f64 precision"
)]
fn z_score(values: &[f64], epsilon: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let stddev = variance.sqrt();
    if stddev <= epsilon || !stddev.is_finite() {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| (value - mean) / stddev).collect()
}
