//! Tunable configuration for the score optimizer.

use std::fmt;
use std::str::FromStr;

use intermodal_core::PlanType;
use serde::{Deserialize, Serialize};

/// How plan metrics are rescaled before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalisationMethod {
    /// `(value - min) / (max - min)`; 0.5 for every plan when the range is
    /// degenerate.
    #[default]
    MinMax,
    /// `(value - mean) / stddev` with the population standard deviation; 0
    /// for every plan when the deviation is degenerate.
    ZScore,
}

impl NormalisationMethod {
    /// Stable kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinMax => "min-max",
            Self::ZScore => "z-score",
        }
    }
}

impl fmt::Display for NormalisationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown [`NormalisationMethod`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown normalisation method `{0}`; expected `min-max` or `z-score`")]
pub struct ParseNormalisationMethodError(String);

impl FromStr for NormalisationMethod {
    type Err = ParseNormalisationMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min-max" | "minmax" => Ok(Self::MinMax),
            "z-score" | "zscore" => Ok(Self::ZScore),
            other => Err(ParseNormalisationMethodError(other.to_owned())),
        }
    }
}

/// Thresholds of the two override heuristics.
///
/// Weights are compared after normalisation. Reductions are fractions: 0.3
/// means "more than 30% lower".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideThresholds {
    /// Emissions weight above which the environmental override may apply.
    pub environmental_weight: f64,
    /// Cargo mass in kilograms above which the environmental override may
    /// apply.
    pub environmental_cargo_kg: f64,
    /// Minimum emissions reduction of the multi-modal plan.
    pub emission_reduction: f64,
    /// Time weight above which the time override may apply.
    pub time_weight: f64,
    /// Minimum travel-time reduction of the single-mode plan.
    pub time_reduction: f64,
}

impl Default for OverrideThresholds {
    fn default() -> Self {
        Self {
            environmental_weight: 0.7,
            environmental_cargo_kg: 5_000.0,
            emission_reduction: 0.3,
            time_weight: 0.8,
            time_reduction: 0.5,
        }
    }
}

/// Emissions scaling with load for one transport mode.
///
/// The factor is `base_factor + load_factor * min(cargo / capacity, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadCurve {
    /// Factor applied to an empty vehicle.
    pub base_factor: f64,
    /// Additional factor at full load.
    pub load_factor: f64,
    /// Load at which the curve saturates, in kilograms.
    pub capacity_kg: f64,
}

impl LoadCurve {
    /// Multiplier for a cargo of `cargo_kg`.
    #[must_use]
    pub fn factor(&self, cargo_kg: f64) -> f64 {
        let utilisation = if self.capacity_kg > 0.0 {
            (cargo_kg / self.capacity_kg).min(1.0)
        } else {
            1.0
        };
        self.base_factor + self.load_factor * utilisation
    }
}

/// One [`LoadCurve`] per plan type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadCurves {
    /// Curve for single-mode (truck) plans.
    pub single_mode: LoadCurve,
    /// Curve for multi-modal (vessel) plans.
    pub multi_modal: LoadCurve,
}

impl Default for LoadCurves {
    fn default() -> Self {
        Self {
            single_mode: LoadCurve {
                base_factor: 0.8,
                load_factor: 0.4,
                capacity_kg: 24_000.0,
            },
            multi_modal: LoadCurve {
                base_factor: 0.9,
                load_factor: 0.2,
                capacity_kg: 250_000.0,
            },
        }
    }
}

impl LoadCurves {
    /// Curve applying to plans of `plan_type`.
    #[must_use]
    pub const fn for_plan(&self, plan_type: PlanType) -> &LoadCurve {
        match plan_type {
            PlanType::SingleMode => &self.single_mode,
            PlanType::MultiModal => &self.multi_modal,
        }
    }
}

/// Configuration of a [`ScoreOptimizer`](crate::ScoreOptimizer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Metric normalisation method.
    pub method: NormalisationMethod,
    /// Ranges or deviations at or below this value are degenerate.
    pub epsilon: f64,
    /// Override heuristic thresholds.
    pub overrides: OverrideThresholds,
    /// Per-mode emissions load curves.
    pub load_curves: LoadCurves,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            method: NormalisationMethod::MinMax,
            epsilon: 1e-9,
            overrides: OverrideThresholds::default(),
            load_curves: LoadCurves::default(),
        }
    }
}

impl OptimizerConfig {
    /// Set the normalisation method.
    #[must_use]
    pub const fn with_method(mut self, method: NormalisationMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the degenerate-range epsilon.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the override thresholds.
    #[must_use]
    pub const fn with_overrides(mut self, overrides: OverrideThresholds) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the load curves.
    #[must_use]
    pub const fn with_load_curves(mut self, load_curves: LoadCurves) -> Self {
        self.load_curves = load_curves;
        self
    }
}
