//! Importance weights over the three comparison criteria.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three dimensions plans are compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Criterion {
    /// Door-to-door travel time.
    Time,
    /// Monetary cost.
    Cost,
    /// CO2 emissions.
    Emissions,
}

impl Criterion {
    /// All criteria in canonical order.
    pub const ALL: [Self; 3] = [Self::Time, Self::Cost, Self::Emissions];

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Cost => "cost",
            Self::Emissions => "emissions",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied importance of each criterion.
///
/// Components are expected to be non-negative. They need not sum to one on
/// input; the optimizer normalises them before use.
///
/// # Examples
///
/// ```
/// use intermodal_core::{Criterion, WeightFactors};
///
/// let weights = WeightFactors::new(0.1, 0.2, 0.7);
/// assert_eq!(weights.get(Criterion::Emissions), 0.7);
/// assert_eq!(weights.with(Criterion::Time, 0.5).time, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightFactors {
    /// Importance of travel time.
    pub time: f64,
    /// Importance of cost.
    pub cost: f64,
    /// Importance of emissions.
    pub emissions: f64,
}

impl WeightFactors {
    /// Construct weights from the three components.
    #[must_use]
    pub const fn new(time: f64, cost: f64, emissions: f64) -> Self {
        Self {
            time,
            cost,
            emissions,
        }
    }

    /// The fixed near-equal split `{0.33, 0.33, 0.34}`.
    #[must_use]
    pub const fn balanced() -> Self {
        Self::new(0.33, 0.33, 0.34)
    }

    /// Weight for `criterion`.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Time => self.time,
            Criterion::Cost => self.cost,
            Criterion::Emissions => self.emissions,
        }
    }

    /// Copy with `criterion` replaced by `value`.
    #[must_use]
    pub const fn with(mut self, criterion: Criterion, value: f64) -> Self {
        match criterion {
            Criterion::Time => self.time = value,
            Criterion::Cost => self.cost = value,
            Criterion::Emissions => self.emissions = value,
        }
        self
    }

    /// Sum of the three components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.time + self.cost + self.emissions
    }
}

impl Default for WeightFactors {
    fn default() -> Self {
        Self::balanced()
    }
}
