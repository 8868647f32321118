//! Transport legs and complete origin-to-destination plans.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Criterion, ModeCatalog, ModeId, TransportMode};

/// Single-mode or multi-modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PlanType {
    /// One vehicle from origin to destination.
    SingleMode,
    /// Road to a port, vessel between ports, road to the destination.
    MultiModal,
}

impl PlanType {
    /// Stable kebab-case label, used as the candidate key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleMode => "single-mode",
            Self::MultiModal => "multi-modal",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time (hours), cost and emissions (kg CO2) of a plan or leg.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanMetrics {
    /// Travel time in hours.
    pub time: f64,
    /// Monetary cost.
    pub cost: f64,
    /// Emissions in kilograms of CO2.
    pub emissions: f64,
}

impl PlanMetrics {
    /// Value for `criterion`.
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

    /// Sum of the three values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.time + self.cost + self.emissions
    }
}

impl std::ops::Add for PlanMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            time: self.time + rhs.time,
            cost: self.cost + rhs.cost,
            emissions: self.emissions + rhs.emissions,
        }
    }
}

/// One travel segment between two locations using one mode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransportLeg {
    /// Identifier of the departure location.
    pub from: String,
    /// Identifier of the arrival location.
    pub to: String,
    /// Mode used on this leg.
    pub mode: ModeId,
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Duration in hours.
    pub duration_hours: f64,
}

impl TransportLeg {
    /// Metrics for this leg under `mode`.
    #[must_use]
    pub fn metrics(&self, mode: &TransportMode, cargo_kg: f64) -> PlanMetrics {
        mode.leg_metrics(self.distance_km, self.duration_hours, cargo_kg)
    }
}

/// Errors returned by [`TransportPlan::from_legs`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No legs were supplied.
    #[error("plan must contain at least one leg")]
    EmptyLegs,
    /// A leg does not start where the previous one ended.
    #[error("leg {index} starts at {from} but the previous leg ends at {previous_to}")]
    Discontiguous {
        /// Position of the offending leg.
        index: usize,
        /// Arrival of the previous leg.
        previous_to: String,
        /// Departure of the offending leg.
        from: String,
    },
    /// A leg has a negative or non-finite distance or duration.
    #[error("leg {index} has an invalid distance or duration")]
    InvalidLeg {
        /// Position of the offending leg.
        index: usize,
    },
}

/// A complete origin-to-destination option.
///
/// For plans built from legs the totals equal the per-leg sums.
///
/// # Examples
///
/// ```
/// use intermodal_core::{ModeId, PlanType, TransportMode, TransportPlan};
///
/// let truck = TransportMode {
///     id: ModeId::Truck,
///     cost_per_km: 50.0,
///     emission_per_tonne_km: 0.1,
///     average_speed_kmh: 80.0,
/// };
/// let plan = TransportPlan::single_mode(520.0, 6.5, &truck, 500.0);
/// assert_eq!(plan.plan_type, PlanType::SingleMode);
/// assert_eq!(plan.total_cost, 26_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransportPlan {
    /// Single-mode or multi-modal.
    pub plan_type: PlanType,
    /// Total travel time in hours.
    pub total_time: f64,
    /// Total cost.
    pub total_cost: f64,
    /// Total emissions in kilograms of CO2.
    pub total_emissions: f64,
    /// Total distance in kilometres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_km: f64,
    /// Ordered, contiguous legs, when the plan was assembled from legs.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub legs: Option<Vec<TransportLeg>>,
}

impl TransportPlan {
    /// Build a direct plan travelling `distance_km` with a single mode.
    #[must_use]
    pub fn single_mode(
        distance_km: f64,
        duration_hours: f64,
        mode: &TransportMode,
        cargo_kg: f64,
    ) -> Self {
        let metrics = mode.leg_metrics(distance_km, duration_hours, cargo_kg);
        Self {
            plan_type: PlanType::SingleMode,
            total_time: metrics.time,
            total_cost: metrics.cost,
            total_emissions: metrics.emissions,
            distance_km,
            legs: None,
        }
    }

    /// Build a plan whose totals are the sums of `legs` priced with
    /// `catalog`.
    ///
    /// # Errors
    /// Returns [`PlanError`] when `legs` is empty, not contiguous, or holds a
    /// negative or non-finite distance or duration.
    pub fn from_legs(
        plan_type: PlanType,
        legs: Vec<TransportLeg>,
        catalog: &ModeCatalog,
        cargo_kg: f64,
    ) -> Result<Self, PlanError> {
        validate_legs(&legs)?;
        let (metrics, distance_km) = legs.iter().fold(
            (PlanMetrics::default(), 0.0),
            |(metrics, distance), leg| {
                let leg_metrics = leg.metrics(catalog.get(leg.mode), cargo_kg);
                (metrics + leg_metrics, distance + leg.distance_km)
            },
        );
        Ok(Self {
            plan_type,
            total_time: metrics.time,
            total_cost: metrics.cost,
            total_emissions: metrics.emissions,
            distance_km,
            legs: Some(legs),
        })
    }

    /// The plan totals as [`PlanMetrics`].
    #[must_use]
    pub const fn metrics(&self) -> PlanMetrics {
        PlanMetrics {
            time: self.total_time,
            cost: self.total_cost,
            emissions: self.total_emissions,
        }
    }
}

fn validate_legs(legs: &[TransportLeg]) -> Result<(), PlanError> {
    if legs.is_empty() {
        return Err(PlanError::EmptyLegs);
    }
    for (index, leg) in legs.iter().enumerate() {
        if !is_non_negative(leg.distance_km) || !is_non_negative(leg.duration_hours) {
            return Err(PlanError::InvalidLeg { index });
        }
    }
    for (offset, pair) in legs.windows(2).enumerate() {
        if let [previous, next] = pair {
            if previous.to != next.from {
                return Err(PlanError::Discontiguous {
                    index: offset + 1,
                    previous_to: previous.to.clone(),
                    from: next.from.clone(),
                });
            }
        }
    }
    Ok(())
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
