//! Multi-criteria comparison of candidate transport plans.
//!
//! The crate ranks single-mode and multi-modal [`TransportPlan`]s against
//! caller-supplied importance weights over travel time, cost, and emissions:
//! - **Scoring** normalises the weights to sum to one, rescales each
//!   criterion across the candidates (min-max or z-score), and sums the
//!   weighted values. Lower scores are better.
//! - **Overrides** force a recommendation ahead of scoring when the weights
//!   are extreme: a heavy, emissions-weighted shipment goes multi-modal when
//!   that plan is much cleaner, and a time-weighted one goes single-mode
//!   when that plan is much faster. The thresholds live in
//!   [`OverrideThresholds`].
//! - **Explainability** decomposes scores per criterion, names the dominant
//!   factors, and finds the weight at which the recommendation flips.
//!
//! Every operation is a pure function of its inputs and the
//! [`OptimizerConfig`] given at construction.
//!
//! # Examples
//!
//! ```
//! use intermodal_core::{PlanType, TransportPlan, WeightFactors};
//! use intermodal_scorer::{RecommendationReason, RequestMetadata, ScoreOptimizer};
//!
//! let plan = |plan_type, time, cost, emissions| TransportPlan {
//!     plan_type,
//!     total_time: time,
//!     total_cost: cost,
//!     total_emissions: emissions,
//!     distance_km: 0.0,
//!     legs: None,
//! };
//! let plans = [
//!     plan(PlanType::SingleMode, 6.0, 20_000.0, 100.0),
//!     plan(PlanType::MultiModal, 30.0, 10_000.0, 20.0),
//! ];
//! let request = RequestMetadata {
//!     cargo_mass_kg: Some(6_000.0),
//!     ..RequestMetadata::default()
//! };
//!
//! let result = ScoreOptimizer::new()
//!     .generate_comparison_result(&plans, WeightFactors::new(0.1, 0.2, 0.7), request)
//!     .expect("valid plans");
//! assert_eq!(result.recommendation.key, "multi-modal");
//! ```
//!
//! [`TransportPlan`]: intermodal_core::TransportPlan

#![forbid(unsafe_code)]

mod config;
mod error;
mod explain;
mod normalise;
mod optimizer;
mod overrides;
mod result;
mod sensitivity;

pub use config::{
    LoadCurve, LoadCurves, NormalisationMethod, OptimizerConfig, OverrideThresholds,
    ParseNormalisationMethodError,
};
pub use error::OptimizerError;
pub use explain::{DominantFactor, PlanFactors, ScoreBreakdown};
pub use normalise::{normalise_metrics, normalise_weights};
pub use optimizer::{CandidateScore, PlanComparison, ScoreOptimizer, candidate_keys};
pub use overrides::RecommendationReason;
pub use result::{
    ComparisonResult, PercentageDifferences, Rationale, Recommendation, RequestMetadata,
    ResultMetadata,
};
pub use sensitivity::{Direction, SensitivityReport, SensitivityThreshold};
