//! Error types raised while scoring candidate plans.

use intermodal_core::Criterion;
use thiserror::Error;

/// Errors raised by [`ScoreOptimizer`](crate::ScoreOptimizer) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// No plans were supplied.
    #[error("at least one candidate plan is required")]
    NoCandidates,
    /// A plan carries a negative or non-finite metric.
    #[error("plan {index} has invalid {criterion} value {value}")]
    InvalidMetric {
        /// Position of the plan in the input.
        index: usize,
        /// Offending metric.
        criterion: Criterion,
        /// Value found on the plan.
        value: f64,
    },
    /// The cargo mass is negative or non-finite.
    #[error("cargo mass {value} kg is invalid")]
    InvalidCargoMass {
        /// Value supplied by the caller.
        value: f64,
    },
}
