//! Facade crate for the intermodal comparison engine.
//!
//! This crate re-exports the core domain types and exposes the route resolver
//! and the score optimizer behind the `routing` and `scorer` feature flags.

#![forbid(unsafe_code)]

pub use intermodal_core::{
    Criterion, DistanceRequest, DistanceService, DistanceServiceError, InvalidCoordinates,
    Location, LocationKind, ModeCatalog, ModeId, PlanError, PlanMetrics, PlanType, PortLink,
    RouteFacts, TransportLeg, TransportMode, TransportPlan, VehicleClass, WeightFactors,
    find_port_link,
};

#[cfg(feature = "routing")]
pub use intermodal_routing::{
    DEFAULT_USER_AGENT, HttpDistanceService, HttpDistanceServiceConfig, ProviderBuildError,
    RateLimitConfig, ResolveError, ResolveOptions, ResolverConfig, RouteResolver, WaypointRoute,
    find_nearest_port,
};

#[cfg(feature = "scorer")]
pub use intermodal_scorer::{
    CandidateScore, ComparisonResult, Direction, DominantFactor, LoadCurve, LoadCurves,
    NormalisationMethod, OptimizerConfig, OptimizerError, OverrideThresholds,
    ParseNormalisationMethodError, PercentageDifferences, PlanComparison, PlanFactors, Rationale,
    Recommendation, RecommendationReason, RequestMetadata, ResultMetadata, ScoreBreakdown,
    ScoreOptimizer, SensitivityReport, SensitivityThreshold, candidate_keys, normalise_metrics,
    normalise_weights,
};

/// Deterministic distance services and fixtures for tests.
///
/// Gathers the core fixtures and, with the `routing` feature, the scripted
/// stub service from the resolver crate.
#[cfg(feature = "test-support")]
pub mod test_support {
    pub use intermodal_core::test_support::*;
    #[cfg(feature = "routing")]
    pub use intermodal_routing::test_support::*;
}
