//! Distance and route resolution for the intermodal engine.
//!
//! Responsibilities:
//! - Resolve point-to-point distance and duration through a
//!   [`DistanceService`](intermodal_core::DistanceService).
//! - Own the result cache, the request token bucket and the retry loop.
//! - Compose multi-modal and waypoint itineraries from resolved legs.
//! - Provide an HTTP adapter for the OSRM Route API.
//!
//! Boundaries:
//! - Do not score or rank plans (lives in `intermodal-scorer`).
//! - Do not load datasets or resolve location names.
//!
//! Invariants:
//! - Cache and bucket state are mutex-guarded; no guard is held across an
//!   await point.
//! - Coordinates are validated before any cache lookup or I/O.

#![forbid(unsafe_code)]

mod osrm;
mod planning;
mod provider;
mod resolver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use planning::{WaypointRoute, find_nearest_port};
pub use provider::{
    DEFAULT_USER_AGENT, HttpDistanceService, HttpDistanceServiceConfig, ProviderBuildError,
};
pub use resolver::{RateLimitConfig, ResolveError, ResolveOptions, ResolverConfig, RouteResolver};
