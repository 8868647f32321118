//! Core domain types for the intermodal comparison engine.
//!
//! These models are the data contracts shared by the route resolver and the
//! score optimizer. Constructors that assemble derived values (plans built
//! from legs, validated coordinates) return `Result` to surface invalid input
//! early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod location;
mod mode;
mod plan;
mod port_link;
mod weights;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{
    DistanceRequest, DistanceService, DistanceServiceError, RouteFacts, VehicleClass,
};
pub use location::{InvalidCoordinates, Location, LocationKind};
pub use mode::{ModeCatalog, ModeId, TransportMode};
pub use plan::{PlanError, PlanMetrics, PlanType, TransportLeg, TransportPlan};
pub use port_link::{PortLink, find_port_link};
pub use weights::{Criterion, WeightFactors};
