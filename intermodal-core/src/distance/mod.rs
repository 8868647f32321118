//! Resolve point-to-point distance and duration through an external service.
//!
//! The [`DistanceService`] trait abstracts the geospatial routing backend.
//! Callers supply a [`DistanceRequest`] holding two coordinates and a
//! [`VehicleClass`] and receive [`RouteFacts`] in kilometres and hours.
//!
//! Failures are classified by [`DistanceServiceError`] so that callers can
//! decide which ones are worth retrying.

mod error;
mod service;

pub use error::DistanceServiceError;
pub use service::{DistanceRequest, DistanceService, RouteFacts, VehicleClass};
