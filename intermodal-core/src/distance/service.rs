//! Distance-service trait and its request/response types.

use async_trait::async_trait;
use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Location;

use super::error::DistanceServiceError;

/// Vehicle profile requested from the routing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleClass {
    /// Passenger car profile.
    Car,
    /// Heavy goods vehicle profile.
    #[default]
    Truck,
}

/// A point-to-point distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRequest {
    /// Departure coordinate (`x` = longitude, `y` = latitude).
    pub origin: Coord<f64>,
    /// Arrival coordinate (`x` = longitude, `y` = latitude).
    pub destination: Coord<f64>,
    /// Vehicle profile.
    pub vehicle: VehicleClass,
}

impl DistanceRequest {
    /// Build a request between two locations.
    #[must_use]
    pub fn between(origin: &Location, destination: &Location, vehicle: VehicleClass) -> Self {
        Self {
            origin: origin.point().0,
            destination: destination.point().0,
            vehicle,
        }
    }
}

/// Distance and duration of travel between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteFacts {
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Duration in hours.
    pub duration_hours: f64,
}

/// Fetch road distance and duration between two coordinates.
///
/// Implementations perform I/O and may suspend the calling task. They must
/// be shareable across tasks so a single resolver can serve concurrent
/// callers.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use intermodal_core::{DistanceRequest, DistanceService, DistanceServiceError, RouteFacts};
///
/// struct FixedService;
///
/// #[async_trait]
/// impl DistanceService for FixedService {
///     async fn distance(
///         &self,
///         _request: &DistanceRequest,
///     ) -> Result<RouteFacts, DistanceServiceError> {
///         Ok(RouteFacts {
///             distance_km: 10.0,
///             duration_hours: 0.25,
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait DistanceService: Send + Sync {
    /// Return the distance and duration for `request`.
    async fn distance(&self, request: &DistanceRequest)
    -> Result<RouteFacts, DistanceServiceError>;
}
