//! OSRM API response types for the Route service.
//!
//! The Route API finds the fastest route between the supplied coordinates.
//! Only the summary fields of each route are deserialised; geometry and
//! step details are not requested.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// The `code` field indicates the response status. On success `routes`
/// holds one or more alternatives, fastest first.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes. Absent on error responses.
    #[serde(default)]
    pub routes: Option<Vec<RouteSummary>>,
}

/// Summary of a single OSRM route.
#[derive(Debug, Deserialize)]
pub struct RouteSummary {
    /// Route length in metres.
    pub distance: Option<f64>,
    /// Travel time in seconds.
    pub duration: Option<f64>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the failure means no route exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.code.as_str(), "NoRoute" | "NoSegment")
    }

    /// The fastest route, if any.
    #[must_use]
    pub fn first_route(&self) -> Option<&RouteSummary> {
        self.routes.as_deref().and_then(<[RouteSummary]>::first)
    }
}
