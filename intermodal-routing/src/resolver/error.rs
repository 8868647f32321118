//! Errors surfaced by the route resolver.

use intermodal_core::{DistanceServiceError, InvalidCoordinates};
use thiserror::Error;

/// Failures from [`RouteResolver`](super::RouteResolver) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A location's coordinates are outside the valid range.
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
    /// The distance service answered but the payload was unusable.
    #[error("distance service returned an unusable response: {message}")]
    ServiceError {
        /// Description of the defect.
        message: String,
    },
    /// The distance service could not be reached or refused the request.
    #[error("distance service unavailable after {attempts} attempt(s)")]
    ServiceUnavailable {
        /// Number of attempts made.
        attempts: u32,
        /// Failure of the last attempt.
        #[source]
        source: DistanceServiceError,
    },
    /// The supplied port link does not join the selected ports.
    #[error("port link does not connect {origin_port} and {destination_port}")]
    PortLinkMismatch {
        /// Port nearest the origin.
        origin_port: String,
        /// Port nearest the destination.
        destination_port: String,
    },
}

impl ResolveError {
    /// Map the final service failure of a resolve to a resolver error.
    pub(crate) fn from_service(source: DistanceServiceError, attempts: u32) -> Self {
        match source {
            DistanceServiceError::MalformedPayload { message } => Self::ServiceError { message },
            other => Self::ServiceUnavailable {
                attempts,
                source: other,
            },
        }
    }
}
