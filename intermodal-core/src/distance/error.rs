//! Failure modes reported by distance backends.

use thiserror::Error;

/// Errors from [`crate::distance::DistanceService::distance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceServiceError {
    /// The request did not complete within the configured timeout.
    ///
    /// This is the only transient failure; resolvers retry it.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service found no route between the coordinates.
    #[error("no route found ({code}): {message}")]
    NotFound {
        /// Service status code.
        code: String,
        /// Service message.
        message: String,
    },
    /// The service rejected the request as malformed.
    #[error("request rejected ({code}): {message}")]
    Rejected {
        /// Service status code.
        code: String,
        /// Service message.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed below the HTTP layer.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response lacked a usable distance or duration.
    #[error("malformed response: {message}")]
    MalformedPayload {
        /// What was missing or unusable.
        message: String,
    },
}

impl DistanceServiceError {
    /// Report whether a retry may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
