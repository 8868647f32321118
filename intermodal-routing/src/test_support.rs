//! Test utilities for the route resolver.
//!
//! This module provides [`StubDistanceService`], a deterministic test double
//! for [`DistanceService`] that returns pre-configured responses without
//! making HTTP requests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use intermodal_core::{DistanceRequest, DistanceService, DistanceServiceError, RouteFacts};

type StubResponse = Result<RouteFacts, DistanceServiceError>;

/// Stub `DistanceService` for testing.
///
/// Scripted responses are served first, in order; once they run out every
/// call gets the fallback response. Calls are counted.
///
/// # Example
///
/// ```
/// use intermodal_core::{DistanceRequest, DistanceService, DistanceServiceError, RouteFacts};
/// use intermodal_routing::test_support::StubDistanceService;
/// use geo::Coord;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let facts = RouteFacts { distance_km: 12.0, duration_hours: 0.3 };
/// let timeout = DistanceServiceError::Timeout { url: "stub".into(), timeout_secs: 1 };
/// let service = StubDistanceService::with_facts(facts).with_script([Err(timeout)]);
///
/// let request = DistanceRequest {
///     origin: Coord { x: 0.0, y: 0.0 },
///     destination: Coord { x: 1.0, y: 1.0 },
///     vehicle: Default::default(),
/// };
/// assert!(service.distance(&request).await.is_err());
/// assert_eq!(service.distance(&request).await, Ok(facts));
/// assert_eq!(service.calls(), 2);
/// # }
/// ```
#[derive(Debug)]
pub struct StubDistanceService {
    script: Mutex<VecDeque<StubResponse>>,
    fallback: StubResponse,
    calls: AtomicUsize,
}

impl StubDistanceService {
    /// Create a service that always returns `facts`.
    #[must_use]
    pub fn with_facts(facts: RouteFacts) -> Self {
        Self::with_fallback(Ok(facts))
    }

    /// Create a service that always returns `error`.
    #[must_use]
    pub fn with_error(error: DistanceServiceError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: StubResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Serve `responses` before falling back.
    #[must_use]
    pub fn with_script(self, responses: impl IntoIterator<Item = StubResponse>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(responses);
        self
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceService for StubDistanceService {
    async fn distance(&self, _request: &DistanceRequest) -> StubResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

/// A timeout failure, the only kind the resolver retries.
#[must_use]
pub fn timeout_error() -> DistanceServiceError {
    DistanceServiceError::Timeout {
        url: "http://stub/route".to_owned(),
        timeout_secs: 1,
    }
}
