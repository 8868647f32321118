//! Cached, rate-limited, retrying access to a [`DistanceService`].
//!
//! A [`RouteResolver`] owns one cache and one token bucket. Tasks share a
//! resolver through an `Arc`, so every caller draws from the same request
//! budget.

mod cache;
mod error;
mod limiter;

use std::time::Duration;

use intermodal_core::{DistanceRequest, DistanceService, Location, RouteFacts, VehicleClass};
use tokio::time::sleep;

use cache::RouteCache;
use limiter::TokenBucket;

pub use error::ResolveError;
pub use limiter::RateLimitConfig;

/// Upper bound on the backoff doubling exponent.
const MAX_BACKOFF_SHIFT: u32 = 16;

/// Tuning for a [`RouteResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Token bucket shared by all calls.
    pub rate_limit: RateLimitConfig,
    /// Total attempts per resolve, including the first. Values below one are
    /// treated as one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub retry_backoff: Duration,
    /// Drop the whole cache once this long has passed since the last clear.
    pub cache_expiry: Option<Duration>,
    /// Vehicle profile requested from the service.
    pub vehicle: VehicleClass,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            max_attempts: 3,
            retry_backoff: Duration::from_millis(200),
            cache_expiry: None,
            vehicle: VehicleClass::Truck,
        }
    }
}

impl ResolverConfig {
    /// Set the token bucket configuration.
    #[must_use]
    pub const fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the total number of attempts per resolve.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the initial retry delay.
    #[must_use]
    pub const fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Enable blanket cache expiry.
    #[must_use]
    pub const fn with_cache_expiry(mut self, expiry: Duration) -> Self {
        self.cache_expiry = Some(expiry);
        self
    }

    /// Set the vehicle profile.
    #[must_use]
    pub const fn with_vehicle(mut self, vehicle: VehicleClass) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Delay before retry number `retry` (1-based).
    fn backoff_for(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.retry_backoff.saturating_mul(1_u32 << shift)
    }
}

/// Per-call options for [`RouteResolver::resolve_direct`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip the cache for both lookup and store.
    pub bypass_cache: bool,
}

impl ResolveOptions {
    /// Options that use the cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bypass_cache: false,
        }
    }

    /// Skip the cache, e.g. when exploring alternative routes.
    #[must_use]
    pub const fn bypass_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }
}

/// Resolves distance and duration between locations.
///
/// # Examples
///
/// ```
/// use intermodal_core::{Location, LocationKind};
/// use intermodal_core::test_support::StraightLineDistanceService;
/// use intermodal_routing::{ResolveOptions, RouteResolver};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), intermodal_routing::ResolveError> {
/// let resolver = RouteResolver::new(StraightLineDistanceService::new(60.0));
/// let ams = Location::new("AMS", "Amsterdam", 52.37, 4.90, LocationKind::City);
/// let rtm = Location::new("RTM", "Rotterdam", 51.95, 4.14, LocationKind::Port);
///
/// let facts = resolver.resolve_direct(&ams, &rtm, ResolveOptions::new()).await?;
/// assert!(facts.distance_km > 50.0);
/// assert_eq!(resolver.cached_entries(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouteResolver<S> {
    service: S,
    config: ResolverConfig,
    cache: RouteCache,
    bucket: TokenBucket,
}

impl<S: DistanceService> RouteResolver<S> {
    /// Create a resolver with the default configuration.
    pub fn new(service: S) -> Self {
        Self::with_config(service, ResolverConfig::default())
    }

    /// Create a resolver with explicit configuration.
    pub fn with_config(service: S, config: ResolverConfig) -> Self {
        Self {
            cache: RouteCache::new(config.cache_expiry),
            bucket: TokenBucket::new(config.rate_limit),
            service,
            config,
        }
    }

    /// The wrapped distance service.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// The active configuration.
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Distance and duration from `origin` to `destination`.
    ///
    /// Coordinates are validated before the cache is consulted. A cache hit
    /// performs no I/O. A miss takes one token per attempt and retries only
    /// timeouts, up to [`ResolverConfig::max_attempts`].
    ///
    /// # Errors
    /// - [`ResolveError::InvalidCoordinates`] for out-of-range coordinates.
    /// - [`ResolveError::ServiceError`] when the response lacks a usable
    ///   distance or duration.
    /// - [`ResolveError::ServiceUnavailable`] when the service fails, after
    ///   retries for timeouts.
    pub async fn resolve_direct(
        &self,
        origin: &Location,
        destination: &Location,
        options: ResolveOptions,
    ) -> Result<RouteFacts, ResolveError> {
        origin.validate_coordinates()?;
        destination.validate_coordinates()?;

        if !options.bypass_cache {
            if let Some(facts) = self.cache.get(&origin.id, &destination.id) {
                log::debug!("cache hit for {} -> {}", origin.id, destination.id);
                return Ok(facts);
            }
            log::debug!("cache miss for {} -> {}", origin.id, destination.id);
        }

        let request = DistanceRequest::between(origin, destination, self.config.vehicle);
        let facts = self.fetch_with_retry(&request).await?;

        if !options.bypass_cache {
            self.cache.insert(&origin.id, &destination.id, facts);
        }
        Ok(facts)
    }

    async fn fetch_with_retry(
        &self,
        request: &DistanceRequest,
    ) -> Result<RouteFacts, ResolveError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            self.bucket.acquire().await;
            match self.service.distance(request).await {
                Ok(facts) => return check_facts(facts),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.config.backoff_for(attempt);
                    log::warn!(
                        "attempt {attempt}/{max_attempts} failed: {err}; retrying in {delay:?}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(ResolveError::from_service(err, attempt)),
            }
        }
    }

    /// Drop every cached pair.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached pairs.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

fn check_facts(facts: RouteFacts) -> Result<RouteFacts, ResolveError> {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    if usable(facts.distance_km) && usable(facts.duration_hours) {
        Ok(facts)
    } else {
        Err(ResolveError::ServiceError {
            message: format!(
                "unusable distance {} km or duration {} h",
                facts.distance_km, facts.duration_hours
            ),
        })
    }
}
