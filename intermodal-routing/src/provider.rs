//! HTTP-based `DistanceService` using OSRM's Route API.
//!
//! This module provides [`HttpDistanceService`], an implementation of the
//! [`DistanceService`] trait that fetches road distance and duration for a
//! coordinate pair from an OSRM routing service via HTTP.
//!
//! # Example
//!
//! ```no_run
//! use intermodal_core::{DistanceRequest, DistanceService, Location, LocationKind, VehicleClass};
//! use intermodal_routing::HttpDistanceService;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpDistanceService::new("http://localhost:5000")?;
//! let origin = Location::new("AMS", "Amsterdam", 52.37, 4.90, LocationKind::City);
//! let destination = Location::new("BRU", "Brussels", 50.85, 4.35, LocationKind::City);
//!
//! let facts = service
//!     .distance(&DistanceRequest::between(&origin, &destination, VehicleClass::Truck))
//!     .await?;
//! println!("{} km", facts.distance_km);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use intermodal_core::{
    DistanceRequest, DistanceService, DistanceServiceError, RouteFacts, VehicleClass,
};
use reqwest::Client;
use url::Url;

use crate::osrm::RouteResponse;

const METRES_PER_KILOMETRE: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Error type for [`HttpDistanceService`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL could not be parsed.
    InvalidBaseUrl(url::ParseError),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(err) => write!(f, "invalid routing service URL: {err}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl(err) => Some(err),
            Self::HttpClient(err) => Some(err),
        }
    }
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "intermodal-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// OSRM profile used when none is configured for a vehicle class.
const DEFAULT_PROFILE: &str = "driving";

/// Configuration for [`HttpDistanceService`].
#[derive(Debug, Clone)]
pub struct HttpDistanceServiceConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// OSRM profile for [`VehicleClass::Car`].
    pub car_profile: String,
    /// OSRM profile for [`VehicleClass::Truck`].
    pub truck_profile: String,
}

impl Default for HttpDistanceServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            car_profile: DEFAULT_PROFILE.to_owned(),
            truck_profile: DEFAULT_PROFILE.to_owned(),
        }
    }
}

impl HttpDistanceServiceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the OSRM profile used for `vehicle`.
    #[must_use]
    pub fn with_profile(mut self, vehicle: VehicleClass, profile: impl Into<String>) -> Self {
        match vehicle {
            VehicleClass::Car => self.car_profile = profile.into(),
            VehicleClass::Truck => self.truck_profile = profile.into(),
        }
        self
    }

    fn profile(&self, vehicle: VehicleClass) -> &str {
        match vehicle {
            VehicleClass::Car => &self.car_profile,
            VehicleClass::Truck => &self.truck_profile,
        }
    }
}

/// HTTP-based distance service using the OSRM Route API.
///
/// Each call issues exactly one request; caching, rate limiting and retries
/// are the resolver's job.
#[derive(Debug)]
pub struct HttpDistanceService {
    client: Client,
    config: HttpDistanceServiceConfig,
}

impl HttpDistanceService {
    /// Create a new service with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDistanceServiceConfig::new(base_url))
    }

    /// Create a new service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpDistanceServiceConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(ProviderBuildError::InvalidBaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Build the OSRM Route API URL for `request`.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=false`.
    fn build_route_url(&self, request: &DistanceRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile(request.vehicle),
            request.origin.x,
            request.origin.y,
            request.destination.x,
            request.destination.y,
        )
    }

    /// Convert a reqwest error to a `DistanceServiceError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DistanceServiceError {
        if error.is_timeout() {
            return DistanceServiceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DistanceServiceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DistanceServiceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response to `RouteFacts`.
///
/// A success code without a usable distance and duration is reported as
/// [`DistanceServiceError::MalformedPayload`].
fn convert_response(response: RouteResponse) -> Result<RouteFacts, DistanceServiceError> {
    if !response.is_ok() {
        let message = response.message.clone().unwrap_or_default();
        return Err(if response.is_not_found() {
            DistanceServiceError::NotFound {
                code: response.code,
                message,
            }
        } else {
            DistanceServiceError::Rejected {
                code: response.code,
                message,
            }
        });
    }

    let route = response
        .first_route()
        .ok_or_else(|| DistanceServiceError::MalformedPayload {
            message: "OSRM response contains no routes".to_owned(),
        })?;
    let metres = usable(route.distance, "distance")?;
    let seconds = usable(route.duration, "duration")?;

    Ok(RouteFacts {
        distance_km: metres / METRES_PER_KILOMETRE,
        duration_hours: seconds / SECONDS_PER_HOUR,
    })
}

fn usable(value: Option<f64>, field: &str) -> Result<f64, DistanceServiceError> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| DistanceServiceError::MalformedPayload {
            message: format!("OSRM route is missing a valid {field}"),
        })
}

#[async_trait]
impl DistanceService for HttpDistanceService {
    async fn distance(
        &self,
        request: &DistanceRequest,
    ) -> Result<RouteFacts, DistanceServiceError> {
        let url = self.build_route_url(request);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        // OSRM answers NoRoute/InvalidQuery with a 400 and a JSON body, so the
        // body is parsed before the status is considered.
        let status = response.status();
        let parsed: Result<RouteResponse, _> = response.json().await;
        match parsed {
            Ok(body) => convert_response(body),
            Err(_) if !status.is_success() => Err(DistanceServiceError::Http {
                url,
                status: status.as_u16(),
                message: status.to_string(),
            }),
            Err(err) if err.is_timeout() => Err(self.convert_reqwest_error(&err, &url)),
            Err(err) => Err(DistanceServiceError::MalformedPayload {
                message: err.to_string(),
            }),
        }
    }
}
