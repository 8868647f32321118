//! Test-only doubles and fixtures shared by unit and behaviour tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use geo::{Distance, Haversine, Point};

use crate::{
    DistanceRequest, DistanceService, DistanceServiceError, Location, LocationKind, ModeCatalog,
    ModeId, RouteFacts, TransportMode,
};

/// Deterministic `DistanceService` returning great-circle distances.
///
/// Durations assume a constant speed. Every call is counted so tests can
/// assert how often the backend was reached.
#[derive(Debug, Default)]
pub struct StraightLineDistanceService {
    speed_kmh: f64,
    calls: AtomicUsize,
}

impl StraightLineDistanceService {
    /// Create a service travelling at `speed_kmh`.
    #[must_use]
    pub const fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceService for StraightLineDistanceService {
    async fn distance(
        &self,
        request: &DistanceRequest,
    ) -> Result<RouteFacts, DistanceServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let metres = Haversine.distance(Point(request.origin), Point(request.destination));
        let distance_km = metres / 1000.0;
        Ok(RouteFacts {
            distance_km,
            duration_hours: distance_km / self.speed_kmh,
        })
    }
}

/// Truck and ship definitions used across the test suites.
///
/// Truck: 50 per km, 0.1 kg CO2 per tonne-km. Ship: 20 per km, 0.015 kg CO2
/// per tonne-km.
#[must_use]
pub const fn sample_catalog() -> ModeCatalog {
    ModeCatalog::new(
        TransportMode {
            id: ModeId::Truck,
            cost_per_km: 50.0,
            emission_per_tonne_km: 0.1,
            average_speed_kmh: 80.0,
        },
        TransportMode {
            id: ModeId::Ship,
            cost_per_km: 20.0,
            emission_per_tonne_km: 0.015,
            average_speed_kmh: 30.0,
        },
    )
}

/// A small Benelux/North Sea network: three cities and three ports.
#[must_use]
pub fn sample_locations() -> Vec<Location> {
    vec![
        Location::new("AMS", "Amsterdam", 52.3676, 4.9041, LocationKind::City),
        Location::new("BRE", "Bremen", 53.0793, 8.8017, LocationKind::City),
        Location::new("BRU", "Brussels", 50.8503, 4.3517, LocationKind::City),
        Location::new("RTM", "Rotterdam", 51.9490, 4.1420, LocationKind::Port),
        Location::new("ANR", "Antwerp", 51.2637, 4.3980, LocationKind::Port),
        Location::new("BRV", "Bremerhaven", 53.5396, 8.5809, LocationKind::Port),
    ]
}
