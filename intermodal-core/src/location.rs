//! Geographic locations referenced by transport plans.

use geo::{Distance, Haversine, Point};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const METRES_PER_KILOMETRE: f64 = 1000.0;

/// Classification of a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationKind {
    /// An inland city served by road.
    City,
    /// A sea port served by vessel links.
    Port,
}

/// A named place with a latitude/longitude position.
///
/// Locations are loaded once by the dataset owner and referenced by id
/// everywhere else. Construction does not validate coordinates; the resolver
/// calls [`Location::validate_coordinates`] before any lookup.
///
/// # Examples
///
/// ```
/// use intermodal_core::{Location, LocationKind};
///
/// let hamburg = Location::new("HAM", "Hamburg", 53.55, 9.99, LocationKind::Port);
/// assert!(hamburg.validate_coordinates().is_ok());
/// assert!(hamburg.is_port());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// City or port.
    pub kind: LocationKind,
}

/// Returned when a location's coordinates fall outside the valid ranges.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("location {id} has invalid coordinates ({latitude}, {longitude})")]
pub struct InvalidCoordinates {
    /// Identifier of the offending location.
    pub id: String,
    /// Latitude as supplied.
    pub latitude: f64,
    /// Longitude as supplied.
    pub longitude: f64,
}

impl Location {
    /// Construct a location.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        kind: LocationKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            kind,
        }
    }

    /// Report whether this location is a port.
    #[must_use]
    pub fn is_port(&self) -> bool {
        self.kind == LocationKind::Port
    }

    /// Check that latitude lies in `[-90, 90]` and longitude in `[-180, 180]`.
    ///
    /// # Errors
    /// Returns [`InvalidCoordinates`] when either value is out of range or
    /// not finite.
    pub fn validate_coordinates(&self) -> Result<(), InvalidCoordinates> {
        let latitude_ok = (-90.0..=90.0).contains(&self.latitude);
        let longitude_ok = (-180.0..=180.0).contains(&self.longitude);
        if latitude_ok && longitude_ok {
            Ok(())
        } else {
            Err(InvalidCoordinates {
                id: self.id.clone(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Position as a `geo` point (`x` = longitude, `y` = latitude).
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn haversine_km(&self, other: &Self) -> f64 {
        Haversine.distance(self.point(), other.point()) / METRES_PER_KILOMETRE
    }
}
