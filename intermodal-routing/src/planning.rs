//! Itinerary composition on top of [`RouteResolver`].

use intermodal_core::{
    DistanceService, InvalidCoordinates, Location, ModeId, PortLink, TransportLeg,
};
use serde::{Deserialize, Serialize};

use crate::{ResolveError, ResolveOptions, RouteResolver};

/// Legs and totals of a route through intermediate stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRoute {
    /// One road leg per consecutive pair of stops.
    pub legs: Vec<TransportLeg>,
    /// Sum of leg distances in kilometres.
    pub total_distance_km: f64,
    /// Sum of leg durations in hours.
    pub total_duration_hours: f64,
}

/// Port closest to `location` by great-circle distance.
///
/// Only port-classified entries of `candidates` are considered; ports with
/// invalid coordinates are skipped. Equidistant ports resolve to the lowest
/// id. Returns `Ok(None)` when no usable port exists.
///
/// # Errors
/// Returns [`InvalidCoordinates`] when `location` itself is out of range.
///
/// # Examples
///
/// ```
/// use intermodal_core::{Location, LocationKind};
/// use intermodal_routing::find_nearest_port;
///
/// let ams = Location::new("AMS", "Amsterdam", 52.37, 4.90, LocationKind::City);
/// let ports = vec![
///     Location::new("RTM", "Rotterdam", 51.95, 4.14, LocationKind::Port),
///     Location::new("HAM", "Hamburg", 53.55, 9.99, LocationKind::Port),
/// ];
///
/// let nearest = find_nearest_port(&ams, &ports).unwrap();
/// assert_eq!(nearest.map(|p| p.id.as_str()), Some("RTM"));
/// ```
pub fn find_nearest_port<'a>(
    location: &Location,
    candidates: &'a [Location],
) -> Result<Option<&'a Location>, InvalidCoordinates> {
    location.validate_coordinates()?;

    let nearest = candidates
        .iter()
        .filter(|candidate| candidate.is_port())
        .filter(|port| match port.validate_coordinates() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("skipping port in nearest-port search: {err}");
                false
            }
        })
        .map(|port| (location.haversine_km(port), port))
        .min_by(|(a_km, a), (b_km, b)| a_km.total_cmp(b_km).then_with(|| a.id.cmp(&b.id)))
        .map(|(_, port)| port);
    Ok(nearest)
}

impl<S: DistanceService> RouteResolver<S> {
    /// Road, vessel, road: the three legs of a multi-modal itinerary.
    ///
    /// The road legs are resolved concurrently through
    /// [`resolve_direct`](Self::resolve_direct); the vessel leg copies the
    /// distance and duration of `port_link`.
    ///
    /// # Errors
    /// Returns [`ResolveError::PortLinkMismatch`] when `port_link` does not
    /// join the two ports, or any error from resolving the road legs.
    pub async fn plan_multi_modal(
        &self,
        origin: &Location,
        destination: &Location,
        origin_port: &Location,
        destination_port: &Location,
        port_link: &PortLink,
    ) -> Result<[TransportLeg; 3], ResolveError> {
        if !port_link.connects(&origin_port.id, &destination_port.id) {
            return Err(ResolveError::PortLinkMismatch {
                origin_port: origin_port.id.clone(),
                destination_port: destination_port.id.clone(),
            });
        }

        let (first_mile, last_mile) = tokio::try_join!(
            self.resolve_direct(origin, origin_port, ResolveOptions::new()),
            self.resolve_direct(destination_port, destination, ResolveOptions::new()),
        )?;

        Ok([
            TransportLeg {
                from: origin.id.clone(),
                to: origin_port.id.clone(),
                mode: ModeId::Truck,
                distance_km: first_mile.distance_km,
                duration_hours: first_mile.duration_hours,
            },
            TransportLeg {
                from: origin_port.id.clone(),
                to: destination_port.id.clone(),
                mode: ModeId::Ship,
                distance_km: port_link.distance_km,
                duration_hours: port_link.duration_hours,
            },
            TransportLeg {
                from: destination_port.id.clone(),
                to: destination.id.clone(),
                mode: ModeId::Truck,
                distance_km: last_mile.distance_km,
                duration_hours: last_mile.duration_hours,
            },
        ])
    }

    /// Road route from `origin` through `waypoints` to `destination`.
    ///
    /// Each consecutive pair is resolved in turn and the totals are the sums
    /// of the legs.
    ///
    /// # Errors
    /// Returns the first error from resolving a leg.
    pub async fn plan_with_waypoints(
        &self,
        origin: &Location,
        destination: &Location,
        waypoints: &[Location],
    ) -> Result<WaypointRoute, ResolveError> {
        let stops: Vec<&Location> = std::iter::once(origin)
            .chain(waypoints)
            .chain(std::iter::once(destination))
            .collect();

        let mut route = WaypointRoute {
            legs: Vec::with_capacity(stops.len().saturating_sub(1)),
            total_distance_km: 0.0,
            total_duration_hours: 0.0,
        };
        for pair in stops.windows(2) {
            let [from, to] = pair else { continue };
            let facts = self.resolve_direct(from, to, ResolveOptions::new()).await?;
            route.total_distance_km += facts.distance_km;
            route.total_duration_hours += facts.duration_hours;
            route.legs.push(TransportLeg {
                from: from.id.clone(),
                to: to.id.clone(),
                mode: ModeId::Truck,
                distance_km: facts.distance_km,
                duration_hours: facts.duration_hours,
            });
        }
        Ok(route)
    }
}
