//! Precomputed vessel connections between ports.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scheduled vessel connection between two ports.
///
/// Links are stored with an arbitrary orientation; [`PortLink::connects`]
/// matches either direction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortLink {
    /// Identifier of one end of the link.
    pub port_a: String,
    /// Identifier of the other end.
    pub port_b: String,
    /// Sailing distance in kilometres.
    pub distance_km: f64,
    /// Sailing time in hours.
    pub duration_hours: f64,
    /// Operating shipping line.
    pub operator: String,
    /// Departures per week.
    pub weekly_frequency: u32,
}

impl PortLink {
    /// Report whether the link joins `from` and `to`, in either orientation.
    #[must_use]
    pub fn connects(&self, from: &str, to: &str) -> bool {
        (self.port_a == from && self.port_b == to) || (self.port_a == to && self.port_b == from)
    }
}

/// Return the first link in `links` joining `from` and `to`.
///
/// # Examples
///
/// ```
/// use intermodal_core::{PortLink, find_port_link};
///
/// let links = vec![PortLink {
///     port_a: "RTM".into(),
///     port_b: "HAM".into(),
///     distance_km: 410.0,
///     duration_hours: 22.0,
///     operator: "North Sea Lines".into(),
///     weekly_frequency: 3,
/// }];
/// assert!(find_port_link(&links, "HAM", "RTM").is_some());
/// assert!(find_port_link(&links, "HAM", "ANR").is_none());
/// ```
#[must_use]
pub fn find_port_link<'a>(links: &'a [PortLink], from: &str, to: &str) -> Option<&'a PortLink> {
    links.iter().find(|link| link.connects(from, to))
}
