//! Transport modes and their per-distance cost and emission factors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::PlanMetrics;

const KILOGRAMS_PER_TONNE: f64 = 1000.0;

/// Identifier of a transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModeId {
    /// Road vehicle; used for single-mode plans and the road legs of
    /// multi-modal plans.
    Truck,
    /// Vessel sailing a port-to-port link.
    Ship,
}

impl ModeId {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truck => "truck",
            Self::Ship => "ship",
        }
    }
}

/// Static per-mode configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransportMode {
    /// Mode identifier.
    pub id: ModeId,
    /// Cost per kilometre travelled.
    pub cost_per_km: f64,
    /// Kilograms of CO2 per tonne of cargo per kilometre.
    pub emission_per_tonne_km: f64,
    /// Average speed in kilometres per hour.
    pub average_speed_kmh: f64,
}

impl TransportMode {
    /// Metrics for travelling `distance_km` in `duration_hours` carrying
    /// `cargo_kg`.
    ///
    /// # Examples
    ///
    /// ```
    /// use intermodal_core::{ModeId, TransportMode};
    ///
    /// let truck = TransportMode {
    ///     id: ModeId::Truck,
    ///     cost_per_km: 50.0,
    ///     emission_per_tonne_km: 0.1,
    ///     average_speed_kmh: 80.0,
    /// };
    /// let metrics = truck.leg_metrics(520.0, 6.5, 500.0);
    /// assert_eq!(metrics.cost, 26_000.0);
    /// assert!((metrics.emissions - 26.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn leg_metrics(&self, distance_km: f64, duration_hours: f64, cargo_kg: f64) -> PlanMetrics {
        PlanMetrics {
            time: duration_hours,
            cost: self.cost_per_km * distance_km,
            emissions: self.emission_per_tonne_km * distance_km * cargo_kg / KILOGRAMS_PER_TONNE,
        }
    }
}

/// One [`TransportMode`] per [`ModeId`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeCatalog {
    truck: TransportMode,
    ship: TransportMode,
}

impl ModeCatalog {
    /// Build a catalogue from the two mode definitions.
    ///
    /// The `id` fields are overwritten so lookups stay consistent.
    #[must_use]
    pub const fn new(mut truck: TransportMode, mut ship: TransportMode) -> Self {
        truck.id = ModeId::Truck;
        ship.id = ModeId::Ship;
        Self { truck, ship }
    }

    /// Look up the mode for `id`.
    #[must_use]
    pub const fn get(&self, id: ModeId) -> &TransportMode {
        match id {
            ModeId::Truck => &self.truck,
            ModeId::Ship => &self.ship,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn truck() -> TransportMode {
        TransportMode {
            id: ModeId::Truck,
            cost_per_km: 50.0,
            emission_per_tonne_km: 0.1,
            average_speed_kmh: 80.0,
        }
    }

    #[rstest]
    fn leg_metrics_scale_with_cargo() {
        let light = truck().leg_metrics(100.0, 1.0, 1000.0);
        let heavy = truck().leg_metrics(100.0, 1.0, 2000.0);

        assert!((light.emissions - 10.0).abs() < 1e-9);
        assert!((heavy.emissions - 20.0).abs() < 1e-9);
        assert_eq!(light.cost, heavy.cost);
    }

    #[rstest]
    fn catalog_normalises_ids() {
        let catalog = ModeCatalog::new(truck(), truck());
        assert_eq!(catalog.get(ModeId::Ship).id, ModeId::Ship);
        assert_eq!(catalog.get(ModeId::Truck).id, ModeId::Truck);
    }
}
