//! Property-based tests for plan assembly.
//!
//! # Invariants tested
//!
//! - **Totals:** a plan built from legs reports the per-leg sums.
//! - **Contiguity:** breaking the chain at any leg is reported at that leg.

use intermodal_core::test_support::sample_catalog;
use intermodal_core::{ModeId, PlanError, PlanMetrics, PlanType, TransportLeg, TransportPlan};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn chain_strategy() -> impl Strategy<Value = Vec<TransportLeg>> {
    prop::collection::vec((0.0_f64..2_000.0, 0.0_f64..72.0, any::<bool>()), 1..8).prop_map(
        |segments| {
            segments
                .into_iter()
                .enumerate()
                .map(|(index, (distance_km, duration_hours, by_ship))| TransportLeg {
                    from: format!("S{index}"),
                    to: format!("S{}", index + 1),
                    mode: if by_ship { ModeId::Ship } else { ModeId::Truck },
                    distance_km,
                    duration_hours,
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: plan totals equal the sums of the priced legs.
    #[test]
    fn totals_equal_leg_sums(legs in chain_strategy(), cargo_kg in 0.0_f64..40_000.0) {
        let catalog = sample_catalog();
        let plan = TransportPlan::from_legs(PlanType::MultiModal, legs.clone(), &catalog, cargo_kg)
            .expect("contiguous legs assemble");

        let expected = legs
            .iter()
            .map(|leg| leg.metrics(catalog.get(leg.mode), cargo_kg))
            .fold(PlanMetrics::default(), |acc, metrics| acc + metrics);
        let distance: f64 = legs.iter().map(|leg| leg.distance_km).sum();

        prop_assert!((plan.total_time - expected.time).abs() < TOLERANCE);
        prop_assert!((plan.total_cost - expected.cost).abs() < TOLERANCE);
        prop_assert!((plan.total_emissions - expected.emissions).abs() < TOLERANCE);
        prop_assert!((plan.distance_km - distance).abs() < TOLERANCE);
        prop_assert_eq!(plan.legs.as_deref(), Some(legs.as_slice()));
    }

    /// Property: a broken link is reported at the first leg after the gap.
    #[test]
    fn discontiguous_chains_are_rejected(
        legs in chain_strategy().prop_filter("needs two legs", |legs| legs.len() > 1),
        pick in any::<prop::sample::Index>(),
    ) {
        let break_at = 1 + pick.index(legs.len() - 1);
        let mut broken = legs;
        broken[break_at].from = "ELSEWHERE".to_owned();

        let err = TransportPlan::from_legs(PlanType::MultiModal, broken, &sample_catalog(), 500.0)
            .expect_err("gap should be rejected");

        match err {
            PlanError::Discontiguous { index, .. } => prop_assert_eq!(index, break_at),
            other => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}
