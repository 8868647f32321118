//! Test helpers for writing request documents.

use camino::{Utf8Path, Utf8PathBuf};
use intermodal_core::{ModeId, PlanType, TransportLeg, TransportPlan, WeightFactors};
use intermodal_scorer::RequestMetadata;
use tempfile::TempDir;

use crate::compare::CompareRequest;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Amsterdam to Bremen by truck versus truck, feeder vessel, truck.
pub(super) fn sample_compare_request(weights: WeightFactors) -> CompareRequest {
    let leg = |from: &str, to: &str, mode: ModeId, distance_km: f64, duration_hours: f64| {
        TransportLeg {
            from: from.to_owned(),
            to: to.to_owned(),
            mode,
            distance_km,
            duration_hours,
        }
    };
    CompareRequest {
        plans: vec![
            TransportPlan {
                plan_type: PlanType::SingleMode,
                total_time: 6.5,
                total_cost: 26_000.0,
                total_emissions: 26.0,
                distance_km: 520.0,
                legs: None,
            },
            TransportPlan {
                plan_type: PlanType::MultiModal,
                total_time: 21.0,
                total_cost: 9_550.0,
                total_emissions: 8.0,
                distance_km: 437.0,
                legs: Some(vec![
                    leg("AMS", "RTM", ModeId::Truck, 15.0, 0.5),
                    leg("RTM", "BRV", ModeId::Ship, 410.0, 20.0),
                    leg("BRV", "BRE", ModeId::Truck, 12.0, 0.5),
                ]),
            },
        ],
        weights,
        metadata: RequestMetadata {
            cargo_mass_kg: Some(500.0),
            origin: Some("Amsterdam".to_owned()),
            destination: Some("Bremen".to_owned()),
        },
        optimizer: intermodal_scorer::OptimizerConfig::default(),
    }
}

pub(super) fn write_json<T: serde::Serialize>(path: &Utf8Path, value: &T) {
    let payload = serde_json::to_string_pretty(value).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}
