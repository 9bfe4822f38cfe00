//! Integration tests for Bikecast.
//!
//! These tests verify end-to-end workflows: fit, bundle to disk, reload,
//! predict.

use bikecast::bundle;
use bikecast::demo;
use bikecast::prelude::*;
use bikecast::BikecastError;

fn all_records() -> Vec<FeatureRecord> {
    let mut records = Vec::new();
    for season in Season::ALL {
        for weekday in Weekday::ALL {
            records.push(FeatureRecord {
                season,
                month: 5,
                weekday,
                working_day: 1,
                temp_c: 17.0,
                humidity_pct: 60.0,
                wind_kmh: 11.0,
            });
        }
    }
    records
}

#[test]
fn test_bundle_file_roundtrip_predicts_identically() {
    let original = demo::synthetic_bundle().expect("demo bundle");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(bundle::DEFAULT_BUNDLE_PATH);
    bundle::save(&original, &path).expect("save bundle");

    let before = InferenceContext::new(original).expect("valid");
    let after = InferenceContext::load(&path).expect("load bundle");

    assert_eq!(before.k(), after.k());
    assert_eq!(before.training_samples(), after.training_samples());
    for record in all_records() {
        assert_eq!(
            before.predict(&record).expect("before"),
            after.predict(&record).expect("after")
        );
    }
}

#[test]
fn test_bundle_members_survive_roundtrip() {
    let original = demo::synthetic_bundle().expect("demo bundle");
    let bytes = bundle::save_to_bytes(&original).expect("save");
    let loaded = bundle::load_from_bytes(&bytes).expect("load");

    assert_eq!(loaded.schema, original.schema);
    assert_eq!(loaded.encoders, original.encoders);
    assert_eq!(loaded.scaler.mean(), original.scaler.mean());
    assert_eq!(loaded.scaler.std(), original.scaler.std());
    assert_eq!(loaded.model.n_samples(), original.model.n_samples());
}

#[test]
fn test_corrupt_bundle_fails_to_load() {
    let bytes = bundle::save_to_bytes(&demo::synthetic_bundle().expect("bundle")).expect("save");
    let mut corrupt = bytes.clone();
    let last_payload_byte = corrupt.len() - 5;
    corrupt[last_payload_byte] ^= 0x5A;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("corrupt.apr");
    std::fs::write(&path, &corrupt).expect("write");

    let err = InferenceContext::load(&path).expect_err("corrupt");
    assert!(matches!(err, BikecastError::ChecksumMismatch { .. }));
}

#[test]
fn test_missing_bundle_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = InferenceContext::load(dir.path().join("absent.apr")).expect_err("absent");
    assert!(matches!(err, BikecastError::Io(_)));
}

#[test]
fn test_submission_workflow() {
    let ctx = InferenceContext::new(demo::synthetic_bundle().expect("bundle")).expect("valid");
    let raw = RawSubmission {
        season: Some("Summer".to_string()),
        month: Some("7".to_string()),
        weekday: Some("Wednesday".to_string()),
        working_day: Some("1".to_string()),
        temp: Some("34".to_string()),
        humidity: Some("50".to_string()),
        wind: Some("8".to_string()),
    };
    let prediction = ctx.predict_submission(&raw).expect("predict");
    assert_eq!(prediction.level, DemandLevel::High);
    assert!(prediction.renters > 1400);
}

#[test]
fn test_training_table_is_reproduced_closely() {
    // Every training row is its own nearest neighbor, so predictions stay
    // within the spread of the synthetic rule.
    let ctx = InferenceContext::new(demo::synthetic_bundle().expect("bundle")).expect("valid");
    for record in demo::synthetic_records() {
        let pred = ctx.predict(&record).expect("predict");
        let target = demo::synthetic_target(&record);
        assert!(
            (pred.value - target).abs() < 900.0,
            "prediction {} too far from target {}",
            pred.value,
            target
        );
    }
}
