//! Tests for preprocessing module.

use super::*;

#[test]
fn test_new() {
    let scaler = StandardScaler::new();
    assert!(!scaler.is_fitted());
    assert_eq!(scaler.n_features(), None);
}

#[test]
fn test_default() {
    let scaler = StandardScaler::default();
    assert!(!scaler.is_fitted());
}

#[test]
fn test_fit_basic() {
    let data = Matrix::from_vec(3, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    scaler
        .fit(&data)
        .expect("fit should succeed with valid data");

    assert!(scaler.is_fitted());
    assert_eq!(scaler.n_features(), Some(2));

    let mean = scaler.mean().expect("fitted");
    assert!((mean[0] - 2.0).abs() < 1e-6);
    assert!((mean[1] - 20.0).abs() < 1e-6);

    // Population std: sqrt(2/3)
    let std = scaler.std().expect("fitted");
    let expected_std = (2.0_f32 / 3.0).sqrt();
    assert!((std[0] - expected_std).abs() < 1e-4);
    assert!((std[1] - expected_std * 10.0).abs() < 1e-3);
}

#[test]
fn test_fit_zero_samples_fails() {
    let data = Matrix::zeros(0, 3);
    let mut scaler = StandardScaler::new();
    assert!(scaler.fit(&data).is_err());
}

#[test]
fn test_transform_unfitted_fails() {
    let scaler = StandardScaler::new();
    let data = Matrix::from_row(vec![1.0, 2.0]);
    let err = scaler.transform(&data).expect_err("unfitted");
    assert!(matches!(err, BikecastError::NotFitted { .. }));
}

#[test]
fn test_transform_dimension_mismatch() {
    let train = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("2x2");
    let mut scaler = StandardScaler::new();
    scaler.fit(&train).expect("fit");

    let wide = Matrix::from_row(vec![1.0, 2.0, 3.0]);
    let err = scaler.transform(&wide).expect_err("width differs");
    assert!(matches!(err, BikecastError::DimensionMismatch { .. }));
}

#[test]
fn test_constant_column_is_only_centered() {
    let data = Matrix::from_vec(3, 2, vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0]).expect("3x2");
    let mut scaler = StandardScaler::new();
    let scaled = scaler.fit_transform(&data).expect("fit_transform");
    for i in 0..3 {
        assert_eq!(scaled.get(i, 0), 0.0);
    }
}

#[test]
fn test_two_points_map_to_unit_distance() {
    // mean = 3.0, population std = 1.0
    let data = Matrix::from_vec(2, 1, vec![2.0, 4.0]).expect("2x1");
    let mut scaler = StandardScaler::new();
    let scaled = scaler.fit_transform(&data).expect("fit_transform");
    assert!((scaled.get(0, 0) + 1.0).abs() < 1e-6);
    assert!((scaled.get(1, 0) - 1.0).abs() < 1e-6);
}

// ==================== LabelEncoder ====================

#[test]
fn test_label_encoder_sorts_classes() {
    let mut encoder = LabelEncoder::new();
    encoder
        .fit(&["Spring", "Winter", "Fall", "Summer", "Winter"])
        .expect("fit");
    assert_eq!(encoder.n_classes(), 4);
    assert_eq!(encoder.transform_one("Fall").expect("seen"), 0);
    assert_eq!(encoder.transform_one("Spring").expect("seen"), 1);
    assert_eq!(encoder.transform_one("Summer").expect("seen"), 2);
    assert_eq!(encoder.transform_one("Winter").expect("seen"), 3);
}

#[test]
fn test_label_encoder_unseen_label() {
    let mut encoder = LabelEncoder::new();
    encoder.fit(&["Winter", "Summer"]).expect("fit");
    let err = encoder.transform_one("Autumn").expect_err("unseen");
    assert!(matches!(err, BikecastError::UnseenLabel { ref label } if label == "Autumn"));
}

#[test]
fn test_label_encoder_is_case_sensitive() {
    let mut encoder = LabelEncoder::new();
    encoder.fit(&["Monday"]).expect("fit");
    assert!(encoder.transform_one("monday").is_err());
}

#[test]
fn test_label_encoder_unfitted() {
    let encoder = LabelEncoder::new();
    assert!(!encoder.is_fitted());
    assert_eq!(encoder.n_classes(), 0);
    let err = encoder.transform_one("Monday").expect_err("unfitted");
    assert!(matches!(err, BikecastError::NotFitted { .. }));
}

#[test]
fn test_label_encoder_empty_fit_fails() {
    let mut encoder = LabelEncoder::new();
    let empty: [&str; 0] = [];
    assert!(encoder.fit(&empty).is_err());
}

#[test]
fn test_label_encoder_batch() {
    let mut encoder = LabelEncoder::new();
    encoder.fit(&["b", "a", "c"]).expect("fit");
    let codes = encoder.transform(&["c", "a"]).expect("seen");
    assert_eq!(codes, vec![2, 0]);
    assert!(encoder.transform(&["a", "d"]).is_err());
}
