//! Property-based tests using proptest.
//!
//! These tests verify invariants of the estimators and the demand buckets.

use bikecast::demo;
use bikecast::prelude::*;
use proptest::prelude::*;

// Strategy for generating small matrices
fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<f32>> {
    proptest::collection::vec(-100.0f32..100.0, rows * cols).prop_map(move |data| {
        Matrix::from_vec(rows, cols, data).expect("Test data should be valid")
    })
}

fn season_strategy() -> impl Strategy<Value = Season> {
    prop::sample::select(Season::ALL.to_vec())
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    prop::sample::select(Weekday::ALL.to_vec())
}

fn record_strategy() -> impl Strategy<Value = FeatureRecord> {
    (
        season_strategy(),
        1u8..=12,
        weekday_strategy(),
        0u8..=1,
        -20.0f32..45.0,
        0.0f32..100.0,
        0.0f32..60.0,
    )
        .prop_map(
            |(season, month, weekday, working_day, temp_c, humidity_pct, wind_kmh)| {
                FeatureRecord {
                    season,
                    month,
                    weekday,
                    working_day,
                    temp_c,
                    humidity_pct,
                    wind_kmh,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn demand_level_is_monotonic(a in 0.0f64..3000.0, b in 0.0f64..3000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |level: DemandLevel| DemandLevel::ALL.iter().position(|l| *l == level);
        prop_assert!(rank(DemandLevel::from_prediction(lo)) <= rank(DemandLevel::from_prediction(hi)));
    }

    #[test]
    fn scaled_columns_have_zero_mean(x in matrix_strategy(12, 3)) {
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).expect("fit");
        for j in 0..3 {
            let mean = scaled.column(j).mean();
            prop_assert!(mean.abs() < 1e-3, "column {} mean {}", j, mean);
        }
    }

    #[test]
    fn scaler_output_is_finite(x in matrix_strategy(8, 4)) {
        let mut scaler = StandardScaler::new();
        prop_assert!(scaler.fit_transform(&x).expect("fit").is_finite());
    }

    #[test]
    fn knn_prediction_is_within_target_range(
        x in matrix_strategy(10, 2),
        y in proptest::collection::vec(0.0f32..2000.0, 10),
        q in matrix_strategy(1, 2),
    ) {
        let targets = Vector::from_vec(y.clone());
        let mut knn = KNeighborsRegressor::new(3);
        knn.fit(&x, &targets).expect("fit");
        let pred = knn.predict(&q).expect("predict")[0];
        let min = y.iter().copied().fold(f32::INFINITY, f32::min);
        let max = y.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        prop_assert!(pred >= min - 1e-3 && pred <= max + 1e-3);
    }

    #[test]
    fn predictions_are_non_negative_and_consistent(record in record_strategy()) {
        let ctx = InferenceContext::new(demo::synthetic_bundle().expect("bundle")).expect("valid");
        let pred = ctx.predict(&record).expect("known labels");
        prop_assert!(pred.value >= 0.0);
        prop_assert_eq!(pred.renters, pred.value.trunc() as i64);
        prop_assert_eq!(pred.level, DemandLevel::from_prediction(f64::from(pred.value)));
    }
}
