//! Deterministic synthetic bundle.
//!
//! Fits the full artifact set on a small hand-built table so that tests,
//! doc examples and a first server run do not need an exported model file.
//! Targets follow a linear rule in temperature, working day, humidity, wind
//! and season, clamped at zero.

use crate::bundle::{ArtifactBundle, EncoderSet};
use crate::error::Result;
use crate::neighbors::{KNeighborsRegressor, DEFAULT_K};
use crate::pipeline::{encode_row, FeatureRecord, Season, Weekday};
use crate::preprocessing::{LabelEncoder, StandardScaler};
use crate::primitives::{Matrix, Vector};
use crate::schema::{columns, FeatureSchema};
use crate::traits::{Regressor, Transformer};

/// Month and temperatures sampled for each season.
const SEASON_GRID: [(Season, u8, &[f32]); 4] = [
    (Season::Winter, 1, &[-5.0, 0.0, 5.0]),
    (Season::Spring, 4, &[10.0, 15.0]),
    (Season::Summer, 7, &[22.0, 28.0, 34.0]),
    (Season::Fall, 10, &[8.0, 14.0]),
];

fn season_bonus(season: Season) -> f32 {
    match season {
        Season::Winter => 0.0,
        Season::Spring => 150.0,
        Season::Summer => 400.0,
        Season::Fall => 100.0,
    }
}

/// Renter count the synthetic table assigns to `record`.
#[must_use]
pub fn synthetic_target(record: &FeatureRecord) -> f32 {
    let renters = 300.0 + 45.0 * record.temp_c + 250.0 * f32::from(record.working_day)
        - 2.0 * (record.humidity_pct - 50.0)
        - 6.0 * record.wind_kmh
        + season_bonus(record.season);
    renters.max(0.0)
}

/// Rows of the synthetic training table.
#[must_use]
pub fn synthetic_records() -> Vec<FeatureRecord> {
    let mut records = Vec::new();
    let mut i = 0usize;
    for (season, month, temps) in SEASON_GRID {
        for &temp_c in temps {
            for weekday in Weekday::ALL {
                let working_day = u8::from(!matches!(weekday, Weekday::Saturday | Weekday::Sunday));
                records.push(FeatureRecord {
                    season,
                    month,
                    weekday,
                    working_day,
                    temp_c,
                    humidity_pct: 50.0 + (i % 3) as f32 * 10.0,
                    wind_kmh: 8.0 + (i % 4) as f32 * 3.0,
                });
                i += 1;
            }
        }
    }
    records
}

/// Encoders fitted on every season and weekday name.
///
/// # Errors
///
/// Propagates encoder fitting errors.
pub fn synthetic_encoders() -> Result<EncoderSet> {
    let seasons: Vec<&str> = Season::ALL.iter().map(|s| s.as_str()).collect();
    let weekdays: Vec<&str> = Weekday::ALL.iter().map(|d| d.as_str()).collect();

    let mut season_encoder = LabelEncoder::new();
    season_encoder.fit(&seasons)?;
    let mut weekday_encoder = LabelEncoder::new();
    weekday_encoder.fit(&weekdays)?;

    let mut encoders = EncoderSet::new();
    encoders.insert(columns::SEASON.to_string(), season_encoder);
    encoders.insert(columns::WEEKDAY.to_string(), weekday_encoder);
    Ok(encoders)
}

/// Fits scaler and regressor on the synthetic table.
///
/// # Errors
///
/// Propagates fitting errors.
///
/// # Example
///
/// ```
/// use bikecast::demo;
/// use bikecast::pipeline::InferenceContext;
///
/// let ctx = InferenceContext::new(demo::synthetic_bundle().unwrap()).unwrap();
/// assert_eq!(ctx.k(), 5);
/// ```
pub fn synthetic_bundle() -> Result<ArtifactBundle> {
    let schema = FeatureSchema::bike_rental();
    let encoders = synthetic_encoders()?;
    let records = synthetic_records();

    let mut data = Vec::with_capacity(records.len() * schema.len());
    let mut targets = Vec::with_capacity(records.len());
    for record in &records {
        let row = encode_row(&schema, &encoders, record).map_err(|e| e.to_string())?;
        data.extend(row);
        targets.push(synthetic_target(record));
    }
    let x = Matrix::from_vec(records.len(), schema.len(), data)?;
    let y = Vector::from_vec(targets);

    let mut scaler = StandardScaler::new();
    let x_scaled = scaler.fit_transform(&x)?;

    let mut model = KNeighborsRegressor::new(DEFAULT_K);
    model.fit(&x_scaled, &y)?;

    Ok(ArtifactBundle::new(schema, model, scaler, encoders))
}
