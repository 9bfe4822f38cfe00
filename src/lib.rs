//! Bikecast: bike rental demand prediction in pure Rust.
//!
//! Bikecast loads a jointly fitted artifact bundle (label encoders, a
//! standard scaler and a k-nearest-neighbors regressor) and turns one day's
//! conditions into a predicted renter count and a demand level.
//!
//! # Quick Start
//!
//! ```
//! use bikecast::prelude::*;
//!
//! let ctx = InferenceContext::new(bikecast::demo::synthetic_bundle().unwrap()).unwrap();
//!
//! let record = FeatureRecord {
//!     season: Season::Summer,
//!     month: 7,
//!     weekday: Weekday::Saturday,
//!     working_day: 0,
//!     temp_c: 28.0,
//!     humidity_pct: 55.0,
//!     wind_kmh: 10.0,
//! };
//! let prediction = ctx.predict(&record).unwrap();
//! assert!(prediction.value >= 0.0);
//! assert_eq!(prediction.level, DemandLevel::from_prediction(prediction.value.into()));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`preprocessing`]: Standard scaler and label encoder
//! - [`neighbors`]: K-nearest-neighbors regression
//! - [`schema`]: Column layout of the feature table
//! - [`format`]: Checksummed binary container
//! - [`bundle`]: Artifact bundle persistence
//! - [`pipeline`]: Per-request coercion, encoding, scaling and bucketing
//! - [`demo`]: Deterministic synthetic bundle

pub mod bundle;
pub mod demo;
pub mod error;
pub mod format;
pub mod neighbors;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod schema;
pub mod traits;

pub use error::{BikecastError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Regressor, Transformer};
