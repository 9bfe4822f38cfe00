//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bikecast::prelude::*;
//! ```

pub use crate::bundle::ArtifactBundle;
pub use crate::neighbors::KNeighborsRegressor;
pub use crate::pipeline::{
    DemandLevel, FeatureRecord, InferenceContext, PipelineError, Prediction, RawSubmission,
    Season, Weekday,
};
pub use crate::preprocessing::{LabelEncoder, StandardScaler};
pub use crate::primitives::{Matrix, Vector};
pub use crate::schema::FeatureSchema;
pub use crate::traits::{Regressor, Transformer};
