//! Inference request pipeline.
//!
//! Turns one form submission into a [`Prediction`]:
//!
//! 1. coerce raw fields into a [`FeatureRecord`]
//! 2. lay the record out in schema order, label-encoding categorical cells
//! 3. standardize the row with the fitted scaler
//! 4. run the k-nearest-neighbors regressor
//! 5. bucket the output into a [`DemandLevel`]
//!
//! Every failure is returned as a [`PipelineError`]; nothing panics and
//! nothing is logged here.

mod context;
mod demand;
mod record;

pub use context::InferenceContext;
pub use demand::{DemandLevel, HIGH_DEMAND_FLOOR, LOW_DEMAND_CEILING};
pub use record::{Cell, FeatureRecord, RawSubmission, Season, Weekday, MEASUREMENT_LIMIT};

use crate::bundle::EncoderSet;
use crate::error::BikecastError;
use crate::schema::{FeatureSchema, FieldKind};
use std::fmt;

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Raw model output
    pub value: f32,
    /// Output truncated toward zero
    pub renters: i64,
    /// Demand bucket of the raw output
    pub level: DemandLevel,
}

impl Prediction {
    /// Wraps a raw model output.
    #[must_use]
    pub fn from_value(value: f32) -> Self {
        Self {
            value,
            renters: value.trunc() as i64,
            level: DemandLevel::from_prediction(f64::from(value)),
        }
    }
}

/// Request-time failure.
#[derive(Debug)]
pub enum PipelineError {
    /// A form field was absent or blank.
    MissingField {
        /// Form field name
        field: &'static str,
    },
    /// A numeric form field did not parse.
    InvalidNumber {
        /// Form field name
        field: &'static str,
        /// Submitted text
        value: String,
        /// What was expected
        expected: &'static str,
    },
    /// A numeric form field parsed but is outside its domain.
    OutOfRange {
        /// Form field name
        field: &'static str,
        /// Submitted value
        value: String,
        /// Allowed range
        range: &'static str,
    },
    /// A categorical form field is not a known season or weekday name.
    UnknownCategory {
        /// Form field name
        field: &'static str,
        /// Submitted text
        value: String,
    },
    /// The fitted encoder never saw this label.
    UnseenLabel {
        /// Feature column
        column: String,
        /// Submitted label
        label: String,
    },
    /// Scaling, prediction or table layout failed.
    Transform(BikecastError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::MissingField { field } => write!(f, "field required: {field}"),
            PipelineError::InvalidNumber {
                field,
                value,
                expected,
            } => write!(f, "{field}: '{value}' is not {expected}"),
            PipelineError::OutOfRange {
                field,
                value,
                range,
            } => write!(f, "{field}: {value} is out of range (expected {range})"),
            PipelineError::UnknownCategory { field, value } => {
                write!(f, "{field}: unknown value '{value}'")
            }
            PipelineError::UnseenLabel { column, label } => {
                write!(f, "{column}: y contains previously unseen labels: '{label}'")
            }
            PipelineError::Transform(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Transform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BikecastError> for PipelineError {
    fn from(err: BikecastError) -> Self {
        PipelineError::Transform(err)
    }
}

/// Lays `record` out in `schema` order, replacing categorical cells with
/// their encoder codes.
///
/// # Errors
///
/// Fails when a column is unknown to the record, a cell has the wrong kind,
/// a categorical column has no encoder, or the encoder never saw the label.
pub fn encode_row(
    schema: &FeatureSchema,
    encoders: &EncoderSet,
    record: &FeatureRecord,
) -> Result<Vec<f32>, PipelineError> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let cell = record.cell(&field.column).ok_or_else(|| {
                BikecastError::SchemaMismatch {
                    message: format!("no value for column '{}'", field.column),
                }
            })?;
            match (field.kind, cell) {
                (FieldKind::Categorical, Cell::Category(label)) => {
                    let encoder = encoders.get(&field.column).ok_or_else(|| {
                        BikecastError::SchemaMismatch {
                            message: format!("no encoder for column '{}'", field.column),
                        }
                    })?;
                    let code = encoder.transform_one(label).map_err(|e| match e {
                        BikecastError::UnseenLabel { label } => PipelineError::UnseenLabel {
                            column: field.column.clone(),
                            label,
                        },
                        other => PipelineError::Transform(other),
                    })?;
                    Ok(code as f32)
                }
                (FieldKind::Numeric, Cell::Number(value)) => Ok(value),
                (kind, _) => Err(BikecastError::SchemaMismatch {
                    message: format!("column '{}' is not {kind:?}", field.column),
                }
                .into()),
            }
        })
        .collect()
}
