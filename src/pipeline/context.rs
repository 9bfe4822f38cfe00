//! Loaded, validated artifacts shared by every request.

use super::{encode_row, FeatureRecord, PipelineError, Prediction, RawSubmission};
use crate::bundle::{self, ArtifactBundle};
use crate::error::{BikecastError, Result};
use crate::primitives::Matrix;
use crate::schema::FeatureSchema;
use crate::traits::{Regressor, Transformer};
use std::path::Path;

/// Read-only inference state.
///
/// Construction checks that the bundle members agree with each other and
/// with the schema, so a request can only fail on its own input.
#[derive(Debug, Clone)]
pub struct InferenceContext {
    bundle: ArtifactBundle,
}

impl InferenceContext {
    /// Wraps a bundle after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`BikecastError::NotFitted`] for an unfitted model, scaler or
    /// encoder, and [`BikecastError::SchemaMismatch`] when widths, encoder
    /// columns or column kinds disagree with the schema.
    pub fn new(bundle: ArtifactBundle) -> Result<Self> {
        validate(&bundle)?;
        Ok(Self { bundle })
    }

    /// Loads and validates the bundle at `path`.
    ///
    /// # Errors
    ///
    /// Any load error from [`bundle::load`] or validation error from
    /// [`InferenceContext::new`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(bundle::load(path)?)
    }

    /// Column layout of the feature table.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.bundle.schema
    }

    /// Neighbors consulted per prediction.
    #[must_use]
    pub fn k(&self) -> usize {
        self.bundle.model.k()
    }

    /// Rows the regressor was fitted on.
    #[must_use]
    pub fn training_samples(&self) -> usize {
        self.bundle.model.n_samples()
    }

    /// Builds the scaled one-row feature table for `record`.
    ///
    /// # Errors
    ///
    /// Unseen category labels, or a scaler failure.
    pub fn encode(&self, record: &FeatureRecord) -> std::result::Result<Matrix<f32>, PipelineError> {
        let row = encode_row(&self.bundle.schema, &self.bundle.encoders, record)?;
        let scaled = self.bundle.scaler.transform(&Matrix::from_row(row))?;
        Ok(scaled)
    }

    /// Predicts demand for one typed record.
    ///
    /// # Errors
    ///
    /// See [`InferenceContext::encode`]; also fails if the regressor does.
    pub fn predict(&self, record: &FeatureRecord) -> std::result::Result<Prediction, PipelineError> {
        let features = self.encode(record)?;
        let output = self.bundle.model.predict(&features)?;
        let value = output.first().ok_or_else(|| {
            PipelineError::Transform(BikecastError::Other(
                "regressor returned no prediction".to_string(),
            ))
        })?;
        Ok(Prediction::from_value(value))
    }

    /// Coerces raw form fields, then predicts.
    ///
    /// # Errors
    ///
    /// Any coercion error from [`FeatureRecord::from_submission`] or
    /// prediction error from [`InferenceContext::predict`].
    pub fn predict_submission(
        &self,
        raw: &RawSubmission,
    ) -> std::result::Result<Prediction, PipelineError> {
        let record = FeatureRecord::from_submission(raw)?;
        self.predict(&record)
    }
}

fn validate(bundle: &ArtifactBundle) -> Result<()> {
    let schema = &bundle.schema;

    if !bundle.model.is_fitted() {
        return Err(BikecastError::NotFitted {
            estimator: "KNeighborsRegressor",
        });
    }
    if !bundle.scaler.is_fitted() {
        return Err(BikecastError::NotFitted {
            estimator: "StandardScaler",
        });
    }

    for (member, width) in [
        ("scaler", bundle.scaler.n_features()),
        ("model", bundle.model.n_features()),
    ] {
        if width != Some(schema.len()) {
            return Err(mismatch(format!(
                "{member} expects {} features, schema has {}",
                width.unwrap_or(0),
                schema.len()
            )));
        }
    }

    for field in schema.fields() {
        match FeatureRecord::column_kind(&field.column) {
            Some(kind) if kind == field.kind => {}
            Some(kind) => {
                return Err(mismatch(format!(
                    "column '{}' is {kind:?}, schema says {:?}",
                    field.column, field.kind
                )))
            }
            None => return Err(mismatch(format!("unknown column '{}'", field.column))),
        }
    }

    let expected: Vec<&str> = schema.categorical_columns().collect();
    let actual: Vec<&str> = bundle.encoders.keys().map(String::as_str).collect();
    let mut expected_sorted = expected.clone();
    expected_sorted.sort_unstable();
    if expected_sorted != actual {
        return Err(mismatch(format!(
            "encoders cover {actual:?}, categorical columns are {expected:?}"
        )));
    }
    if bundle.encoders.values().any(|enc| !enc.is_fitted()) {
        return Err(BikecastError::NotFitted {
            estimator: "LabelEncoder",
        });
    }

    Ok(())
}

fn mismatch(message: String) -> BikecastError {
    BikecastError::SchemaMismatch { message }
}
