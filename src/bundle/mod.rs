//! Artifact bundle: the fitted model, scaler and per-column encoders that
//! are persisted together and loaded once at startup.
//!
//! On disk the bundle is a [`crate::format`] container. The payload stores
//! each member under its own optional slot so that an incomplete export
//! fails with a message naming the absent member instead of an opaque
//! decoding error.
//!
//! # Example
//!
//! ```
//! use bikecast::bundle::{self, ArtifactBundle};
//! use bikecast::neighbors::KNeighborsRegressor;
//! use bikecast::preprocessing::StandardScaler;
//! use bikecast::schema::FeatureSchema;
//! use std::collections::BTreeMap;
//!
//! let bundle = ArtifactBundle::new(
//!     FeatureSchema::bike_rental(),
//!     KNeighborsRegressor::new(5),
//!     StandardScaler::new(),
//!     BTreeMap::new(),
//! );
//! let bytes = bundle::save_to_bytes(&bundle).unwrap();
//! let loaded = bundle::load_from_bytes(&bytes).unwrap();
//! assert_eq!(loaded.model.k(), 5);
//! ```

use crate::error::{BikecastError, Result};
use crate::format::{self, Metadata};
use crate::neighbors::KNeighborsRegressor;
use crate::preprocessing::{LabelEncoder, StandardScaler};
use crate::schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default bundle location, relative to the working directory.
pub const DEFAULT_BUNDLE_PATH: &str = "bike_model.apr";

/// Encoders keyed by categorical column name.
pub type EncoderSet = BTreeMap<String, LabelEncoder>;

/// Jointly fitted artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    /// Column layout the members were fitted on
    pub schema: FeatureSchema,
    /// Fitted regressor
    pub model: KNeighborsRegressor,
    /// Fitted scaler
    pub scaler: StandardScaler,
    /// Fitted label encoders
    pub encoders: EncoderSet,
}

/// Serialized form of [`ArtifactBundle`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct BundlePayload {
    schema: Option<FeatureSchema>,
    model: Option<KNeighborsRegressor>,
    scaler: Option<StandardScaler>,
    encoders: Option<EncoderSet>,
}

impl ArtifactBundle {
    /// Groups already-fitted members.
    #[must_use]
    pub fn new(
        schema: FeatureSchema,
        model: KNeighborsRegressor,
        scaler: StandardScaler,
        encoders: EncoderSet,
    ) -> Self {
        Self {
            schema,
            model,
            scaler,
            encoders,
        }
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.columns = self.schema.columns().map(str::to_string).collect();
        metadata.training_samples = self.model.n_samples();
        metadata.k = Some(self.model.k());
        metadata
    }

    fn to_payload(&self) -> BundlePayload {
        BundlePayload {
            schema: Some(self.schema.clone()),
            model: Some(self.model.clone()),
            scaler: Some(self.scaler.clone()),
            encoders: Some(self.encoders.clone()),
        }
    }

    fn from_payload(payload: BundlePayload) -> Result<Self> {
        Ok(Self {
            schema: payload.schema.unwrap_or_default(),
            model: payload.model.ok_or_else(|| missing_member("model"))?,
            scaler: payload.scaler.ok_or_else(|| missing_member("scaler"))?,
            encoders: payload.encoders.ok_or_else(|| missing_member("encoders"))?,
        })
    }
}

fn missing_member(name: &str) -> BikecastError {
    BikecastError::FormatError {
        message: format!("bundle is missing member '{name}'"),
    }
}

/// Serialize a bundle to container bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn save_to_bytes(bundle: &ArtifactBundle) -> Result<Vec<u8>> {
    format::save_to_bytes(&bundle.to_payload(), &bundle.metadata())
}

/// Write a bundle to `path`.
///
/// # Errors
///
/// Returns an error on I/O or serialization failure.
pub fn save(bundle: &ArtifactBundle, path: impl AsRef<Path>) -> Result<()> {
    format::save(&bundle.to_payload(), &bundle.metadata(), path)
}

/// Decode a bundle from container bytes.
///
/// A bundle without a stored schema is read as the bike rental schema.
///
/// # Errors
///
/// Returns an error on corruption or when the model, scaler or encoders
/// member is absent.
pub fn load_from_bytes(data: &[u8]) -> Result<ArtifactBundle> {
    let (_metadata, payload): (Metadata, BundlePayload) = format::load_from_bytes(data)?;
    ArtifactBundle::from_payload(payload)
}

/// Read a bundle from `path`.
///
/// # Errors
///
/// Same as [`load_from_bytes`], plus I/O failures.
pub fn load(path: impl AsRef<Path>) -> Result<ArtifactBundle> {
    let (_metadata, payload): (Metadata, BundlePayload) = format::load(path)?;
    ArtifactBundle::from_payload(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scaler_is_named() {
        let payload = BundlePayload {
            schema: Some(FeatureSchema::bike_rental()),
            model: Some(KNeighborsRegressor::new(5)),
            scaler: None,
            encoders: Some(EncoderSet::new()),
        };
        let bytes = format::save_to_bytes(&payload, &Metadata::new()).expect("save");
        let err = load_from_bytes(&bytes).expect_err("scaler missing");
        assert!(err.to_string().contains("'scaler'"));
    }

    #[test]
    fn test_missing_model_is_named() {
        let bytes = format::save_to_bytes(&BundlePayload::default(), &Metadata::new())
            .expect("save");
        let err = load_from_bytes(&bytes).expect_err("model missing");
        assert!(err.to_string().contains("'model'"));
    }

    #[test]
    fn test_missing_schema_defaults_to_bike_rental() {
        let payload = BundlePayload {
            schema: None,
            model: Some(KNeighborsRegressor::new(3)),
            scaler: Some(StandardScaler::new()),
            encoders: Some(EncoderSet::new()),
        };
        let bytes = format::save_to_bytes(&payload, &Metadata::new()).expect("save");
        let bundle = load_from_bytes(&bytes).expect("load");
        assert_eq!(bundle.schema, FeatureSchema::bike_rental());
        assert_eq!(bundle.model.k(), 3);
    }

    #[test]
    fn test_metadata_describes_bundle() {
        let bundle = ArtifactBundle::new(
            FeatureSchema::bike_rental(),
            KNeighborsRegressor::new(5),
            StandardScaler::new(),
            EncoderSet::new(),
        );
        let bytes = save_to_bytes(&bundle).expect("save");
        let metadata = format::read_metadata(&bytes).expect("metadata");
        assert_eq!(metadata.columns.len(), 7);
        assert_eq!(metadata.k, Some(5));
        assert_eq!(metadata.training_samples, 0);
    }
}
