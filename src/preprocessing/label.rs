//! Label encoding for categorical columns.

use crate::error::{BikecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Encodes string labels as integer codes `0..n_classes`.
///
/// Classes are stored sorted, so the code of a label is its position in
/// lexicographic order. The mapping is stable across save/load.
///
/// # Example
///
/// ```
/// use bikecast::preprocessing::LabelEncoder;
///
/// let mut encoder = LabelEncoder::new();
/// encoder.fit(&["Winter", "Summer", "Winter", "Fall"]).unwrap();
///
/// assert_eq!(encoder.classes(), Some(&["Fall".to_string(), "Summer".to_string(), "Winter".to_string()][..]));
/// assert_eq!(encoder.transform_one("Summer").unwrap(), 1);
/// assert!(encoder.transform_one("Autumn").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Option<Vec<String>>,
}

impl LabelEncoder {
    /// Creates an unfitted encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the distinct labels.
    ///
    /// # Errors
    ///
    /// Returns an error if `labels` is empty.
    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.is_empty() {
            return Err("Cannot fit LabelEncoder with zero labels".into());
        }
        let classes: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
        self.classes = Some(classes.into_iter().map(str::to_string).collect());
        Ok(())
    }

    /// Fitted classes in code order.
    #[must_use]
    pub fn classes(&self) -> Option<&[String]> {
        self.classes.as_deref()
    }

    /// Number of distinct classes; zero when unfitted.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.classes.is_some()
    }

    /// Encodes a single label.
    ///
    /// # Errors
    ///
    /// Returns [`BikecastError::UnseenLabel`] for labels absent at fit time,
    /// or [`BikecastError::NotFitted`].
    pub fn transform_one(&self, label: &str) -> Result<usize> {
        let classes = self.classes.as_ref().ok_or(BikecastError::NotFitted {
            estimator: "LabelEncoder",
        })?;
        classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| BikecastError::UnseenLabel {
                label: label.to_string(),
            })
    }

    /// Encodes every label, failing on the first unseen one.
    ///
    /// # Errors
    ///
    /// Same as [`LabelEncoder::transform_one`].
    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| self.transform_one(label.as_ref()))
            .collect()
    }
}
