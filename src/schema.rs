//! Feature schema shared by the artifact loader and the inference pipeline.
//!
//! The schema is the single source of truth for column names, their order
//! and whether each column is label-encoded. It is persisted inside the
//! bundle and checked against the encoders, scaler and model when an
//! [`InferenceContext`](crate::pipeline::InferenceContext) is built.

use serde::{Deserialize, Serialize};

/// How a column is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// String value mapped through a fitted label encoder.
    Categorical,
    /// Numeric value used as-is before scaling.
    Numeric,
}

/// One column of the feature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name as used at fit time.
    pub column: String,
    /// Encoding kind.
    pub kind: FieldKind,
}

impl FieldDef {
    /// Categorical column.
    #[must_use]
    pub fn categorical(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: FieldKind::Categorical,
        }
    }

    /// Numeric column.
    #[must_use]
    pub fn numeric(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: FieldKind::Numeric,
        }
    }
}

/// Column names of the bike rental schema.
pub mod columns {
    /// Season of the year.
    pub const SEASON: &str = "Season";
    /// Month number.
    pub const MONTH: &str = "Month";
    /// Day of the week.
    pub const WEEKDAY: &str = "Weekday";
    /// Working day flag.
    pub const WORKING_DAY: &str = "Working Day";
    /// Temperature in degrees Celsius.
    pub const TEMP_C: &str = "Temp C";
    /// Relative humidity in percent.
    pub const HUMIDITY_PCT: &str = "Humidity %";
    /// Wind speed in km/h.
    pub const WIND_KMH: &str = "Wind km/h";
}

/// Ordered list of typed columns.
///
/// # Example
///
/// ```
/// use bikecast::schema::{FeatureSchema, FieldKind};
///
/// let schema = FeatureSchema::bike_rental();
/// assert_eq!(schema.len(), 7);
/// assert_eq!(schema.categorical_columns().collect::<Vec<_>>(), vec!["Season", "Weekday"]);
/// assert_eq!(schema.position("Temp C"), Some(4));
/// assert_eq!(schema.fields()[0].kind, FieldKind::Categorical);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    fields: Vec<FieldDef>,
}

impl FeatureSchema {
    /// Builds a schema from fields in fit order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no fields or a column name repeats.
    pub fn new(fields: Vec<FieldDef>) -> crate::Result<Self> {
        if fields.is_empty() {
            return Err("Feature schema must have at least one column".into());
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.column == field.column) {
                return Err(crate::BikecastError::SchemaMismatch {
                    message: format!("duplicate column '{}'", field.column),
                });
            }
        }
        Ok(Self { fields })
    }

    /// The seven-column bike rental schema, in fit order.
    #[must_use]
    pub fn bike_rental() -> Self {
        Self {
            fields: vec![
                FieldDef::categorical(columns::SEASON),
                FieldDef::numeric(columns::MONTH),
                FieldDef::categorical(columns::WEEKDAY),
                FieldDef::numeric(columns::WORKING_DAY),
                FieldDef::numeric(columns::TEMP_C),
                FieldDef::numeric(columns::HUMIDITY_PCT),
                FieldDef::numeric(columns::WIND_KMH),
            ],
        }
    }

    /// Fields in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column.as_str())
    }

    /// Names of the label-encoded columns, in order.
    pub fn categorical_columns(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Categorical)
            .map(|f| f.column.as_str())
    }

    /// Index of a column.
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.column == column)
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::bike_rental()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bike_rental_column_order() {
        let schema = FeatureSchema::bike_rental();
        let cols: Vec<&str> = schema.columns().collect();
        assert_eq!(
            cols,
            vec![
                "Season",
                "Month",
                "Weekday",
                "Working Day",
                "Temp C",
                "Humidity %",
                "Wind km/h"
            ]
        );
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(FeatureSchema::new(vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = FeatureSchema::new(vec![
            FieldDef::numeric("Temp C"),
            FieldDef::categorical("Temp C"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_position_missing_column() {
        let schema = FeatureSchema::bike_rental();
        assert_eq!(schema.position("Rain mm"), None);
        assert!(!schema.is_empty());
    }
}
