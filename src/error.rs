//! Error types for Bikecast operations.
//!
//! Covers estimator misuse, bundle I/O and format corruption, and schema
//! disagreement between the persisted artifacts.

use std::fmt;

/// Main error type for Bikecast library operations.
///
/// # Examples
///
/// ```
/// use bikecast::error::BikecastError;
///
/// let err = BikecastError::DimensionMismatch {
///     expected: "7 features".to_string(),
///     actual: "5 features".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum BikecastError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Estimator used before `fit`.
    NotFitted {
        /// Estimator name
        estimator: &'static str,
    },

    /// Label encoder asked to encode a label it never saw during fit.
    UnseenLabel {
        /// The offending label
        label: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Invalid or corrupt bundle format.
    FormatError {
        /// Error description
        message: String,
    },

    /// Unsupported bundle format version.
    UnsupportedVersion {
        /// Version found
        found: (u8, u8),
        /// Maximum supported version
        supported: (u8, u8),
    },

    /// Checksum verification failed.
    ChecksumMismatch {
        /// Expected checksum
        expected: u32,
        /// Actual checksum
        actual: u32,
    },

    /// Encoders, scaler and model disagree with the feature schema.
    SchemaMismatch {
        /// Error description
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for BikecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BikecastError::DimensionMismatch { expected, actual } => {
                write!(f, "Feature dimension mismatch: expected {expected}, got {actual}")
            }
            BikecastError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            BikecastError::NotFitted { estimator } => {
                write!(f, "{estimator} is not fitted yet. Call fit() first.")
            }
            BikecastError::UnseenLabel { label } => {
                write!(f, "y contains previously unseen labels: '{label}'")
            }
            BikecastError::Io(e) => write!(f, "I/O error: {e}"),
            BikecastError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            BikecastError::FormatError { message } => {
                write!(f, "Invalid bundle format: {message}")
            }
            BikecastError::UnsupportedVersion { found, supported } => {
                write!(
                    f,
                    "Unsupported bundle version: found {}.{}, max supported {}.{}",
                    found.0, found.1, supported.0, supported.1
                )
            }
            BikecastError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "Checksum mismatch: expected 0x{expected:08X}, got 0x{actual:08X}"
                )
            }
            BikecastError::SchemaMismatch { message } => {
                write!(f, "Schema mismatch: {message}")
            }
            BikecastError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikecastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BikecastError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BikecastError {
    fn from(err: std::io::Error) -> Self {
        BikecastError::Io(err)
    }
}

impl From<&str> for BikecastError {
    fn from(msg: &str) -> Self {
        BikecastError::Other(msg.to_string())
    }
}

impl From<String> for BikecastError {
    fn from(msg: String) -> Self {
        BikecastError::Other(msg)
    }
}

/// Convenience type alias for Results with `BikecastError`.
pub type Result<T> = std::result::Result<T, BikecastError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = BikecastError::DimensionMismatch {
            expected: "7".to_string(),
            actual: "3".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 7"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_unseen_label_display_names_label() {
        let err = BikecastError::UnseenLabel {
            label: "Autumn".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "y contains previously unseen labels: 'Autumn'"
        );
    }

    #[test]
    fn test_checksum_display_is_hex() {
        let err = BikecastError::ChecksumMismatch {
            expected: 0xDEAD_BEEF,
            actual: 0x1,
        };
        assert_eq!(
            err.to_string(),
            "Checksum mismatch: expected 0xDEADBEEF, got 0x00000001"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "bike_model.apr");
        let err: BikecastError = io.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_from_str_and_string() {
        let a: BikecastError = "boom".into();
        let b: BikecastError = String::from("boom").into();
        assert_eq!(a.to_string(), b.to_string());
        assert!(a.source().is_none());
    }
}
