//! Error types for bikecast-serve

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for server operations
pub(crate) type Result<T> = std::result::Result<T, ServeError>;

/// Fatal server errors. Request-time failures never reach this type.
#[derive(Error, Debug)]
pub(crate) enum ServeError {
    /// Bundle file not found
    #[error("Bundle not found: {0}")]
    BundleNotFound(PathBuf),

    /// Bundle exists but could not be decoded
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),

    /// Bundle members disagree with each other or with the schema
    #[error("Bundle validation failed: {0}")]
    ValidationFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Server loop failed after startup
    #[error("Server error: {0}")]
    Server(String),
}

impl ServeError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::BundleNotFound(_) => ExitCode::from(3),
            Self::InvalidBundle(_) => ExitCode::from(4),
            Self::ValidationFailed(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
            Self::Bind { .. } => ExitCode::from(10),
            Self::Server(_) => ExitCode::from(1),
        }
    }
}

impl From<bikecast::BikecastError> for ServeError {
    fn from(e: bikecast::BikecastError) -> Self {
        use bikecast::BikecastError;
        match e {
            BikecastError::Io(io) => Self::Io(io),
            BikecastError::SchemaMismatch { .. } | BikecastError::NotFitted { .. } => {
                Self::ValidationFailed(e.to_string())
            }
            other => Self::InvalidBundle(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikecast::BikecastError;

    #[test]
    fn test_schema_errors_map_to_validation() {
        let err: ServeError = BikecastError::SchemaMismatch {
            message: "scaler expects 6 features, schema has 7".to_string(),
        }
        .into();
        assert!(matches!(err, ServeError::ValidationFailed(_)));
        assert_eq!(err.exit_code(), ExitCode::from(5));
    }

    #[test]
    fn test_checksum_errors_map_to_invalid_bundle() {
        let err: ServeError = BikecastError::ChecksumMismatch {
            expected: 1,
            actual: 2,
        }
        .into();
        assert!(matches!(err, ServeError::InvalidBundle(_)));
        assert!(err.to_string().starts_with("Invalid bundle:"));
    }

    #[test]
    fn test_io_errors_stay_io() {
        let err: ServeError =
            BikecastError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).into();
        assert!(matches!(err, ServeError::Io(_)));
    }
}
