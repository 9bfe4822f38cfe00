//! Bundle container type definitions.

use crate::error::{BikecastError, Result};
use serde::{Deserialize, Serialize};

use super::{FORMAT_VERSION, HEADER_SIZE, MAGIC, MAX_PAYLOAD_SIZE};

/// File header (32 bytes)
///
/// | bytes  | field                 |
/// |--------|-----------------------|
/// | 0..4   | magic `BKCA`          |
/// | 4..6   | version (major, minor)|
/// | 6..8   | reserved              |
/// | 8..12  | metadata size, LE u32 |
/// | 12..16 | payload size, LE u32  |
/// | 16..32 | reserved              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Magic number (must be "BKCA")
    pub magic: [u8; 4],
    /// Format version (major, minor)
    pub version: (u8, u8),
    /// Metadata section size in bytes
    pub metadata_size: u32,
    /// Payload size in bytes
    pub payload_size: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    /// Create a header for the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            metadata_size: 0,
            payload_size: 0,
        }
    }

    /// Serialize header to bytes (32 bytes)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version.0;
        bytes[5] = self.version.1;
        bytes[8..12].copy_from_slice(&self.metadata_size.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes
    }

    /// Parse header from bytes
    ///
    /// # Errors
    ///
    /// Fails on short input, wrong magic, a newer major version, or a
    /// payload larger than [`MAX_PAYLOAD_SIZE`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(BikecastError::FormatError {
                message: format!(
                    "Header too short: {} bytes, expected {}",
                    bytes.len(),
                    HEADER_SIZE
                ),
            });
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(BikecastError::FormatError {
                message: format!(
                    "Invalid magic number: {:02X}{:02X}{:02X}{:02X}, expected BKCA",
                    magic[0], magic[1], magic[2], magic[3]
                ),
            });
        }

        let version = (bytes[4], bytes[5]);
        if version.0 > FORMAT_VERSION.0 {
            return Err(BikecastError::UnsupportedVersion {
                found: version,
                supported: FORMAT_VERSION,
            });
        }

        let metadata_size = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let payload_size = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

        if payload_size > MAX_PAYLOAD_SIZE {
            return Err(BikecastError::FormatError {
                message: format!(
                    "Payload size {payload_size} exceeds maximum {MAX_PAYLOAD_SIZE}"
                ),
            });
        }

        Ok(Self {
            magic,
            version,
            metadata_size,
            payload_size,
        })
    }
}

/// Bundle metadata (MessagePack-encoded, readable without the payload)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Crate version that wrote the file
    pub bikecast_version: String,
    /// Optional human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Feature columns in fit order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Number of stored training samples
    #[serde(default)]
    pub training_samples: usize,
    /// Neighbor count of the stored model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

impl Metadata {
    /// Metadata stamped with the current crate version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bikecast_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Self::default()
        }
    }
}
