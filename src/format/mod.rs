//! Bikecast bundle container format (`.apr`).
//!
//! Binary container for persisted estimators with built-in integrity checks.
//!
//! # Format Structure
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Header (32 bytes, fixed)                │
//! ├─────────────────────────────────────────┤
//! │ Metadata (variable, MessagePack)        │
//! ├─────────────────────────────────────────┤
//! │ Payload (variable, bincode)             │
//! ├─────────────────────────────────────────┤
//! │ Checksum (4 bytes, CRC32)               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The container is payload-agnostic; [`crate::bundle`] stores the artifact
//! bundle in it.

mod core_io;
mod types;

pub use core_io::{load, load_from_bytes, read_metadata, save, save_to_bytes};
pub use types::{Header, Metadata};

/// Magic number: "BKCA"
pub const MAGIC: [u8; 4] = *b"BKCA";

/// Current format version (1.0)
pub const FORMAT_VERSION: (u8, u8) = (1, 0);

/// Header size in bytes
pub const HEADER_SIZE: usize = 32;

/// Maximum payload size (256MB safety limit)
pub const MAX_PAYLOAD_SIZE: u32 = 256 * 1024 * 1024;

/// Size of the CRC32 trailer.
pub const CHECKSUM_SIZE: usize = 4;

#[cfg(test)]
mod tests;
