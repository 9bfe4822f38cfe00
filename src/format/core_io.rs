//! Bundle container I/O (save, load, metadata inspection)

use super::{Header, Metadata, CHECKSUM_SIZE, HEADER_SIZE};
use crate::error::{BikecastError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serialize a payload and its metadata into container bytes.
///
/// # Errors
/// Returns error on serialization failure or an oversized section.
pub fn save_to_bytes<M: Serialize>(payload: &M, metadata: &Metadata) -> Result<Vec<u8>> {
    let payload_bytes = bincode::serialize(payload)
        .map_err(|e| BikecastError::Serialization(format!("Failed to serialize payload: {e}")))?;

    // Named fields keep skip_serializing_if compatible on read.
    let metadata_bytes = rmp_serde::to_vec_named(metadata)
        .map_err(|e| BikecastError::Serialization(format!("Failed to serialize metadata: {e}")))?;

    let mut header = Header::new();
    header.metadata_size = section_size(metadata_bytes.len(), "metadata")?;
    header.payload_size = section_size(payload_bytes.len(), "payload")?;

    let mut content =
        Vec::with_capacity(HEADER_SIZE + metadata_bytes.len() + payload_bytes.len() + CHECKSUM_SIZE);
    content.extend_from_slice(&header.to_bytes());
    content.extend_from_slice(&metadata_bytes);
    content.extend_from_slice(&payload_bytes);

    let checksum = crc32fast::hash(&content);
    content.extend_from_slice(&checksum.to_le_bytes());

    Ok(content)
}

/// Save a payload to a container file.
///
/// # Errors
/// Returns error on I/O failure or serialization error
pub fn save<M: Serialize>(payload: &M, metadata: &Metadata, path: impl AsRef<Path>) -> Result<()> {
    let content = save_to_bytes(payload, metadata)?;

    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&content)?;
    writer.flush()?;

    Ok(())
}

/// Load a payload and its metadata from a container file.
///
/// # Errors
/// Returns error on I/O failure, corruption, or an undecodable payload
pub fn load<M: DeserializeOwned>(path: impl AsRef<Path>) -> Result<(Metadata, M)> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;

    load_from_bytes(&content)
}

/// Load a payload and its metadata from container bytes.
///
/// # Errors
/// Returns error on checksum mismatch, bad header, bounds violation, or an
/// undecodable payload
pub fn load_from_bytes<M: DeserializeOwned>(data: &[u8]) -> Result<(Metadata, M)> {
    let (header, body) = verify(data)?;
    let metadata = decode_metadata(&header, body)?;

    let metadata_end = header.metadata_size as usize;
    let payload = &body[metadata_end..metadata_end + header.payload_size as usize];

    let model = bincode::deserialize(payload)
        .map_err(|e| BikecastError::Serialization(format!("Failed to deserialize payload: {e}")))?;

    Ok((metadata, model))
}

/// Read only the metadata section, still verifying the checksum.
///
/// # Errors
/// Same as [`load_from_bytes`], minus payload decoding.
pub fn read_metadata(data: &[u8]) -> Result<Metadata> {
    let (header, body) = verify(data)?;
    decode_metadata(&header, body)
}

/// Checks size, checksum, header and section bounds. Returns the header and
/// the bytes between header and checksum.
fn verify(data: &[u8]) -> Result<(Header, &[u8])> {
    if data.len() < HEADER_SIZE + CHECKSUM_SIZE {
        return Err(BikecastError::FormatError {
            message: format!("File too small: {} bytes", data.len()),
        });
    }

    let (content, trailer) = data.split_at(data.len() - CHECKSUM_SIZE);
    let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let computed = crc32fast::hash(content);
    if stored != computed {
        return Err(BikecastError::ChecksumMismatch {
            expected: stored,
            actual: computed,
        });
    }

    let header = Header::from_bytes(&content[..HEADER_SIZE])?;
    let body = &content[HEADER_SIZE..];

    let sections = header.metadata_size as usize + header.payload_size as usize;
    if sections > body.len() {
        return Err(BikecastError::FormatError {
            message: "Payload extends beyond file boundary".to_string(),
        });
    }

    Ok((header, body))
}

fn decode_metadata(header: &Header, body: &[u8]) -> Result<Metadata> {
    let metadata_bytes = &body[..header.metadata_size as usize];
    rmp_serde::from_slice(metadata_bytes)
        .map_err(|e| BikecastError::Serialization(format!("Failed to deserialize metadata: {e}")))
}

fn section_size(len: usize, section: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| BikecastError::FormatError {
        message: format!("{section} section too large: {len} bytes"),
    })
}
