use super::*;
use crate::error::BikecastError;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Toy {
    name: String,
    weights: Vec<f32>,
}

fn toy() -> Toy {
    Toy {
        name: "toy".to_string(),
        weights: vec![0.5, -1.25, 3.0],
    }
}

#[test]
fn test_header_bytes_roundtrip() {
    let mut header = Header::new();
    header.metadata_size = 17;
    header.payload_size = 4096;
    let bytes = header.to_bytes();
    assert_eq!(&bytes[0..4], b"BKCA");
    assert_eq!(Header::from_bytes(&bytes).expect("valid header"), header);
}

#[test]
fn test_header_rejects_bad_magic() {
    let mut bytes = Header::new().to_bytes();
    bytes[0] = b'X';
    let err = Header::from_bytes(&bytes).expect_err("bad magic");
    assert!(err.to_string().contains("magic"));
}

#[test]
fn test_header_rejects_newer_major_version() {
    let mut bytes = Header::new().to_bytes();
    bytes[4] = FORMAT_VERSION.0 + 1;
    let err = Header::from_bytes(&bytes).expect_err("newer major");
    assert!(matches!(err, BikecastError::UnsupportedVersion { .. }));
}

#[test]
fn test_header_rejects_oversized_payload() {
    let mut header = Header::new();
    header.payload_size = MAX_PAYLOAD_SIZE + 1;
    assert!(Header::from_bytes(&header.to_bytes()).is_err());
}

#[test]
fn test_header_rejects_short_input() {
    assert!(Header::from_bytes(&[0u8; 8]).is_err());
}

#[test]
fn test_bytes_roundtrip_preserves_payload_and_metadata() {
    let mut metadata = Metadata::new();
    metadata.description = Some("unit test".to_string());
    let bytes = save_to_bytes(&toy(), &metadata).expect("save");
    let (meta, loaded): (Metadata, Toy) = load_from_bytes(&bytes).expect("load");
    assert_eq!(loaded, toy());
    assert_eq!(meta, metadata);
    assert_eq!(meta.bikecast_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_read_metadata_without_payload_type() {
    let mut metadata = Metadata::new();
    metadata.columns = vec!["Season".to_string(), "Month".to_string()];
    metadata.training_samples = 12;
    metadata.k = Some(5);
    let bytes = save_to_bytes(&toy(), &metadata).expect("save");
    assert_eq!(read_metadata(&bytes).expect("metadata"), metadata);
}

#[test]
fn test_flipped_byte_is_checksum_mismatch() {
    let mut bytes = save_to_bytes(&toy(), &Metadata::new()).expect("save");
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    let err = load_from_bytes::<Toy>(&bytes).expect_err("corrupt");
    assert!(matches!(err, BikecastError::ChecksumMismatch { .. }));
}

#[test]
fn test_truncated_file_is_format_error() {
    let err = load_from_bytes::<Toy>(&[0u8; 10]).expect_err("too small");
    assert!(matches!(err, BikecastError::FormatError { .. }));
}

#[test]
fn test_wrong_payload_type_is_serialization_error() {
    let bytes = save_to_bytes(&7u8, &Metadata::new()).expect("save");
    let err = load_from_bytes::<Toy>(&bytes).expect_err("wrong type");
    assert!(matches!(err, BikecastError::Serialization(_)));
}

#[test]
fn test_section_bounds_checked_after_checksum() {
    let mut header = Header::new();
    header.payload_size = 1000;
    let mut content = header.to_bytes().to_vec();
    content.extend_from_slice(&[1, 2, 3]);
    let checksum = crc32fast::hash(&content);
    content.extend_from_slice(&checksum.to_le_bytes());

    let err = load_from_bytes::<Toy>(&content).expect_err("out of bounds");
    assert!(err.to_string().contains("beyond file boundary"));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("toy.apr");
    save(&toy(), &Metadata::new(), &path).expect("save");
    let (_, loaded): (Metadata, Toy) = load(&path).expect("load");
    assert_eq!(loaded, toy());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = load::<Toy>("/nonexistent/bike_model.apr").expect_err("missing");
    assert!(matches!(err, BikecastError::Io(_)));
}
