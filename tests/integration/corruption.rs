//! Damaged and hostile files are reported as corrupt, never half-loaded.

use crate::common::abaca;
use namestats::binary::{encode_varint, FileFooter, FormatFlags, IndexFile};
use namestats::{IndexConfig, IndexError, IndexKind, NameIndex, ValueIndex};

fn restore(bytes: &[u8]) -> Result<NameIndex, IndexError> {
    NameIndex::from_bytes(bytes, IndexConfig::default())
}

#[test]
fn test_truncated_file() {
    let bytes = abaca().to_bytes().unwrap();
    for len in [0, 4, 16, bytes.len() - 1] {
        let err = restore(&bytes[..len]).unwrap_err();
        assert!(err.is_corrupt(), "len {}: {}", len, err);
    }
}

#[test]
fn test_checksum_mismatch() {
    let mut bytes = abaca().to_bytes().unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x40;
    assert!(restore(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_wrong_kind() {
    let values = ValueIndex::new().to_bytes().unwrap();
    assert!(restore(&values).unwrap_err().is_corrupt());
}

#[test]
fn test_entry_count_mismatch() {
    let index = abaca();
    let mut payload = Vec::new();
    index.encode(&mut payload, true);
    let file = IndexFile::new(IndexKind::Names, FormatFlags::new().with_stats(), 7, payload);
    let err = restore(&file.to_bytes().unwrap()).unwrap_err();
    assert!(err.is_corrupt());
}

#[test]
fn test_stats_block_missing_records() {
    let index = abaca();
    let mut payload = Vec::new();
    index.encode(&mut payload, false);
    // Claims stats but carries none
    let file = IndexFile::new(IndexKind::Names, FormatFlags::new().with_stats(), 3, payload);
    assert!(restore(&file.to_bytes().unwrap()).unwrap_err().is_corrupt());
}

#[test]
fn test_hostile_token_count() {
    let mut payload = Vec::new();
    encode_varint(u32::MAX as u64, &mut payload);
    let file = IndexFile::new(IndexKind::Names, FormatFlags::new(), 0, payload);
    assert!(restore(&file.to_bytes().unwrap()).unwrap_err().is_corrupt());
}

#[test]
fn test_footer_is_last_eight_bytes() {
    let bytes = abaca().to_bytes().unwrap();
    let footer = FileFooter::read(&bytes).unwrap();
    assert_eq!(
        footer.crc32,
        FileFooter::compute_crc32(&bytes[..bytes.len() - FileFooter::SIZE])
    );
}
