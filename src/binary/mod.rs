// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary container for persisted indexes.
//!
//! Every index kind serializes its own payload (the name index writes a token
//! table followed by one stats record per id; the value index writes a token
//! table followed by postings). This module wraps that payload in a small
//! checksummed envelope so a reader can tell "this file is damaged" apart from
//! "this payload is malformed" before decoding a single key.
//!
//! # Security Considerations
//!
//! Files are parsed as untrusted input:
//! - File size, entry counts, key lengths and sample sizes are checked against MAX_* limits
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has a maximum iteration limit
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                                          │
//! │   magic: [u8; 4] = "NMST"                                  │
//! │   version: u8 = 1                                          │
//! │   kind: u8 (1 = names, 2 = values)                         │
//! │   flags: u8, reserved: u8                                  │
//! │   entry_count: u32, payload_len: u32                       │
//! ├────────────────────────────────────────────────────────────┤
//! │ PAYLOAD (index-kind specific)                              │
//! │   names:  token table, then one stats record per id        │
//! │   values: token table, then one posting list per id        │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "TSMN"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{
    decode_varint, encode_bytes, encode_f64, encode_varint, read_bytes, read_f64, read_u8,
    read_varint, read_varint_u32,
};
pub use header::{
    FileFooter, FileHeader, FormatFlags, FOOTER_MAGIC, MAGIC, MAX_ENTRY_COUNT, MAX_FILE_SIZE,
    MAX_KEY_LEN, MAX_SAMPLE_SIZE, MAX_VARINT_BYTES, VERSION,
};

use std::io;

use crate::index::IndexKind;

/// A complete persisted index: header plus the raw payload.
#[derive(Debug, Clone)]
pub struct IndexFile {
    pub header: FileHeader,
    pub payload: Vec<u8>,
}

impl IndexFile {
    /// Wrap an encoded payload.
    pub fn new(kind: IndexKind, flags: FormatFlags, entry_count: u32, payload: Vec<u8>) -> Self {
        let header = FileHeader {
            version: VERSION,
            kind,
            flags,
            entry_count,
            payload_len: payload.len() as u32,
        };
        Self { header, payload }
    }

    /// Serialize to bytes (with CRC32 footer)
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let total_size = FileHeader::SIZE + self.payload.len() + FileFooter::SIZE;

        let mut buf = Vec::with_capacity(total_size);
        self.header.write(&mut buf)?;
        buf.extend_from_slice(&self.payload);

        let crc32 = FileFooter::compute_crc32(&buf);
        FileFooter { crc32 }.write(&mut buf)?;

        Ok(buf)
    }

    /// Deserialize from bytes (with CRC32 validation)
    ///
    /// # Validation
    ///
    /// 1. File size is within limits (MAX_FILE_SIZE)
    /// 2. Footer magic is valid ("TSMN") and CRC32 matches
    /// 3. Header magic is valid ("NMST") and version is supported
    /// 4. Flags carry no unknown bits, entry count is within MAX_ENTRY_COUNT
    /// 5. Payload length matches what the header claims
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "File too large: {} bytes (max {})",
                    bytes.len(),
                    MAX_FILE_SIZE
                ),
            ));
        }

        let min_size = FileHeader::SIZE + FileFooter::SIZE;
        if bytes.len() < min_size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "File too small: {} bytes (minimum {})",
                    bytes.len(),
                    min_size
                ),
            ));
        }

        let footer = FileFooter::read(bytes)?;
        let content = &bytes[..bytes.len() - FileFooter::SIZE];
        let computed_crc32 = FileFooter::compute_crc32(content);

        if footer.crc32 != computed_crc32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
                    footer.crc32, computed_crc32
                ),
            ));
        }

        let mut cursor = io::Cursor::new(content);
        let header = FileHeader::read(&mut cursor)?;

        if header.version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported version: {} (expected {})",
                    header.version, VERSION
                ),
            ));
        }

        if !header.flags.is_valid() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown format flags {:#04x}", header.flags.0),
            ));
        }

        if header.entry_count > MAX_ENTRY_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Too many entries: {} (max {})",
                    header.entry_count, MAX_ENTRY_COUNT
                ),
            ));
        }

        let payload = &content[FileHeader::SIZE..];
        if payload.len() != header.payload_len as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Payload length mismatch: header claims {} bytes, got {} bytes",
                    header.payload_len,
                    payload.len()
                ),
            ));
        }

        Ok(Self {
            header,
            payload: payload.to_vec(),
        })
    }

    /// Total encoded size including header and footer.
    pub fn total_size(&self) -> usize {
        FileHeader::SIZE + self.payload.len() + FileFooter::SIZE
    }
}
