// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File header and footer structures.
//!
//! The header is 16 bytes of fixed-size fields, parsed in one read before
//! anything else. It says which index kind the payload belongs to, how many
//! entries the payload claims, and exactly how long the payload is, so a
//! reader can reject a truncated or padded file without touching the payload.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("TSMN", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::index::IndexKind;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "NMST" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x4E, 0x4D, 0x53, 0x54];

/// Footer magic: "TSMN" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x54, 0x53, 0x4D, 0x4E];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 256 MB
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of interned keys in one table
pub const MAX_ENTRY_COUNT: u32 = 16_000_000;

/// Maximum length of a single interned key
pub const MAX_KEY_LEN: usize = 64 * 1024;

/// Maximum number of sampled values in one stats record
pub const MAX_SAMPLE_SIZE: usize = 1 << 16;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Payload carries a stats block after the token table.
    pub const HAS_STATS: u8 = 0b0000_0001;
    const KNOWN: u8 = Self::HAS_STATS;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_stats(mut self) -> Self {
        self.0 |= Self::HAS_STATS;
        self
    }

    pub fn has_stats(self) -> bool {
        self.0 & Self::HAS_STATS != 0
    }

    /// True if no unknown bits are set.
    pub fn is_valid(self) -> bool {
        self.0 & !Self::KNOWN == 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (16 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u8,
    pub kind: IndexKind,
    pub flags: FormatFlags,
    /// Number of interned keys in the payload's token table
    pub entry_count: u32,
    /// Payload length in bytes (everything between header and footer)
    pub payload_len: u32,
}

impl FileHeader {
    // 4 (magic) + 1 (version) + 1 (kind) + 1 (flags) + 1 (reserved) + 2*4 (u32s) = 16
    pub const SIZE: usize = 16;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.kind.tag()])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8])?; // reserved
        w.write_all(&self.entry_count.to_le_bytes())?;
        w.write_all(&self.payload_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected NMST, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 12]; // 16 - 4 (magic) = 12
        r.read_exact(&mut buf)?;

        let kind = IndexKind::from_tag(buf[1]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown index kind tag {}", buf[1]),
            )
        })?;

        Ok(Self {
            version: buf[0],
            kind,
            flags: FormatFlags(buf[2]),
            // buf[3] is reserved
            entry_count: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            payload_len: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone)]
pub struct FileFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl FileFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected TSMN, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
