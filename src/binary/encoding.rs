// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varints, length-prefixed byte strings, floats.
//!
//! Everything in a names file is built from these four shapes. Counts and
//! lengths are varints because nearly all of them are small (an XML schema
//! rarely has more than a few hundred element names). Keys are raw bytes with
//! a varint length in front. Numeric bounds are fixed 8-byte little-endian
//! floats so they come back bit-identical.
//!
//! Decoders take the whole buffer plus a cursor and advance it. They never
//! panic on malformed input: a truncated or oversized field is an
//! `io::Error` with `UnexpectedEof` or `InvalidData`.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Read a varint at `pos`, advancing the cursor.
pub fn read_varint(bytes: &[u8], pos: &mut usize) -> io::Result<u64> {
    let rest = bytes.get(*pos..).unwrap_or(&[]);
    let (value, consumed) = decode_varint(rest)?;
    *pos += consumed;
    Ok(value)
}

/// Read a varint that must fit in a `u32`.
pub fn read_varint_u32(bytes: &[u8], pos: &mut usize, what: &str) -> io::Result<u32> {
    let value = read_varint(bytes, pos)?;
    u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} {} does not fit in 32 bits", what, value),
        )
    })
}

// ============================================================================
// BYTE STRINGS
// ============================================================================

/// Encode a byte string as `[len: varint][bytes]`.
pub fn encode_bytes(data: &[u8], buf: &mut Vec<u8>) {
    encode_varint(data.len() as u64, buf);
    buf.extend_from_slice(data);
}

/// Decode a length-prefixed byte string, rejecting lengths above `max_len`.
pub fn read_bytes<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    max_len: usize,
    what: &str,
) -> io::Result<&'a [u8]> {
    let len = read_varint(bytes, pos)? as usize;
    if len > max_len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} length {} exceeds limit {}", what, len, max_len),
        ));
    }

    // Use checked arithmetic to prevent overflow on malicious input
    let end = pos.checked_add(len).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} length {} causes overflow", what, len),
        )
    })?;
    let slice = bytes.get(*pos..end).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated {} (expected {} bytes)", what, len),
        )
    })?;
    *pos = end;
    Ok(slice)
}

// ============================================================================
// FIXED-WIDTH FIELDS
// ============================================================================

/// Read a single byte at `pos`, advancing.
pub fn read_u8(bytes: &[u8], pos: &mut usize, what: &str) -> io::Result<u8> {
    let byte = *bytes.get(*pos).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated {}", what),
        )
    })?;
    *pos += 1;
    Ok(byte)
}

/// Encode an `f64` as its 8 little-endian IEEE-754 bytes.
pub fn encode_f64(value: f64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_bits().to_le_bytes());
}

/// Read an `f64` at `pos`, advancing.
pub fn read_f64(bytes: &[u8], pos: &mut usize, what: &str) -> io::Result<f64> {
    let end = *pos + 8;
    let raw: [u8; 8] = bytes
        .get(*pos..end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated {}", what),
            )
        })?;
    *pos = end;
    Ok(f64::from_bits(u64::from_le_bytes(raw)))
}
