// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the cursor-style primitive readers.
//!
//! Every payload decoder walks a byte slice with `read_varint`,
//! `read_varint_u32` and `read_bytes`. Garbage input must produce `Err`,
//! and the cursor must never move past the end of the slice.

#![no_main]

use libfuzzer_sys::fuzz_target;
use namestats::binary::{
    decode_varint, encode_bytes, encode_varint, read_bytes, read_varint, read_varint_u32,
};

fuzz_target!(|data: &[u8]| {
    // Walk the input as a stream of varints until the first error.
    let mut pos = 0;
    while pos < data.len() {
        let before = pos;
        match read_varint(data, &mut pos) {
            Ok(value) => {
                assert!(pos > before && pos <= data.len());
                assert!(pos - before <= 10);

                let mut canonical = Vec::new();
                encode_varint(value, &mut canonical);
                let (again, used) = decode_varint(&canonical).expect("canonical varint decodes");
                assert_eq!(again, value);
                assert_eq!(used, canonical.len());
                assert!(used <= pos - before);
            }
            Err(_) => {
                assert_eq!(pos, before, "failed read must not advance the cursor");
                break;
            }
        }
    }

    // The u32 reader agrees with the u64 reader on what fits.
    let mut wide = 0;
    let mut narrow = 0;
    match (read_varint(data, &mut wide), read_varint_u32(data, &mut narrow, "id")) {
        (Ok(v), Ok(n)) => assert_eq!(v, u64::from(n)),
        (Ok(v), Err(_)) => assert!(v > u64::from(u32::MAX)),
        (Err(_), Ok(_)) => panic!("u32 reader accepted what the u64 reader rejected"),
        (Err(_), Err(_)) => {}
    }

    // Length-prefixed strings stay in bounds and re-encode to the same prefix.
    let mut pos = 0;
    if let Ok(slice) = read_bytes(data, &mut pos, 1024, "key") {
        assert!(slice.len() <= 1024);
        assert!(pos <= data.len());
        let mut reencoded = Vec::new();
        encode_bytes(slice, &mut reencoded);
        let mut back = 0;
        assert_eq!(read_bytes(&reencoded, &mut back, 1024, "key").ok(), Some(slice));
        assert_eq!(back, reencoded.len());
    }
});
