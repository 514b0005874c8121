// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for restoring name index files.
//!
//! Index files come from disk and may be truncated, damaged or hostile. The
//! restore path must reject bad input with an error, never panic, and never
//! allocate based on unchecked counts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use namestats::{IndexConfig, NameIndex};

fuzz_target!(|data: &[u8]| {
    // Full container path (CRC rejects most mutations early)
    if let Ok(index) = NameIndex::from_bytes(data, IndexConfig::default()) {
        // Anything that loads must re-serialize and load again identically
        let bytes = index.to_bytes().expect("re-serialize loaded index");
        let again = NameIndex::from_bytes(&bytes, IndexConfig::default())
            .expect("reload re-serialized index");
        assert_eq!(index.report(), again.report());
    }

    // Raw payload path, bypassing the checksum so the decoders see the garbage
    for with_stats in [false, true] {
        if let Ok(index) = NameIndex::decode(data, with_stats, IndexConfig::default()) {
            for id in 1..index.size() {
                assert!(index.name(id).is_some());
                assert!(index.stat(id).is_some());
            }
        }
    }
});
