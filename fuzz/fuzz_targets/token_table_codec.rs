// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the token table: arbitrary key streams must intern with
//! stable ids, and arbitrary bytes must decode or fail cleanly.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use namestats::TokenTable;

#[derive(Arbitrary, Debug)]
struct Input {
    keys: Vec<Vec<u8>>,
    raw: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut table = TokenTable::new();
    let ids: Vec<u32> = input.keys.iter().map(|k| table.put(k)).collect();

    // Ids survive growth
    for (key, id) in input.keys.iter().zip(&ids) {
        assert_eq!(table.id(key), Some(*id));
        assert_eq!(table.key(*id), key.as_slice());
    }

    // Encode/decode preserves the mapping
    let mut buf = Vec::new();
    table.encode(&mut buf);
    let (decoded, consumed) = TokenTable::decode(&buf).expect("decode own encoding");
    assert_eq!(consumed, buf.len());
    assert!(decoded.iter().eq(table.iter()));

    // Garbage must not panic
    let _ = TokenTable::decode(&input.raw);
});
