// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Token table: interns byte-string keys to dense, permanent 1-based ids.
//!
//! Element `<title>` shows up 40,000 times in a collection? Store it once,
//! hand out id 3, and every node that says "title" says 3 instead. Ids start
//! at 1 so that 0 can mean "no name" everywhere else in the engine.
//!
//! The table separates identity from storage location. An id is a position in
//! the append-only `keys` vector and never changes. The open-addressing
//! buckets only hold ids, so growing the table re-slots ids without ever
//! renumbering them: callers can keep ids across any number of insertions.
//!
//! # Layout
//!
//! ```text
//! keys:    [ <reserved>, "doc", "title", "p", ... ]   id → key
//! hashes:  [ 0,          h0,    h1,      h2,  ... ]   id → cached xxh3
//! buckets: [ 0, 2, 0, 0, 1, 3, 0, 0 ]                 slot → id (0 = empty)
//! ```
//!
//! Probing is linear over a power-of-two bucket array, kept at most half
//! full. Growth doubles the bucket array, so `put` is amortized O(1).
//!
//! # Wire Format
//!
//! ```text
//! count: varint (number of interned keys, slot 0 not included)
//! for each id in 1..=count:
//!   len: varint
//!   bytes: [u8; len]
//! ```

use std::io;

use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::binary::{
    encode_bytes, encode_varint, read_bytes, read_varint, MAX_ENTRY_COUNT, MAX_KEY_LEN,
};

/// Initial bucket count (must be a power of two).
pub(crate) const INITIAL_BUCKETS: usize = 8;

#[inline]
fn hash_key(key: &[u8]) -> u64 {
    xxh3_64(key)
}

/// Open-addressed interning table with stable 1-based ids.
#[derive(Debug, Clone)]
pub struct TokenTable {
    /// Interned keys by id; index 0 is the reserved "absent" slot
    keys: Vec<Box<[u8]>>,
    /// Cached key hashes by id, reused on rehash
    hashes: Vec<u64>,
    /// Slot → id; 0 marks an empty slot
    buckets: Vec<u32>,
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty table sized for `entries` keys without growing.
    pub fn with_capacity(entries: usize) -> Self {
        let buckets = (entries * 2).max(INITIAL_BUCKETS).next_power_of_two();
        let mut keys = Vec::with_capacity(entries + 1);
        let mut hashes = Vec::with_capacity(entries + 1);
        keys.push(Box::default());
        hashes.push(0);
        Self {
            keys,
            hashes,
            buckets: vec![0; buckets],
        }
    }

    /// Intern `key` and return its id.
    ///
    /// If the key already exists, returns the existing id. Otherwise assigns
    /// the next id. Existing ids are never renumbered.
    pub fn put(&mut self, key: &[u8]) -> u32 {
        let hash = hash_key(key);
        let slot = match self.probe(key, hash) {
            Ok(id) => return id,
            Err(slot) => slot,
        };

        let id = u32::try_from(self.keys.len()).unwrap_or(u32::MAX);
        assert!(
            id < u32::MAX,
            "Token table overflow: cannot intern more than {} keys",
            u32::MAX - 1
        );

        self.keys.push(key.into());
        self.hashes.push(hash);
        self.buckets[slot] = id;

        if self.len() * 2 > self.buckets.len() {
            self.rehash(self.buckets.len() * 2);
        }
        id
    }

    /// Look up a key without interning it.
    pub fn id(&self, key: &[u8]) -> Option<u32> {
        self.probe(key, hash_key(key)).ok()
    }

    /// Key for an id, or `None` if the id was never issued.
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        if id == 0 {
            return None;
        }
        self.keys.get(id as usize).map(|k| &**k)
    }

    /// Key for an id.
    ///
    /// Panics if `id` is 0 or was never issued. Ids come from `put`, so a bad
    /// id here is a bug at the call site.
    pub fn key(&self, id: u32) -> &[u8] {
        assert!(
            id != 0 && (id as usize) < self.keys.len(),
            "token id {} out of range 1..{}",
            id,
            self.keys.len()
        );
        &self.keys[id as usize]
    }

    /// Exclusive upper bound of issued ids (live keys + the reserved slot 0).
    pub fn size(&self) -> u32 {
        self.keys.len() as u32
    }

    /// Number of interned keys.
    pub fn len(&self) -> usize {
        self.keys.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `(id, key)` pairs in ascending id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u32, &[u8])> + '_ {
        self.keys
            .iter()
            .enumerate()
            .skip(1)
            .map(|(id, key)| (id as u32, &**key))
    }

    /// Find `key`: `Ok(id)` if present, `Err(slot)` with the empty slot it
    /// would occupy otherwise.
    fn probe(&self, key: &[u8], hash: u64) -> Result<u32, usize> {
        let mask = self.buckets.len() - 1;
        let mut slot = hash as usize & mask;
        loop {
            let id = self.buckets[slot];
            if id == 0 {
                return Err(slot);
            }
            let i = id as usize;
            if self.hashes[i] == hash && &*self.keys[i] == key {
                return Ok(id);
            }
            slot = (slot + 1) & mask;
        }
    }

    /// Re-slot every live id into `new_buckets` buckets. Ids are untouched.
    fn rehash(&mut self, new_buckets: usize) {
        debug_assert!(new_buckets.is_power_of_two());
        debug!(
            from = self.buckets.len(),
            to = new_buckets,
            entries = self.len(),
            "growing token table"
        );

        let mask = new_buckets - 1;
        let mut buckets = vec![0u32; new_buckets];
        for (id, &hash) in self.hashes.iter().enumerate().skip(1) {
            let mut slot = hash as usize & mask;
            while buckets[slot] != 0 {
                slot = (slot + 1) & mask;
            }
            buckets[slot] = id as u32;
        }
        self.buckets = buckets;
    }

    /// Encode the table to a byte buffer.
    ///
    /// Format: varint(count) + for each id: varint(len) + bytes
    pub fn encode(&self, buf: &mut Vec<u8>) {
        encode_varint(self.len() as u64, buf);
        for (_, key) in self.iter() {
            encode_bytes(key, buf);
        }
    }

    /// Decode a table from bytes.
    ///
    /// Returns the decoded table and number of bytes consumed. The id of every
    /// key is its position in the stream, so the id↔key mapping comes back
    /// exactly as written.
    pub fn decode(data: &[u8]) -> io::Result<(Self, usize)> {
        let mut pos = 0;
        let count = read_varint(data, &mut pos)?;

        // Each key needs at least one length byte
        let remaining = data.len().saturating_sub(pos) as u64;
        if count > MAX_ENTRY_COUNT as u64 || count > remaining {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Token table count {} exceeds available bytes {} or limit {}",
                    count, remaining, MAX_ENTRY_COUNT
                ),
            ));
        }
        let count = count as usize;

        let mut table = Self::with_capacity(count);
        for expected in 1..=count {
            let key = read_bytes(data, &mut pos, MAX_KEY_LEN, "token key")?;
            let id = table.put(key);
            if id as usize != expected {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Duplicate token key at id {} (first seen as id {})", expected, id),
                ));
            }
        }

        Ok((table, pos))
    }
}
