// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Value index: leaf values mapped to the ascending ids of the nodes carrying
//! them.
//!
//! Where the name index answers "what is under `<price>`?", this one answers
//! "which nodes say `42`?". It is the kind that can actually drive `iter` and
//! `count`, so the evaluator gets a [`PostingIter`] straight over the stored
//! list and `count` is a length lookup.
//!
//! # Wire Format
//!
//! ```text
//! token table (values, see token.rs)
//! for each value id, ascending:
//!   len: varint
//!   first node id: varint, then len-1 deltas: varint (each >= 1)
//! ```
//!
//! Node ids within a list are strictly ascending, so deltas are small and
//! never zero. A zero delta on disk is a duplicate and therefore corruption.

use std::io::{self, Read, Write};

use tracing::{debug, info};

use crate::binary::{
    encode_varint, read_varint, FormatFlags, IndexFile, MAX_ENTRY_COUNT, MAX_FILE_SIZE,
};
use crate::contracts::check_postings_ascending;
use crate::error::{IndexError, Result};
use crate::index::{
    Capabilities, EntrySelector, Index, IndexEntry, IndexIterator, IndexKind, IndexToken,
    Operation, PostingIter, EMPTY,
};
use crate::token::TokenTable;

/// Values with their posting lists.
#[derive(Debug, Clone)]
pub struct ValueIndex {
    table: TokenTable,
    /// Slot `i` holds the node ids of value id `i`; slot 0 stays empty
    postings: Vec<Vec<u32>>,
}

impl Default for ValueIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueIndex {
    pub fn new() -> Self {
        Self {
            table: TokenTable::new(),
            postings: vec![Vec::new()],
        }
    }

    /// Record that node `node` carries `value`. Returns the value id.
    ///
    /// Nodes normally arrive in document order, which makes this an append.
    /// Repeats of the same node are collapsed.
    pub fn add(&mut self, value: &[u8], node: u32) -> u32 {
        let id = self.table.put(value);
        let size = self.table.size() as usize;
        if self.postings.len() < size {
            self.postings.resize_with(size, Vec::new);
        }

        let list = &mut self.postings[id as usize];
        match list.last() {
            None => list.push(node),
            Some(&last) if last < node => list.push(node),
            Some(&last) if last == node => {}
            Some(_) => {
                if let Err(pos) = list.binary_search(&node) {
                    list.insert(pos, node);
                }
            }
        }
        check_postings_ascending(&list[list.len().saturating_sub(2)..]);
        id
    }

    /// Id of a value, if it was ever indexed.
    pub fn id(&self, value: &[u8]) -> Option<u32> {
        self.table.id(value)
    }

    /// Node ids carrying `value`, ascending. Empty for unknown values.
    pub fn postings(&self, value: &[u8]) -> &[u32] {
        self.table
            .id(value)
            .and_then(|id| self.postings.get(id as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        self.table.encode(buf);
        for list in &self.postings[1..] {
            encode_varint(list.len() as u64, buf);
            let mut prev = 0u32;
            for (i, &node) in list.iter().enumerate() {
                let delta = if i == 0 { node } else { node - prev };
                encode_varint(delta as u64, buf);
                prev = node;
            }
        }
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        let (table, mut pos) = TokenTable::decode(data)?;

        let mut postings = Vec::with_capacity(table.size() as usize);
        postings.push(Vec::new());
        for _ in 0..table.len() {
            postings.push(decode_postings(data, &mut pos)?);
        }

        if pos != data.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} trailing bytes after postings", data.len() - pos),
            ));
        }
        Ok(Self { table, postings })
    }

    /// Serialize into the checksummed container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        self.encode(&mut payload);
        let file = IndexFile::new(
            IndexKind::Values,
            FormatFlags::new(),
            self.len() as u32,
            payload,
        );
        Ok(file.to_bytes()?)
    }

    /// Restore from the checksummed container.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let file = IndexFile::from_bytes(bytes)?;
        if file.header.kind != IndexKind::Values {
            return Err(IndexError::Corrupt(format!(
                "expected a values index, found {}",
                file.header.kind
            )));
        }

        let index = Self::decode(&file.payload)?;
        if index.len() != file.header.entry_count as usize {
            return Err(IndexError::Corrupt(format!(
                "header claims {} values, stream holds {}",
                file.header.entry_count,
                index.len()
            )));
        }
        Ok(index)
    }

    /// Read an index written by [`Index::write`].
    pub fn read(source: &mut dyn Read) -> Result<Self> {
        let mut bytes = Vec::new();
        source
            .take(MAX_FILE_SIZE as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(IndexError::Io)?;

        let index = Self::from_bytes(&bytes)?;
        info!(values = index.len(), bytes = bytes.len(), "restored value index");
        Ok(index)
    }
}

/// Decode one delta-encoded posting list.
fn decode_postings(data: &[u8], pos: &mut usize) -> io::Result<Vec<u32>> {
    let len = read_varint(data, pos)?;
    // Each node id takes at least one byte
    let remaining = data.len().saturating_sub(*pos) as u64;
    if len > MAX_ENTRY_COUNT as u64 || len > remaining {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Posting list length {} exceeds available bytes or limit", len),
        ));
    }

    let mut list = Vec::with_capacity(len as usize);
    let mut prev = 0u32;
    for i in 0..len {
        let delta = read_varint(data, pos)?;
        if i > 0 && delta == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Duplicate node id in posting list",
            ));
        }
        let node = u32::try_from(delta)
            .ok()
            .and_then(|d| prev.checked_add(d))
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Node id overflows u32"))?;
        list.push(node);
        prev = node;
    }
    Ok(list)
}

impl Index for ValueIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Values
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
            .with(Operation::Iter)
            .with(Operation::Count)
    }

    /// Drop every posting list. Values stay interned.
    fn init(&mut self) {
        debug!(values = self.len(), "clearing value postings");
        for list in &mut self.postings {
            list.clear();
        }
    }

    fn entries<'a>(
        &'a self,
        selector: EntrySelector,
    ) -> Box<dyn Iterator<Item = IndexEntry<'a>> + 'a> {
        Box::new(
            self.table
                .iter()
                .filter(move |(_, key)| selector.matches(key))
                .map(|(id, key)| IndexEntry {
                    id,
                    key,
                    count: self.postings[id as usize].len() as u64,
                }),
        )
    }

    fn iter<'a>(&'a self, token: IndexToken<'_>) -> Result<Box<dyn IndexIterator + 'a>> {
        let ids = self.postings(token.value());
        if ids.is_empty() {
            return Ok(Box::new(EMPTY));
        }
        Ok(Box::new(PostingIter::new(ids)))
    }

    fn count(&self, token: IndexToken<'_>) -> Result<usize> {
        Ok(self.postings(token.value()).len())
    }

    fn info(&self) -> String {
        let nodes: usize = self.postings.iter().map(Vec::len).sum();
        let longest = self.postings.iter().map(Vec::len).max().unwrap_or(0);
        format!(
            "Structure: Postings\nEntries: {}\nNodes: {}\nLongest list: {}\n",
            self.len(),
            nodes,
            longest
        )
    }

    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes).map_err(IndexError::Io)?;
        info!(values = self.len(), bytes = bytes.len(), "wrote value index");
        Ok(())
    }
}
