// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Name index: interned element/attribute names plus per-name statistics.
//!
//! The builder calls [`NameIndex::record_occurrence`] once per structural
//! event. The name gets (or keeps) its id, and when statistics are being
//! tracked the value is folded into that id's [`Stats`] record. Names indexed
//! without tracking keep an empty record. Once the build
//! finishes the index is persisted and from then on only read: the optimizer
//! asks `stat(id)` for cardinality and type estimates.
//!
//! The stats array is a side table indexed by token id. It is resized in
//! exactly one place (`align`), right after every `put`, so a valid id always
//! has a record even after the token table has grown.
//!
//! # Wire Format
//!
//! ```text
//! token table (see token.rs)
//! [one stats record per id, ascending]    only if FormatFlags::HAS_STATS
//! ```
//!
//! The block is omitted when every record is empty. A file without it
//! restores with an empty record for every id, which is the same state.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::binary::{FormatFlags, IndexFile, MAX_FILE_SIZE};
use crate::config::IndexConfig;
use crate::contracts::check_stats_aligned;
use crate::error::{IndexError, Result};
use crate::index::{
    unsupported, Capabilities, EntrySelector, Index, IndexEntry, IndexIterator, IndexKind,
    IndexToken, Operation,
};
use crate::stats::Stats;
use crate::token::TokenTable;

/// Interned names with id-aligned statistics records.
#[derive(Debug, Clone)]
pub struct NameIndex {
    table: TokenTable,
    /// Slot `i` belongs to token id `i`; slot 0 is never read
    stats: Vec<Stats>,
    config: IndexConfig,
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl NameIndex {
    /// Create an empty index.
    pub fn new(config: IndexConfig) -> Self {
        let mut index = Self {
            table: TokenTable::new(),
            stats: Vec::new(),
            config,
        };
        index.align();
        index
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Index one occurrence of `name` and return its id.
    ///
    /// With `track_stats` set, `value` (if any) is folded into the name's
    /// record and the occurrence is counted. Otherwise the name is only
    /// interned and its record is left as is.
    pub fn record_occurrence(&mut self, name: &[u8], value: Option<&[u8]>, track_stats: bool) -> u32 {
        let id = self.table.put(name);
        self.align();

        if track_stats {
            let config = &self.config;
            self.stats[id as usize].add(value, config);
        }
        id
    }

    /// Fold a value into the record of an already indexed name.
    ///
    /// Counts nothing: the occurrence was counted when the name was indexed.
    pub fn record_value(&mut self, id: u32, value: &[u8]) -> Result<()> {
        let config = &self.config;
        let size = self.table.size();
        match self.stats.get_mut(id as usize) {
            Some(stats) if id != 0 && id < size => {
                stats.fold(value, config);
                Ok(())
            }
            _ => Err(IndexError::IdOutOfRange { id, size }),
        }
    }

    /// Mark a name as having element children.
    pub fn clear_leaf(&mut self, id: u32) -> Result<()> {
        let size = self.table.size();
        match self.stats.get_mut(id as usize) {
            Some(stats) if id != 0 && id < size => {
                stats.clear_leaf();
                Ok(())
            }
            _ => Err(IndexError::IdOutOfRange { id, size }),
        }
    }

    /// Id of `name`, if it was ever indexed.
    pub fn id(&self, name: &[u8]) -> Option<u32> {
        self.table.id(name)
    }

    /// Name for an id, or `None` for an id that was never issued.
    pub fn name(&self, id: u32) -> Option<&[u8]> {
        self.table.get(id)
    }

    /// Statistics for an issued id. Untracked names report an empty record.
    pub fn stat(&self, id: u32) -> Option<&Stats> {
        if id == 0 || id >= self.table.size() {
            return None;
        }
        self.stats.get(id as usize)
    }

    /// Number of indexed names.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Exclusive upper bound of issued ids.
    pub fn size(&self) -> u32 {
        self.table.size()
    }

    /// Names with their occurrence counts, in table order.
    pub fn entries(&self, selector: EntrySelector) -> NameEntries<'_> {
        NameEntries {
            index: self,
            ids: 1..self.table.size(),
            selector,
        }
    }

    /// Human-readable summary, most frequent names first.
    ///
    /// ```text
    /// Structure: Hash
    /// Entries: 3
    ///   a  3x, numeric(1 - 5), leaf
    ///   b  1x, numeric(2 - 2), leaf
    /// ```
    pub fn report(&self) -> String {
        let width = self.table.iter().map(|(_, k)| k.len()).max().unwrap_or(0) + 2;

        let mut rows: Vec<(u32, &[u8], &Stats)> = self
            .table
            .iter()
            .filter_map(|(id, key)| self.stat(id).map(|s| (id, key, s)))
            .collect();
        // Stable sort keeps table order among equal counts
        rows.sort_by(|a, b| b.2.count().cmp(&a.2.count()));

        let mut out = String::new();
        out.push_str("Structure: Hash\n");
        out.push_str(&format!("Entries: {}\n", self.table.len()));
        for (_, key, stats) in rows {
            out.push_str("  ");
            out.push_str(&String::from_utf8_lossy(key));
            out.push_str(&" ".repeat(width - key.len()));
            out.push_str(&stats.to_string());
            out.push('\n');
        }
        out
    }

    /// Grow the stats side table to cover every issued id.
    fn align(&mut self) {
        let size = self.table.size() as usize;
        if self.stats.len() < size {
            self.stats.resize_with(size, Stats::new);
        }
        check_stats_aligned(self.table.size(), self.stats.len());
    }

    /// Whether any record differs from an empty one.
    fn tracks_any(&self) -> bool {
        let empty = Stats::new();
        self.stats.iter().skip(1).any(|s| *s != empty)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Encode the raw names stream (token table, then the stats block).
    pub fn encode(&self, buf: &mut Vec<u8>, with_stats: bool) {
        self.table.encode(buf);
        if with_stats {
            for stats in &self.stats[1..self.table.size() as usize] {
                stats.encode(buf);
            }
        }
    }

    /// Decode a raw names stream produced by [`NameIndex::encode`].
    ///
    /// Every id gets a record, so the restored side table is fully aligned.
    pub fn decode(data: &[u8], with_stats: bool, config: IndexConfig) -> Result<Self> {
        let (table, mut pos) = TokenTable::decode(data)?;

        let mut stats = Vec::with_capacity(table.size() as usize);
        stats.push(Stats::new());
        for _ in 0..table.len() {
            let record = if with_stats {
                Stats::decode(data, &mut pos)?
            } else {
                Stats::new()
            };
            stats.push(record);
        }

        if pos != data.len() {
            return Err(IndexError::Corrupt(format!(
                "{} trailing bytes after names stream",
                data.len() - pos
            )));
        }

        let index = Self {
            table,
            stats,
            config,
        };
        check_stats_aligned(index.table.size(), index.stats.len());
        Ok(index)
    }

    /// Serialize into the checksummed container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let with_stats = self.tracks_any();
        let mut payload = Vec::new();
        self.encode(&mut payload, with_stats);

        let flags = if with_stats {
            FormatFlags::new().with_stats()
        } else {
            FormatFlags::new()
        };
        let file = IndexFile::new(IndexKind::Names, flags, self.table.len() as u32, payload);
        Ok(file.to_bytes()?)
    }

    /// Restore from the checksummed container.
    pub fn from_bytes(bytes: &[u8], config: IndexConfig) -> Result<Self> {
        let file = IndexFile::from_bytes(bytes)?;
        if file.header.kind != IndexKind::Names {
            return Err(IndexError::Corrupt(format!(
                "expected a names index, found {}",
                file.header.kind
            )));
        }

        let index = Self::decode(&file.payload, file.header.flags.has_stats(), config)?;
        if index.table.len() != file.header.entry_count as usize {
            return Err(IndexError::Corrupt(format!(
                "header claims {} names, stream holds {}",
                file.header.entry_count,
                index.table.len()
            )));
        }
        Ok(index)
    }

    /// Read an index written by [`Index::write`].
    pub fn read(source: &mut dyn Read, config: IndexConfig) -> Result<Self> {
        let mut bytes = Vec::new();
        source
            .take(MAX_FILE_SIZE as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(IndexError::Io)?;

        let index = Self::from_bytes(&bytes, config)?;
        info!(names = index.len(), bytes = bytes.len(), "restored name index");
        Ok(index)
    }
}

impl Index for NameIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Names
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::none().with(Operation::Stats)
    }

    /// Every id gets a fresh, empty record. Names stay interned.
    fn init(&mut self) {
        debug!(names = self.table.len(), "resetting name statistics");
        self.stats.clear();
        self.stats
            .resize_with(self.table.size() as usize, Stats::new);
        check_stats_aligned(self.table.size(), self.stats.len());
    }

    fn entries<'a>(
        &'a self,
        selector: EntrySelector,
    ) -> Box<dyn Iterator<Item = IndexEntry<'a>> + 'a> {
        Box::new(NameIndex::entries(self, selector))
    }

    fn iter<'a>(&'a self, _token: IndexToken<'_>) -> Result<Box<dyn IndexIterator + 'a>> {
        unsupported(IndexKind::Names, Operation::Iter)
    }

    fn count(&self, _token: IndexToken<'_>) -> Result<usize> {
        unsupported(IndexKind::Names, Operation::Count)
    }

    fn info(&self) -> String {
        self.report()
    }

    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes).map_err(IndexError::Io)?;
        info!(names = self.len(), bytes = bytes.len(), "wrote name index");
        Ok(())
    }
}

/// Iterator returned by [`NameIndex::entries`].
#[derive(Debug, Clone)]
pub struct NameEntries<'a> {
    index: &'a NameIndex,
    ids: std::ops::Range<u32>,
    selector: EntrySelector,
}

impl<'a> Iterator for NameEntries<'a> {
    type Item = IndexEntry<'a>;

    fn next(&mut self) -> Option<IndexEntry<'a>> {
        let index = self.index;
        self.ids.by_ref().find_map(|id| {
            let key = index.table.get(id)?;
            if !self.selector.matches(key) {
                return None;
            }
            Some(IndexEntry {
                id,
                key,
                count: index.stat(id).map_or(0, Stats::count),
            })
        })
    }
}
