// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The capability contract shared by every index kind.
//!
//! Index kinds are structurally different. The name index knows which names
//! exist and how often; the value index knows which nodes carry a given value.
//! They still sit behind one trait so the planner can treat them uniformly,
//! and each kind advertises what it can actually do through [`Capabilities`].
//!
//! Asking a kind for an operation it doesn't support is a caller bug and
//! returns [`IndexError::Unsupported`]. It never returns an empty result,
//! because "no documents contain X" and "I can't answer that" lead the
//! planner to very different plans. Check `capabilities()` first.

pub mod iterator;

pub use iterator::{EmptyIter, Ids, IndexIterator, PostingIter, EMPTY};

use std::fmt;
use std::io::Write;

use crate::error::{IndexError, Result};

// ============================================================================
// KINDS AND OPERATIONS
// ============================================================================

/// The index kinds this crate knows how to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Element/attribute names with value statistics
    Names,
    /// Leaf values with the nodes that carry them
    Values,
}

impl IndexKind {
    /// Tag byte in the file header.
    pub fn tag(self) -> u8 {
        match self {
            IndexKind::Names => 1,
            IndexKind::Values => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(IndexKind::Names),
            2 => Some(IndexKind::Values),
            _ => None,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Names => "names",
            IndexKind::Values => "values",
        })
    }
}

/// Optional operations of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Look up the nodes matching a token
    Iter,
    /// Count the nodes matching a token
    Count,
    /// Per-id statistics for the optimizer
    Stats,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Iter => "iter",
            Operation::Count => "count",
            Operation::Stats => "stats",
        })
    }
}

/// Set of optional operations an index kind supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities(u8);

impl Capabilities {
    const ITER: u8 = 0b0000_0001;
    const COUNT: u8 = 0b0000_0010;
    const STATS: u8 = 0b0000_0100;

    pub fn none() -> Self {
        Self(0)
    }

    pub fn with(mut self, op: Operation) -> Self {
        self.0 |= Self::bit(op);
        self
    }

    pub fn supports(self, op: Operation) -> bool {
        self.0 & Self::bit(op) != 0
    }

    fn bit(op: Operation) -> u8 {
        match op {
            Operation::Iter => Self::ITER,
            Operation::Count => Self::COUNT,
            Operation::Stats => Self::STATS,
        }
    }
}

/// Build the error for an operation a kind doesn't implement.
pub fn unsupported<T>(kind: IndexKind, operation: Operation) -> Result<T> {
    Err(IndexError::Unsupported { kind, operation })
}

// ============================================================================
// LOOKUP TYPES
// ============================================================================

/// A lookup key handed to `iter`/`count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexToken<'a> {
    value: &'a [u8],
}

impl<'a> IndexToken<'a> {
    pub fn new(value: &'a [u8]) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &'a [u8] {
        self.value
    }
}

impl<'a> From<&'a str> for IndexToken<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

/// Restricts which keys `entries` enumerates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySelector {
    prefix: Vec<u8>,
}

impl EntrySelector {
    /// Every key.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keys starting with `prefix`.
    pub fn prefix(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.to_vec(),
        }
    }

    pub fn matches(&self, key: &[u8]) -> bool {
        key.starts_with(&self.prefix)
    }
}

/// One key of an index together with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry<'a> {
    pub id: u32,
    pub key: &'a [u8],
    pub count: u64,
}

impl IndexEntry<'_> {
    /// Key as text, replacing invalid UTF-8.
    pub fn name(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.key)
    }
}

// ============================================================================
// THE CONTRACT
// ============================================================================

/// Operations every index kind exposes.
pub trait Index {
    fn kind(&self) -> IndexKind;

    /// Optional operations this kind implements.
    fn capabilities(&self) -> Capabilities;

    /// Reset transient per-build state, keeping interned keys.
    fn init(&mut self);

    /// Keys with their occurrence counts, in table order.
    fn entries<'a>(&'a self, selector: EntrySelector) -> Box<dyn Iterator<Item = IndexEntry<'a>> + 'a>;

    /// Nodes matching `token`.
    fn iter<'a>(&'a self, token: IndexToken<'_>) -> Result<Box<dyn IndexIterator + 'a>>;

    /// Number of nodes matching `token`.
    fn count(&self, token: IndexToken<'_>) -> Result<usize>;

    /// Operator-facing diagnostics.
    fn info(&self) -> String;

    /// Persist to `sink` in the checksummed container format.
    fn write(&self, sink: &mut dyn Write) -> Result<()>;

    /// Release external resources. Kinds holding none keep the default.
    fn close(&mut self) {}
}
