// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Name and value-statistics indexes for a native XML store.
//!
//! While a collection is built, every element and attribute name is interned
//! to a small permanent id, and the values seen under each name are folded
//! into a bounded statistics record (kind, numeric bounds, distinct values).
//! The query optimizer reads these records later to estimate cardinalities
//! and infer types without touching the documents again.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  token.rs   │────▶│   names.rs   │────▶│  binary/     │
//! │ (TokenTable)│     │ (NameIndex)  │     │ (IndexFile,  │
//! └─────────────┘     └──────────────┘     │  varints,    │
//!        │                   ▲             │  CRC footer) │
//!        ▼                   │             └──────────────┘
//! ┌─────────────┐     ┌──────────────┐            ▲
//! │  values.rs  │     │   stats.rs   │            │
//! │ (ValueIndex)│─────┼──────────────┼────────────┘
//! └─────────────┘     └──────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  index/  (Index trait, Capabilities, IndexIterator) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use namestats::{EntrySelector, IndexConfig, NameIndex};
//!
//! let mut names = NameIndex::new(IndexConfig::default());
//! for (name, value) in [("a", "1"), ("b", "2"), ("a", "5")] {
//!     names.record_occurrence(name.as_bytes(), Some(value.as_bytes()), true);
//! }
//!
//! let a = names.id(b"a").unwrap();
//! assert_eq!(names.stat(a).unwrap().bounds(), Some((1.0, 5.0)));
//! assert_eq!(names.entries(EntrySelector::all()).count(), 2);
//! ```

pub mod binary;
pub mod build;
pub mod config;
pub mod contracts;
pub mod error;
pub mod index;
pub mod names;
pub mod stats;
pub mod token;
pub mod values;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{
    Capabilities, EmptyIter, EntrySelector, Index, IndexEntry, IndexIterator, IndexKind,
    IndexToken, Operation, PostingIter, EMPTY,
};
pub use names::{NameEntries, NameIndex};
pub use stats::{Stats, ValueKind};
pub use token::TokenTable;
pub use values::ValueIndex;
