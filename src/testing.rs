// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::config::IndexConfig;
use crate::names::NameIndex;
use crate::values::ValueIndex;

/// Build a name index from `(name, value)` events with stats tracking on.
pub fn names_from(events: &[(&str, Option<&str>)]) -> NameIndex {
    names_with_config(events, IndexConfig::default())
}

/// Like [`names_from`], with an explicit configuration.
pub fn names_with_config(events: &[(&str, Option<&str>)], config: IndexConfig) -> NameIndex {
    let mut index = NameIndex::new(config);
    for (name, value) in events {
        index.record_occurrence(name.as_bytes(), value.map(str::as_bytes), true);
    }
    index
}

/// The five-event walkthrough: names `a b a c a` carrying values `1..=5`.
pub fn abaca() -> NameIndex {
    names_from(&[
        ("a", Some("1")),
        ("b", Some("2")),
        ("a", Some("3")),
        ("c", Some("4")),
        ("a", Some("5")),
    ])
}

/// Build a value index from `(value, node)` pairs.
pub fn values_from(pairs: &[(&str, u32)]) -> ValueIndex {
    let mut index = ValueIndex::new();
    for (value, node) in pairs {
        index.add(value.as_bytes(), *node);
    }
    index
}

/// A config with a tiny sample cap, for exercising saturation.
pub fn tight_config(max_categories: usize) -> IndexConfig {
    IndexConfig {
        max_categories,
        ..IndexConfig::default()
    }
}
