//! Shared test utilities and fixtures.

#![allow(dead_code)]

use namestats::{EntrySelector, IndexConfig, NameIndex};

// Re-export canonical test utilities from namestats::testing
pub use namestats::testing::{abaca, names_from, names_with_config, tight_config, values_from};

/// A small bibliography as node events, in document order.
pub const BOOKS_JSON: &str = r#"[
    {"name": "library", "leaf": false},
    {"name": "book", "leaf": false},
    {"name": "title", "value": "Dune"},
    {"name": "year", "value": 1965},
    {"name": "price", "value": "9.99"},
    {"name": "lang", "value": "en"},
    {"name": "book", "leaf": false},
    {"name": "title", "value": "Solaris"},
    {"name": "year", "value": "1961"},
    {"name": "price", "value": 12},
    {"name": "lang", "value": "pl"},
    {"name": "book", "leaf": false},
    {"name": "title", "value": "Neuromancer"},
    {"name": "year", "value": 1984},
    {"name": "lang", "value": "en"}
]"#;

/// Collect `(name, count)` pairs from `entries()`.
pub fn entry_counts(index: &NameIndex) -> Vec<(String, u64)> {
    index
        .entries(EntrySelector::all())
        .map(|e| (e.name().into_owned(), e.count))
        .collect()
}

/// Serialize into the container and restore.
pub fn roundtrip(index: &NameIndex) -> NameIndex {
    let bytes = index.to_bytes().expect("serialize");
    NameIndex::from_bytes(&bytes, IndexConfig::default()).expect("restore")
}

/// Assert two indexes answer every name/stat query identically.
pub fn assert_same_answers(a: &NameIndex, b: &NameIndex) {
    assert_eq!(a.len(), b.len(), "name count differs");
    for id in 1..a.size() {
        assert_eq!(a.name(id), b.name(id), "name of id {} differs", id);
        assert_eq!(a.stat(id), b.stat(id), "stats of id {} differ", id);
    }
    assert_eq!(entry_counts(a), entry_counts(b));
    assert_eq!(a.report(), b.report());
}
