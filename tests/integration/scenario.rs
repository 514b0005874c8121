//! The `a b a c a` walkthrough, end to end.

use crate::common::{abaca, entry_counts, roundtrip};
use namestats::{Index, ValueKind};

#[test]
fn test_walkthrough_ids() {
    let index = abaca();
    assert_eq!(index.id(b"a"), Some(1));
    assert_eq!(index.id(b"b"), Some(2));
    assert_eq!(index.id(b"c"), Some(3));
}

#[test]
fn test_walkthrough_stats() {
    let index = abaca();
    let a = index.stat(1).unwrap();
    assert_eq!(a.count(), 3);
    assert_eq!(a.kind(), ValueKind::Integer);
    assert_eq!(a.bounds(), Some((1.0, 5.0)));
    assert_eq!(a.to_string(), "3x, numeric(1 - 5), leaf");
}

#[test]
fn test_walkthrough_entries() {
    let index = abaca();
    assert_eq!(
        entry_counts(&index),
        vec![("a".to_string(), 3), ("b".to_string(), 1), ("c".to_string(), 1)]
    );
}

#[test]
fn test_walkthrough_survives_restore() {
    let index = abaca();
    let restored = roundtrip(&index);
    assert_eq!(entry_counts(&restored), entry_counts(&index));
    assert_eq!(restored.info(), index.info());
}
