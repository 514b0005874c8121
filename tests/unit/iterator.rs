//! Iterator contract tests through the `Index` trait.

use crate::common::values_from;
use namestats::{Index, IndexIterator, IndexToken, EMPTY};

#[test]
fn test_exhaustion_is_terminal() {
    let index = values_from(&[("v", 1), ("v", 2)]);
    let mut it = index.iter(IndexToken::from("v")).unwrap();
    while it.more() {
        it.next();
    }
    assert!(!it.more());
    assert!(!it.more());
    assert_eq!(it.size(), 0);
}

#[test]
fn test_size_on_fresh_iterator_exhausts() {
    let index = values_from(&[("v", 3), ("v", 8), ("v", 13)]);
    let mut it = index.iter(IndexToken::from("v")).unwrap();
    assert_eq!(it.remaining(), Some(3));
    assert_eq!(it.size(), 3);
    assert!(!it.more());
}

#[test]
fn test_empty_singleton() {
    let mut empty = EMPTY;
    assert!(!empty.more());
    assert_eq!(std::mem::size_of_val(&empty), 0);

    let index = values_from(&[]);
    let mut it = index.iter(IndexToken::from("missing")).unwrap();
    assert_eq!(it.size(), 0);
}

#[test]
fn test_into_ids_collects_in_order() {
    let index = values_from(&[("v", 9), ("v", 2), ("v", 5)]);
    let ids: Vec<u32> = index
        .iter(IndexToken::from("v"))
        .unwrap()
        .into_ids()
        .collect();
    assert_eq!(ids, vec![2, 5, 9]);
}
