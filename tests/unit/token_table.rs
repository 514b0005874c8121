//! Token table tests: interning, lookups and growth.

use namestats::TokenTable;

#[test]
fn test_ids_are_dense_and_one_based() {
    let mut table = TokenTable::new();
    let ids: Vec<u32> = ["doc", "title", "para", "title", "doc"]
        .iter()
        .map(|k| table.put(k.as_bytes()))
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 2, 1]);
    assert_eq!(table.size(), 4);
}

#[test]
fn test_lookup_does_not_intern() {
    let mut table = TokenTable::new();
    table.put(b"a");
    assert_eq!(table.id(b"b"), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_binary_keys() {
    let mut table = TokenTable::new();
    let a = table.put(&[0, 159, 146, 150]);
    let b = table.put(&[0]);
    assert_ne!(a, b);
    assert_eq!(table.key(a), &[0, 159, 146, 150]);
}

#[test]
fn test_preallocated_table_does_not_grow() {
    let mut table = TokenTable::with_capacity(100);
    let before = table.capacity();
    for i in 0..100 {
        table.put(format!("k{}", i).as_bytes());
    }
    assert_eq!(table.capacity(), before);
}

#[test]
fn test_iter_matches_ids_after_growth() {
    let mut table = TokenTable::new();
    for i in 0..300 {
        table.put(format!("name-{}", i).as_bytes());
    }
    for (id, key) in table.iter() {
        assert_eq!(table.id(key), Some(id));
    }
    assert_eq!(table.iter().len(), 300);
}
