//! Capability contract tests across index kinds.

use crate::common::{abaca, values_from};
use namestats::{Index, IndexError, IndexKind, IndexToken, Operation};

fn kinds() -> Vec<Box<dyn Index>> {
    vec![Box::new(abaca()), Box::new(values_from(&[("1", 1)]))]
}

#[test]
fn test_capabilities_predict_errors() {
    for index in kinds() {
        let caps = index.capabilities();
        let iter = index.iter(IndexToken::from("1"));
        let count = index.count(IndexToken::from("1"));
        assert_eq!(caps.supports(Operation::Iter), iter.is_ok(), "{}", index.kind());
        assert_eq!(caps.supports(Operation::Count), count.is_ok(), "{}", index.kind());
    }
}

#[test]
fn test_names_unsupported_error_shape() {
    let index = abaca();
    match index.count(IndexToken::from("a")) {
        Err(IndexError::Unsupported { kind, operation }) => {
            assert_eq!(kind, IndexKind::Names);
            assert_eq!(operation, Operation::Count);
        }
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn test_entries_through_trait() {
    for index in kinds() {
        let total: u64 = index
            .entries(namestats::EntrySelector::all())
            .map(|e| e.count)
            .sum();
        assert!(total > 0, "{}", index.kind());
    }
}

#[test]
fn test_close_is_harmless() {
    for mut index in kinds() {
        index.close();
        assert!(!index.info().is_empty());
    }
}
