//! Token table properties.
//!
//! - Ids are stable across any number of growth-triggering insertions
//! - Every (id, key) pair survives every rehash
//! - The load factor never exceeds 1/2

use proptest::prelude::*;
use namestats::TokenTable;
use std::collections::HashMap;

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: put returns the first id ever assigned to a key.
    #[test]
    fn prop_ids_are_stable(keys in prop::collection::vec(key_strategy(), 1..400)) {
        let mut table = TokenTable::new();
        let mut first: HashMap<Vec<u8>, u32> = HashMap::new();
        for key in &keys {
            let id = table.put(key);
            let expected = *first.entry(key.clone()).or_insert(id);
            prop_assert_eq!(id, expected);
        }
        prop_assert_eq!(table.len(), first.len());
    }

    /// Property: the full id→key mapping is intact after every insertion.
    #[test]
    fn prop_growth_preserves_mapping(keys in prop::collection::vec(key_strategy(), 1..120)) {
        let mut table = TokenTable::new();
        let mut seen: Vec<(u32, Vec<u8>)> = Vec::new();
        for key in &keys {
            let before = table.len();
            let id = table.put(key);
            if table.len() > before {
                seen.push((id, key.clone()));
            }
            for (id, key) in &seen {
                prop_assert_eq!(table.key(*id), key.as_slice());
                prop_assert_eq!(table.id(key), Some(*id));
            }
        }
    }

    /// Property: buckets stay at most half full.
    #[test]
    fn prop_load_factor_bounded(n in 0usize..2000) {
        let mut table = TokenTable::new();
        for i in 0..n {
            table.put(&(i as u32).to_le_bytes());
        }
        prop_assert!(table.len() * 2 <= table.capacity());
        prop_assert!(table.capacity().is_power_of_two());
    }

    /// Property: the codec restores the same ids for the same keys.
    #[test]
    fn prop_codec_preserves_ids(keys in prop::collection::vec(key_strategy(), 0..100)) {
        let mut table = TokenTable::new();
        for key in &keys {
            table.put(key);
        }
        let mut buf = Vec::new();
        table.encode(&mut buf);
        let (decoded, consumed) = TokenTable::decode(&buf).unwrap();
        prop_assert_eq!(consumed, buf.len());
        for (id, key) in table.iter() {
            prop_assert_eq!(decoded.id(key), Some(id));
        }
    }
}
