//! Persistence properties.
//!
//! - Any build stream round-trips to identical answers
//! - Any single flipped byte is detected

use crate::common::{assert_same_answers, roundtrip};
use proptest::prelude::*;
use namestats::{IndexConfig, NameIndex};

fn event_strategy() -> impl Strategy<Value = (String, Option<String>, bool)> {
    (
        prop::sample::select(vec!["a", "b", "item", "@id", "price", "日本"]),
        prop::option::of(prop_oneof!["[0-9]{1,4}", "[a-z]{1,5}", Just("1.5".to_string())]),
        any::<bool>(),
    )
        .prop_map(|(n, v, t)| (n.to_string(), v, t))
}

fn build(events: &[(String, Option<String>, bool)]) -> NameIndex {
    let mut index = NameIndex::new(IndexConfig::default());
    for (name, value, track) in events {
        index.record_occurrence(name.as_bytes(), value.as_deref().map(str::as_bytes), *track);
    }
    index
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: restore yields the same stat(id) and entries() as the original.
    #[test]
    fn prop_roundtrip_same_answers(events in prop::collection::vec(event_strategy(), 0..100)) {
        let index = build(&events);
        let restored = roundtrip(&index);
        assert_same_answers(&index, &restored);
    }

    /// Property: names interned without tracking answer the same after restore.
    #[test]
    fn prop_untracked_names_restore_unchanged(
        events in prop::collection::vec(event_strategy(), 1..60),
    ) {
        let index = build(&events);
        let restored = roundtrip(&index);
        for (name, _, _) in &events {
            let id = index.id(name.as_bytes()).unwrap();
            prop_assert_eq!(restored.stat(id), index.stat(id));
            prop_assert!(index.stat(id).is_some());
        }
        prop_assert_eq!(restored.report(), index.report());
    }

    /// Property: flipping any byte makes restore fail instead of lying.
    #[test]
    fn prop_bit_flip_detected(
        events in prop::collection::vec(event_strategy(), 1..40),
        pos in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let index = build(&events);
        let mut bytes = index.to_bytes().unwrap();
        let i = pos.index(bytes.len());
        bytes[i] ^= mask;
        prop_assert!(NameIndex::from_bytes(&bytes, IndexConfig::default()).is_err());
    }
}
