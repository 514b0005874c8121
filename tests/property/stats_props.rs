//! Stats record properties.
//!
//! - Kind only widens
//! - Count never decreases and equals the number of tracked occurrences
//! - Bounds are ordered and contain every numeric value while numeric
//! - The sample never exceeds the configured cap

use proptest::prelude::*;
use namestats::{IndexConfig, Stats, ValueKind};

/// Mix of integers, doubles, categories and long strings.
fn value_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => (-1000i64..1000).prop_map(|i| Some(i.to_string())),
        2 => (-1e6f64..1e6).prop_map(|d| Some(format!("{:.3}", d))),
        2 => prop::sample::select(vec!["red", "green", "blue", "  ", "n/a"])
            .prop_map(|s| Some(s.to_string())),
        1 => "[a-z]{1,200}".prop_map(Some),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: the kind sequence is monotonically non-decreasing.
    #[test]
    fn prop_kind_only_widens(values in prop::collection::vec(value_strategy(), 1..60)) {
        let config = IndexConfig::default();
        let mut stats = Stats::new();
        let mut prev = ValueKind::None;
        for value in &values {
            stats.add(value.as_deref().map(str::as_bytes), &config);
            prop_assert!(stats.kind() >= prev, "{:?} narrowed to {:?}", prev, stats.kind());
            prev = stats.kind();
        }
        prop_assert_eq!(stats.count(), values.len() as u64);
    }

    /// Property: numeric bounds contain every value seen.
    #[test]
    fn prop_bounds_contain_values(values in prop::collection::vec(-10_000i64..10_000, 1..80)) {
        let config = IndexConfig::default();
        let mut stats = Stats::new();
        for v in &values {
            stats.add(Some(v.to_string().as_bytes()), &config);
        }
        let (min, max) = stats.bounds().unwrap();
        prop_assert_eq!(stats.kind(), ValueKind::Integer);
        prop_assert_eq!(min, *values.iter().min().unwrap() as f64);
        prop_assert_eq!(max, *values.iter().max().unwrap() as f64);
    }

    /// Property: the sample never exceeds the cap and exceeding it is not an error.
    #[test]
    fn prop_sample_cap_respected(
        cap in 1usize..20,
        values in prop::collection::vec("[a-f]{1,3}", 1..200),
    ) {
        let config = IndexConfig { max_categories: cap, ..IndexConfig::default() };
        let mut stats = Stats::new();
        for v in &values {
            stats.add(Some(v.as_bytes()), &config);
            if let Some(n) = stats.distinct() {
                prop_assert!(n <= cap);
            }
        }
        let distinct = values.iter().collect::<std::collections::HashSet<_>>().len();
        if distinct <= cap {
            prop_assert_eq!(stats.distinct(), Some(distinct));
            prop_assert_eq!(stats.kind(), ValueKind::Category);
        } else {
            prop_assert_eq!(stats.kind(), ValueKind::Text);
        }
    }
}
