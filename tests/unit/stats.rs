//! Stats record tests: kind widening, bounds and sampling.

use crate::common::{names_from, names_with_config, tight_config};
use namestats::ValueKind;

#[test]
fn test_widening_integer_to_double() {
    let index = names_from(&[("n", Some("1")), ("n", Some("2")), ("n", Some("3")), ("n", Some("2.5"))]);
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.kind(), ValueKind::Double);
    assert_eq!(stats.bounds(), Some((1.0, 3.0)));
}

#[test]
fn test_non_numeric_value_clears_bounds() {
    let index = names_from(&[("n", Some("1")), ("n", Some("2.5")), ("n", Some("many"))]);
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.kind(), ValueKind::Category);
    assert_eq!(stats.bounds(), None);
    assert!(!stats.is_numeric());
}

#[test]
fn test_kind_never_narrows() {
    let index = names_from(&[("n", Some("x")), ("n", Some("1")), ("n", Some("2"))]);
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.kind(), ValueKind::Category);
    assert_eq!(stats.distinct(), Some(3));
}

#[test]
fn test_sample_saturation_becomes_text() {
    let index = names_with_config(
        &[("c", Some("red")), ("c", Some("green")), ("c", Some("red")), ("c", Some("blue"))],
        tight_config(2),
    );
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.kind(), ValueKind::Text);
    assert_eq!(stats.distinct(), None);
    assert_eq!(stats.count(), 4);
}

#[test]
fn test_repeated_values_count_occurrences() {
    let index = names_from(&[("lang", Some("en")), ("lang", Some("de")), ("lang", Some(" en "))]);
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.occurrences(b"en"), Some(2));
    assert_eq!(stats.occurrences(b"fr"), Some(0));
}

#[test]
fn test_missing_values_only_count() {
    let index = names_from(&[("e", None), ("e", None)]);
    let stats = index.stat(1).unwrap();
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.kind(), ValueKind::None);
    assert_eq!(stats.to_string(), "2x, leaf");
}
