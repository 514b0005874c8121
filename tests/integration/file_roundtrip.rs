//! Build from an events file, write to disk, read back.

use std::fs;

use crate::common::{assert_same_answers, BOOKS_JSON};
use namestats::build::{build_indexes, parse_events, run_build};
use namestats::{
    EntrySelector, Index, IndexConfig, IndexToken, NameIndex, ValueIndex, ValueKind,
};
use tempfile::TempDir;

#[test]
fn test_run_build_writes_readable_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("events.json");
    let output = dir.path().join("names.nmst");
    let values = dir.path().join("values.nmst");
    fs::write(&input, BOOKS_JSON).unwrap();

    let summary = run_build(&input, &output, Some(&values), &IndexConfig::default()).unwrap();
    assert_eq!(summary.events, 15);
    assert_eq!(summary.names, 6);
    assert_eq!(summary.bytes, fs::metadata(&output).unwrap().len() as usize);

    let mut file = fs::File::open(&output).unwrap();
    let names = NameIndex::read(&mut file, IndexConfig::default()).unwrap();
    let year = names.stat(names.id(b"year").unwrap()).unwrap();
    assert_eq!(year.kind(), ValueKind::Integer);
    assert_eq!(year.bounds(), Some((1961.0, 1984.0)));

    let price = names.stat(names.id(b"price").unwrap()).unwrap();
    assert_eq!(price.kind(), ValueKind::Double);

    let book = names.stat(names.id(b"book").unwrap()).unwrap();
    assert!(!book.is_leaf());
    assert_eq!(book.count(), 3);

    let mut file = fs::File::open(&values).unwrap();
    let values = ValueIndex::read(&mut file).unwrap();
    assert_eq!(values.count(IndexToken::from("en")).unwrap(), 2);
}

#[test]
fn test_written_file_matches_memory() {
    let events = parse_events(BOOKS_JSON).unwrap();
    let built = build_indexes(&events, &IndexConfig::default()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("names.nmst");
    let mut file = fs::File::create(&path).unwrap();
    built.names.write(&mut file).unwrap();
    drop(file);

    let restored = NameIndex::read(&mut fs::File::open(&path).unwrap(), IndexConfig::default()).unwrap();
    assert_same_answers(&built.names, &restored);
    assert_eq!(restored.report(), built.names.report());
}

#[test]
fn test_no_stats_build_restores_empty_records() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("events.json");
    let output = dir.path().join("names.nmst");
    fs::write(&input, BOOKS_JSON).unwrap();

    let config = IndexConfig {
        track_stats: false,
        ..IndexConfig::default()
    };
    run_build(&input, &output, None, &config).unwrap();

    let restored = NameIndex::from_bytes(&fs::read(&output).unwrap(), IndexConfig::default()).unwrap();
    assert_eq!(restored.len(), 6);
    for entry in restored.entries(EntrySelector::all()) {
        assert_eq!(entry.count, 0);
        assert!(restored.stat(entry.id).is_some());
    }
}

#[test]
fn test_config_file_caps_sample() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("config.json");
    fs::write(&cfg, r#"{"maxCategories": 1}"#).unwrap();
    let config = IndexConfig::load(&cfg).unwrap();

    let events = parse_events(BOOKS_JSON).unwrap();
    let built = build_indexes(&events, &config).unwrap();
    let lang = built.names.stat(built.names.id(b"lang").unwrap()).unwrap();
    assert_eq!(lang.kind(), ValueKind::Text);
}
