// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build pipeline: node events in, persisted index files out.
//!
//! The document walker is someone else's job. It hands over a flat JSON array
//! of [`NodeEvent`]s in document order, and the position of an event in that
//! array is its node id.

pub mod event;

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::Index;
use crate::names::NameIndex;
use crate::stats::trim_xml_ws;
use crate::values::ValueIndex;

pub use event::*;

/// Indexes produced by one build pass.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub names: NameIndex,
    pub values: ValueIndex,
}

/// Parse a JSON array of node events.
pub fn parse_events(json: &str) -> Result<Vec<NodeEvent>> {
    serde_json::from_str(json).map_err(|e| IndexError::Input(e.to_string()))
}

/// Read and parse an events file.
pub fn load_events(path: &Path) -> Result<Vec<NodeEvent>> {
    let content = fs::read_to_string(path).map_err(IndexError::Io)?;
    parse_events(&content)
}

/// Run the single build pass over `events`.
pub fn build_indexes(events: &[NodeEvent], config: &IndexConfig) -> Result<BuildOutput> {
    if events.len() > u32::MAX as usize {
        return Err(IndexError::Input(format!(
            "{} events exceed the node id space",
            events.len()
        )));
    }

    let track = config.track_stats;
    let mut names = NameIndex::new(config.clone());
    let mut values = ValueIndex::new();

    for (node, event) in events.iter().enumerate() {
        let value = event.value.as_ref().map(EventValue::as_text);
        let value = value.as_deref().map(str::as_bytes);
        let id = names.record_occurrence(event.name.as_bytes(), value, track);

        if track && !event.leaf {
            names.clear_leaf(id)?;
        }
        // Same normalization the stats apply: trimmed, blanks skipped
        if let Some(value) = value.map(trim_xml_ws).filter(|v| !v.is_empty()) {
            values.add(value, node as u32);
        }
    }

    info!(
        events = events.len(),
        names = names.len(),
        values = values.len(),
        "build pass complete"
    );
    Ok(BuildOutput { names, values })
}

/// Summary of a finished build, for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub events: usize,
    pub names: usize,
    pub values: usize,
    pub bytes: usize,
}

/// Build from an events file and write the name index (and optionally the
/// value index) to disk.
pub fn run_build(
    input: &Path,
    output: &Path,
    values_output: Option<&Path>,
    config: &IndexConfig,
) -> Result<BuildSummary> {
    let events = load_events(input)?;
    if events.is_empty() {
        warn!(input = %input.display(), "no node events; writing an empty index");
    }

    let built = build_indexes(&events, config)?;

    let mut buf = Vec::new();
    built.names.write(&mut buf)?;
    fs::write(output, &buf).map_err(IndexError::Io)?;
    let bytes = buf.len();

    if let Some(path) = values_output {
        let mut buf = Vec::new();
        built.values.write(&mut buf)?;
        fs::write(path, &buf).map_err(IndexError::Io)?;
    }

    Ok(BuildSummary {
        events: events.len(),
        names: built.names.len(),
        values: built.values.len(),
        bytes,
    })
}
