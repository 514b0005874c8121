// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use namestats::binary::{FileFooter, FileHeader};
use namestats::build::run_build;
use namestats::{Index, IndexConfig, IndexError, IndexKind, NameIndex, ValueIndex};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("namestats=info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build {
            input,
            output,
            values,
            config,
            no_stats,
        } => build(&input, &output, values.as_deref(), config.as_deref(), no_stats),
        Commands::Inspect { file } => inspect(&file),
        Commands::Stat { file, name, sample } => stat(&file, &name, sample),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", styled(&[RED, BOLD], "error:"), e);
            ExitCode::FAILURE
        }
    }
}

fn build(
    input: &Path,
    output: &Path,
    values: Option<&Path>,
    config: Option<&Path>,
    no_stats: bool,
) -> Result<(), IndexError> {
    let mut config = match config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::default(),
    };
    if no_stats {
        config.track_stats = false;
    }

    let summary = run_build(input, output, values, &config)?;
    println!(
        "{} {} events, {} names, {} values → {} ({})",
        status(true),
        summary.events,
        summary.names,
        summary.values,
        output.display(),
        format_size(summary.bytes)
    );
    Ok(())
}

fn inspect(path: &Path) -> Result<(), IndexError> {
    let bytes = fs::read(path).map_err(IndexError::Io)?;

    // Show what the envelope says before trusting it
    let header = FileHeader::read(&mut Cursor::new(&bytes))?;
    let footer = FileFooter::read(&bytes)?;
    let content = &bytes[..bytes.len() - FileFooter::SIZE];
    let crc_ok = footer.crc32 == FileFooter::compute_crc32(content);

    section_top(&path.display().to_string());
    field("kind", &header.kind.to_string());
    field("version", &header.version.to_string());
    field("entries", &header.entry_count.to_string());
    field("payload", &format_size(header.payload_len as usize));
    field("stats", &status(header.flags.has_stats()));
    field("size", &format_size(bytes.len()));
    field(
        "crc32",
        &format!("{:#010x} {}", footer.crc32, status(crc_ok)),
    );

    let report = match header.kind {
        IndexKind::Names => NameIndex::from_bytes(&bytes, IndexConfig::default())?.info(),
        IndexKind::Values => ValueIndex::from_bytes(&bytes)?.info(),
    };
    section_mid("report");
    for line in report.lines() {
        row(line);
    }
    section_bot();
    Ok(())
}

fn stat(path: &Path, name: &str, sample: bool) -> Result<(), IndexError> {
    let bytes = fs::read(path).map_err(IndexError::Io)?;
    let index = NameIndex::from_bytes(&bytes, IndexConfig::default())?;

    let id = index
        .id(name.as_bytes())
        .ok_or_else(|| IndexError::Input(format!("name {:?} is not indexed", name)))?;
    let stats = index.stat(id).ok_or(IndexError::IdOutOfRange {
        id,
        size: index.size(),
    })?;

    println!("{} (id {}) {}: {}", name, id, kind_badge(stats.kind()), stats);
    if sample {
        if let Some(values) = stats.sample() {
            for (value, n) in values {
                println!("  {}  {}", pad_left(&n.to_string(), 8), String::from_utf8_lossy(value));
            }
        }
    }
    Ok(())
}
