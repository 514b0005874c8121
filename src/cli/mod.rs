// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the namestats command-line interface.
//!
//! Three subcommands: `build` to turn a node-event stream into index files,
//! `inspect` to check and summarize a `.nmst` file, and `stat` to print the
//! statistics of a single name.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "namestats",
    about = "Name and value-statistics index builder for XML collections",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a name index from a JSON array of node events
    Build {
        /// Events file: [{"name": ..., "value": ..., "leaf": ...}, ...]
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the name index (.nmst)
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the value index to this path
        #[arg(long)]
        values: Option<PathBuf>,

        /// JSON configuration file (maxCategories, maxValueLen, trackStats)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Intern names only, without value statistics
        #[arg(long)]
        no_stats: bool,
    },

    /// Verify and summarize an index file
    Inspect {
        /// Path to .nmst file
        file: PathBuf,
    },

    /// Print the statistics of one name
    Stat {
        /// Path to a name index file
        file: PathBuf,

        /// Element or attribute name
        name: String,

        /// Print the sampled values as well
        #[arg(long)]
        sample: bool,
    },
}
