// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for index operations.
//!
//! The variants mean very different things to the caller. `Unsupported` and
//! `IdOutOfRange` are caller bugs: the planner asked an index kind for
//! something it cannot do, or handed back an id that never came out of the
//! token table. `Corrupt` means the persisted bytes are bad and the index
//! should be treated as absent. `Config` and `Input` reject what the operator
//! fed the build. `Io` is passed through untouched.

use std::io;

use thiserror::Error;

use crate::index::{IndexKind, Operation};

#[derive(Error, Debug)]
pub enum IndexError {
    /// The index kind does not implement this operation.
    #[error("{kind} index does not support {operation}")]
    Unsupported {
        kind: IndexKind,
        operation: Operation,
    },

    /// The id was never issued by the token table (or has no stats record).
    #[error("id {id} out of range (valid ids are 1..{size})")]
    IdOutOfRange { id: u32, size: u32 },

    /// Persisted data is truncated, inconsistent or of an unknown shape.
    #[error("corrupt index: {0}")]
    Corrupt(String),

    /// Configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Build input (node events) could not be parsed.
    #[error("invalid input: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for IndexError {
    /// Decoder errors (`InvalidData`, `UnexpectedEof`) are data problems, not
    /// device problems, so they surface as `Corrupt`.
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                IndexError::Corrupt(err.to_string())
            }
            _ => IndexError::Io(err),
        }
    }
}

impl IndexError {
    /// True for errors that indicate damaged persisted data.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, IndexError::Corrupt(_))
    }

    /// True for caller-contract violations.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, IndexError::Unsupported { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
