// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index structures.
//!
//! Debug-mode assertions for the invariants the rest of the crate relies on.
//! They compile to nothing in release builds.
//!
//! | Contract                     | Invariant                                         |
//! |------------------------------|---------------------------------------------------|
//! | `check_stats_aligned`        | every issued name id has a stats slot             |
//! | `check_postings_ascending`   | posting lists are strictly ascending              |
//! | `check_bounds_ordered`       | numeric bounds satisfy `min <= max`               |
//!
//! # Usage
//!
//! ```ignore
//! use namestats::contracts::*;
//!
//! // In debug builds, this panics if the side table fell behind
//! check_stats_aligned(table.size(), stats.len());
//! ```

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// The token table grows by doubling a power-of-two bucket array.
const _: () = assert!(crate::token::INITIAL_BUCKETS.is_power_of_two());

// ============================================================================
// SIDE TABLE CONTRACTS
// ============================================================================

/// Check that the stats side table covers every issued id.
///
/// # Panics (debug builds only)
/// Panics if `stats_len` is smaller than the table's exclusive id bound.
#[inline]
pub fn check_stats_aligned(table_size: u32, stats_len: usize) {
    debug_assert!(
        stats_len >= table_size as usize,
        "Contract violation: stats side table has {} slots for {} ids",
        stats_len,
        table_size
    );
}

// ============================================================================
// POSTINGS CONTRACTS
// ============================================================================

/// Check that a posting list is strictly ascending.
///
/// # Panics (debug builds only)
/// Panics if any pair is out of order or duplicated.
#[inline]
pub fn check_postings_ascending(ids: &[u32]) {
    debug_assert!(
        ids.windows(2).all(|pair| pair[0] < pair[1]),
        "Contract violation: postings not strictly ascending: {:?}",
        ids
    );
}

// ============================================================================
// STATS CONTRACTS
// ============================================================================

/// Check that numeric bounds are ordered and finite.
#[inline]
pub fn check_bounds_ordered(bounds: Option<(f64, f64)>) {
    if let Some((min, max)) = bounds {
        debug_assert!(
            min.is_finite() && max.is_finite() && min <= max,
            "Contract violation: numeric bounds {} - {}",
            min,
            max
        );
    }
}
