// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, forward-only cursors over index results.
//!
//! The evaluator pulls node ids one at a time: `more()` to ask, `next()` to
//! take. A cursor has two states, has-more and exhausted, and once `more()`
//! says false it says false forever.
//!
//! `size()` is the awkward one. Some index kinds can only count their results
//! by producing them, so the default implementation drains the cursor. To keep
//! call sites honest, every implementation (including the O(1) ones) leaves
//! the cursor exhausted after `size()`. Use `remaining()` for a non-consuming
//! answer when the kind can give one.

/// A single-pass cursor over ascending node ids.
pub trait IndexIterator {
    /// True if another result is available.
    fn more(&mut self) -> bool;

    /// The next result. Only meaningful after `more()` returned true.
    fn next(&mut self) -> u32;

    /// Count the results, exhausting the cursor.
    fn size(&mut self) -> usize {
        let mut count = 0;
        while self.more() {
            self.next();
            count += 1;
        }
        count
    }

    /// Results left, if known without consuming anything.
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Adapt into a standard iterator.
    fn into_ids(self) -> Ids<Self>
    where
        Self: Sized,
    {
        Ids(self)
    }
}

impl<I: IndexIterator + ?Sized> IndexIterator for Box<I> {
    fn more(&mut self) -> bool {
        (**self).more()
    }

    fn next(&mut self) -> u32 {
        (**self).next()
    }

    fn size(&mut self) -> usize {
        (**self).size()
    }

    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }
}

/// `Iterator` adapter returned by [`IndexIterator::into_ids`].
#[derive(Debug)]
pub struct Ids<I>(I);

impl<I: IndexIterator> Iterator for Ids<I> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.0.more() {
            Some(IndexIterator::next(&mut self.0))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.0.remaining() {
            Some(n) => (n, Some(n)),
            None => (0, None),
        }
    }
}

// ============================================================================
// EMPTY
// ============================================================================

/// The "no results" cursor. Zero-sized, so handing one out never allocates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyIter;

/// Shared empty instance.
pub const EMPTY: EmptyIter = EmptyIter;

impl IndexIterator for EmptyIter {
    fn more(&mut self) -> bool {
        false
    }

    fn next(&mut self) -> u32 {
        0
    }

    fn size(&mut self) -> usize {
        0
    }

    fn remaining(&self) -> Option<usize> {
        Some(0)
    }
}

// ============================================================================
// POSTINGS
// ============================================================================

/// Cursor over a precomputed, borrowed result slice.
#[derive(Debug, Clone)]
pub struct PostingIter<'a> {
    ids: &'a [u32],
    pos: usize,
}

impl<'a> PostingIter<'a> {
    pub fn new(ids: &'a [u32]) -> Self {
        Self { ids, pos: 0 }
    }
}

impl IndexIterator for PostingIter<'_> {
    fn more(&mut self) -> bool {
        self.pos < self.ids.len()
    }

    fn next(&mut self) -> u32 {
        match self.ids.get(self.pos) {
            Some(&id) => {
                self.pos += 1;
                id
            }
            None => 0,
        }
    }

    fn size(&mut self) -> usize {
        let n = self.ids.len() - self.pos;
        self.pos = self.ids.len();
        n
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.ids.len() - self.pos)
    }
}
