// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk order for the enrichment loop.

use core::ops::Range;

/// Remaining rows of one enrichment sweep.
///
/// A sweep walks a row range front to back when scrolling forward and back
/// to front when scrolling backward, so rows entering the viewport are
/// enriched first. A new render pass replaces the cursor rather than
/// extending it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnrichmentCursor {
    remaining: Range<usize>,
    ascending: bool,
}

impl EnrichmentCursor {
    /// Starts a sweep over `rows`.
    #[must_use]
    pub fn new(rows: Range<usize>, ascending: bool) -> Self {
        Self {
            remaining: rows,
            ascending,
        }
    }

    /// Takes the next row of the sweep.
    pub fn next_row(&mut self) -> Option<usize> {
        if self.ascending {
            self.remaining.next()
        } else {
            self.remaining.next_back()
        }
    }

    /// Rows not yet taken.
    #[must_use]
    pub fn remaining(&self) -> Range<usize> {
        self.remaining.clone()
    }

    /// Returns `true` once every row was taken.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }
}
