// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell enrichment status.

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Enrichment status of one cell. A cell with no record is unprocessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostStatus {
    /// The enrichment callback ran and its result is current.
    Rendered,
    /// The result is stale; the callback must clean up before re-running.
    PendingCleanup,
}

/// Status records of one row, keyed by column index.
pub type RowRecords = SmallVec<[(usize, PostStatus); 4]>;

/// Enrichment status of every processed cell, grouped by row.
#[derive(Clone, Debug, Default)]
pub struct PostProcessLedger {
    rows: HashMap<usize, RowRecords>,
}

impl PostProcessLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of one cell.
    #[must_use]
    pub fn status(&self, row: usize, column: usize) -> Option<PostStatus> {
        self.rows
            .get(&row)?
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, s)| *s)
    }

    /// Records that enrichment ran for a cell.
    pub fn mark_rendered(&mut self, row: usize, column: usize) {
        let records = self.rows.entry(row).or_default();
        match records.iter_mut().find(|(c, _)| *c == column) {
            Some((_, status)) => *status = PostStatus::Rendered,
            None => records.push((column, PostStatus::Rendered)),
        }
    }

    /// Returns `true` if any cell of `row` has a record.
    #[must_use]
    pub fn has_row(&self, row: usize) -> bool {
        self.rows.get(&row).is_some_and(|r| !r.is_empty())
    }

    /// Removes and returns the records of `row`.
    pub fn take_row(&mut self, row: usize) -> Option<RowRecords> {
        self.rows.remove(&row).filter(|r| !r.is_empty())
    }

    /// Removes the record of one cell.
    pub fn remove_cell(&mut self, row: usize, column: usize) -> Option<PostStatus> {
        let records = self.rows.get_mut(&row)?;
        let index = records.iter().position(|(c, _)| *c == column)?;
        let (_, status) = records.remove(index);
        if records.is_empty() {
            self.rows.remove(&row);
        }
        Some(status)
    }

    /// Flips `Rendered` records to `PendingCleanup`.
    ///
    /// `None` matches every row or column. Returns the number of records
    /// flipped.
    pub fn invalidate(&mut self, row: Option<usize>, column: Option<usize>) -> usize {
        let mut flipped = 0;
        for (r, records) in &mut self.rows {
            if row.is_some_and(|want| want != *r) {
                continue;
            }
            for (c, status) in records.iter_mut() {
                if column.is_some_and(|want| want != *c) {
                    continue;
                }
                if *status == PostStatus::Rendered {
                    *status = PostStatus::PendingCleanup;
                    flipped += 1;
                }
            }
        }
        flipped
    }

    /// Drops records of rows for which `keep` returns `false`.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.rows.retain(|row, _| keep(*row));
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of rows with at least one record.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
