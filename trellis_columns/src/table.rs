// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned, versioned column table.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::autosize::{AutosizeOutcome, autosize};
use crate::column::{Column, ColumnDefaults, ColumnSpec};
use crate::positions::PositionTable;
use crate::resolve::{distribute_width, resolve_column};

/// Resolved columns plus their derived position table.
///
/// Columns are only changed through the methods below. Each effective change
/// bumps [`version`](Self::version) and rebuilds the [`PositionTable`], so a
/// consumer that remembers the version it last saw knows whether anything it
/// derived from the table is stale.
#[derive(Clone, Debug)]
pub struct ColumnTable {
    columns: Vec<Column>,
    by_id: HashMap<String, usize>,
    positions: PositionTable,
    defaults: ColumnDefaults,
    version: u64,
}

impl ColumnTable {
    /// Resolves `specs` against `defaults`.
    ///
    /// Duplicate ids are kept; lookups by id return the first occurrence.
    pub fn new(specs: impl IntoIterator<Item = ColumnSpec>, defaults: &ColumnDefaults) -> Self {
        let mut table = Self {
            columns: Vec::new(),
            by_id: HashMap::new(),
            positions: PositionTable::default(),
            defaults: *defaults,
            version: 0,
        };
        table.install(specs);
        table
    }

    fn install(&mut self, specs: impl IntoIterator<Item = ColumnSpec>) {
        self.columns = specs
            .into_iter()
            .map(|s| resolve_column(&s, &self.defaults))
            .collect();
        self.by_id.clear();
        for (i, c) in self.columns.iter().enumerate() {
            self.by_id.entry(c.id.clone()).or_insert(i);
        }
        self.commit();
    }

    fn commit(&mut self) {
        self.positions = PositionTable::from_widths(self.columns.iter().map(|c| c.width));
        self.version += 1;
        log::debug!(
            "column table v{}: {} columns, {} px",
            self.version,
            self.columns.len(),
            self.positions.total_width()
        );
    }

    /// Replaces every column. Always produces a new version.
    pub fn replace(&mut self, specs: impl IntoIterator<Item = ColumnSpec>) {
        self.install(specs);
    }

    /// Distributes free space so the columns fill `available` pixels.
    ///
    /// See [`distribute_width`] for the exact rules. Returns `true` if a new
    /// version was produced.
    pub fn resolve_to(&mut self, available: f64) -> bool {
        let changed = distribute_width(&mut self.columns, available);
        if changed {
            self.commit();
        }
        changed
    }

    /// Force-fits resizable columns into `available` pixels.
    ///
    /// See [`autosize`](crate::autosize()) for the exact rules.
    pub fn autosize(&mut self, available: f64, absolute_min_width: f64) -> AutosizeOutcome {
        let outcome = autosize(&mut self.columns, available, absolute_min_width);
        if outcome.changed {
            self.commit();
        }
        outcome
    }

    /// Sets the width of column `index`, clamped into its bounds.
    ///
    /// Returns `None` if the index is out of range, otherwise whether the
    /// width changed.
    pub fn set_width(&mut self, index: usize, width: f64) -> Option<bool> {
        let column = self.columns.get_mut(index)?;
        let width = column.clamp_width(width);
        if column.width == width {
            return Some(false);
        }
        column.width = width;
        self.commit();
        Some(true)
    }

    /// Column at `index`.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Index of the first column with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Columns in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter()
    }

    /// All columns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Monotonic version, bumped by every effective mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Position table for the current version.
    #[must_use]
    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Sum of all column widths.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.positions.total_width()
    }

    /// Whether any column registers deferred enrichment.
    #[must_use]
    pub fn has_post_render(&self) -> bool {
        self.columns.iter().any(Column::has_post_render)
    }
}
