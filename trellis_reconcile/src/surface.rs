// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node-level rendering seam.

use alloc::vec::Vec;
use core::fmt::Debug;

use trellis_columns::Column;

/// Where to attach a node relative to its mounted siblings.
#[derive(Debug)]
pub enum Placement<'a, N> {
    /// After the last child.
    Append,
    /// Immediately before `N`.
    Before(&'a N),
}

impl<N> Clone for Placement<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Placement<'_, N> {}

/// Everything the surface needs to build a row node.
#[derive(Debug)]
pub struct RowRequest<'a, I> {
    /// Row index.
    pub row: usize,
    /// Top edge in real pixels (virtual top minus the paging offset).
    pub top: f64,
    /// The item, if loaded.
    pub item: Option<&'a I>,
    /// Extra classes from row metadata.
    pub css_classes: Option<&'a str>,
    /// Odd row index.
    pub odd: bool,
    /// The row lies inside the data but its item is not loaded.
    pub loading: bool,
    /// The row holds the active cell.
    pub active: bool,
}

/// Everything the surface needs to build a cell node.
#[derive(Debug)]
pub struct CellRequest<'a, I> {
    /// Row index.
    pub row: usize,
    /// First column covered.
    pub column: usize,
    /// Number of columns covered.
    pub span: usize,
    /// Descriptor of the first column covered.
    pub descriptor: &'a Column,
    /// The row's item, if loaded.
    pub item: Option<&'a I>,
    /// Formatter token from row metadata.
    pub formatter: Option<&'a str>,
    /// This is the active cell.
    pub active: bool,
}

/// A new row plus the cells requested for it.
#[derive(Debug)]
pub struct RowBatch<'a, I> {
    /// The row.
    pub row: RowRequest<'a, I>,
    /// Its cells, in column order.
    pub cells: Vec<CellRequest<'a, I>>,
}

/// A row built by [`RenderSurface::create_rows_batch`], cells already inside.
#[derive(Debug)]
pub struct BuiltRow<R, C> {
    /// Row node, not yet attached.
    pub row: R,
    /// Cell nodes in request order, attached to `row`.
    pub cells: Vec<C>,
}

/// Element primitives of the host rendering backend.
///
/// Row and cell handles are opaque to the cache. A handle is created, then
/// attached; when it leaves the grid it is detached and released, possibly
/// one deferred tick later when enrichment cleanup is enabled.
///
/// Only the single-node methods are required. The batch methods default to
/// looping over them; a backend that can build many nodes from one parsed
/// markup string should override them.
pub trait RenderSurface<I> {
    /// Row node handle.
    type Row: Debug;
    /// Cell node handle.
    type Cell: Debug;

    /// Builds a detached row node.
    fn create_row(&mut self, request: &RowRequest<'_, I>) -> Self::Row;

    /// Builds a detached cell node.
    fn create_cell(&mut self, request: &CellRequest<'_, I>) -> Self::Cell;

    /// Attaches a row node to the canvas.
    fn attach_row(&mut self, row: &Self::Row, at: Placement<'_, Self::Row>);

    /// Attaches a cell node to a row node.
    fn attach_cell(&mut self, row: &Self::Row, cell: &Self::Cell, at: Placement<'_, Self::Cell>);

    /// Detaches a row node from the canvas.
    fn detach_row(&mut self, row: &Self::Row);

    /// Detaches a cell node from its row.
    fn detach_cell(&mut self, row: &Self::Row, cell: &Self::Cell);

    /// Hides a row node without detaching it.
    ///
    /// Used for a row that an in-flight gesture still references.
    fn hide_row(&mut self, row: &Self::Row);

    /// Builds many rows at once, each with its cells attached.
    fn create_rows_batch(
        &mut self,
        batch: &[RowBatch<'_, I>],
    ) -> Vec<BuiltRow<Self::Row, Self::Cell>> {
        batch
            .iter()
            .map(|b| {
                let row = self.create_row(&b.row);
                let cells = b
                    .cells
                    .iter()
                    .map(|c| {
                        let cell = self.create_cell(c);
                        self.attach_cell(&row, &cell, Placement::Append);
                        cell
                    })
                    .collect();
                BuiltRow { row, cells }
            })
            .collect()
    }

    /// Builds many detached cells at once, in request order.
    fn create_cells_batch(&mut self, batch: &[CellRequest<'_, I>]) -> Vec<Self::Cell> {
        batch.iter().map(|c| self.create_cell(c)).collect()
    }

    /// Disposes of a detached row node and any cells still inside it.
    fn release_row(&mut self, row: Self::Row) {
        let _ = row;
    }

    /// Disposes of a detached cell node.
    fn release_cell(&mut self, cell: Self::Cell) {
        let _ = cell;
    }

    /// Runs the deferred enrichment of `column` on a mounted cell.
    ///
    /// `clean_first` is set when a previous enrichment result is stale and
    /// must be undone before enriching again.
    fn enrich_cell(
        &mut self,
        cell: &Self::Cell,
        row: usize,
        column: &Column,
        item: Option<&I>,
        clean_first: bool,
    ) {
        let _ = (cell, row, column, item, clean_first);
    }

    /// Undoes enrichment of a cell that left the grid, then disposes of it.
    ///
    /// The cell is already detached, either alone or with its row.
    fn teardown_cell(&mut self, cell: Self::Cell, row: usize, column: &Column) {
        let _ = (row, column);
        self.release_cell(cell);
    }
}
