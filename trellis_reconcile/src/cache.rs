// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render cache: mounted rows and cells, and the passes that change them.

use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::Range;

use smallvec::SmallVec;
use trellis_columns::{ColumnTable, PositionTable};
use trellis_deferred::{
    CleanupKind, CleanupQueue, EnrichmentCursor, GroupId, PostProcessLedger, PostStatus,
    RowRecords,
};
use trellis_viewport::{RenderRange, row_top};

use crate::dataset::{Dataset, RowMetadata};
use crate::overlap::{KeyPlan, plan_keys};
use crate::slots::Slots;
use crate::strategy::{Batched, Strategy, StrategyMode};
use crate::surface::{CellRequest, Placement, RenderSurface, RowBatch, RowRequest};

/// A cell position wanted by a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSlot {
    /// First column covered.
    pub column: usize,
    /// Number of columns covered.
    pub span: usize,
}

/// Cells a row should have mounted for the pixel window `[left_px, right_px]`.
///
/// Rows without span overrides use a binary search over the position table.
/// Rows with spans are scanned left to right; a spanning cell is wanted when
/// the right edge of its last covered column lies beyond `left_px` and its
/// own left edge does not lie beyond `right_px`, and the columns it covers
/// are skipped.
#[must_use]
pub fn desired_cells(
    positions: &PositionTable,
    metadata: Option<&RowMetadata>,
    left_px: f64,
    right_px: f64,
) -> SmallVec<[CellSlot; 16]> {
    let Some(metadata) = metadata.filter(|m| m.has_spans()) else {
        return positions
            .columns_in(left_px, right_px)
            .map(|column| CellSlot { column, span: 1 })
            .collect();
    };
    let count = positions.len();
    let mut cells = SmallVec::new();
    let mut column = 0;
    while column < count {
        let Some(left) = positions.left(column) else {
            break;
        };
        if left > right_px {
            break;
        }
        let span = metadata
            .column(column)
            .and_then(|o| o.span)
            .map_or(1, |s| s.resolve(column, count));
        let last = column.saturating_add(span - 1).min(count - 1);
        if positions.right(last).is_some_and(|r| r > left_px) {
            cells.push(CellSlot { column, span });
        }
        column = column.saturating_add(span);
    }
    cells
}

/// Inputs shared by every pass over the cache.
#[derive(Debug)]
pub struct Frame<'a, D: ?Sized> {
    /// Rows being displayed.
    pub data: &'a D,
    /// Current column table.
    pub columns: &'a ColumnTable,
    /// Height of every row.
    pub row_height: f64,
    /// Current paging offset.
    pub offset: f64,
}

impl<D: ?Sized> Clone for Frame<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for Frame<'_, D> {}

/// What one [`RenderCache::reconcile`] call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Rows mounted, in mount order.
    pub mounted: Vec<usize>,
    /// Rows unmounted, in unmount order.
    pub unmounted: Vec<usize>,
    /// Cells mounted, including those of new rows.
    pub cells_mounted: usize,
    /// Cells unmounted from rows that stayed mounted.
    pub cells_unmounted: usize,
    /// The row set had no usable overlap and was rebuilt.
    pub rebuilt: bool,
}

impl ReconcileStats {
    /// Returns `true` if nothing was mounted or unmounted.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.mounted.is_empty()
            && self.unmounted.is_empty()
            && self.cells_mounted == 0
            && self.cells_unmounted == 0
    }
}

/// Cumulative counters since the cache was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderCounters {
    /// Rows mounted.
    pub rows_rendered: u64,
    /// Rows unmounted.
    pub rows_removed: u64,
}

#[derive(Debug)]
struct CellEntry<C> {
    node: C,
    span: usize,
}

#[derive(Debug)]
struct RowEntry<R, C: Debug, S: Strategy> {
    node: R,
    cells: S::Slots<CellEntry<C>>,
}

#[derive(Debug)]
struct Zombie<R, C: Debug, S: Strategy> {
    row: usize,
    entry: RowEntry<R, C, S>,
    records: Option<RowRecords>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CellWindow {
    left_px: f64,
    right_px: f64,
    columns_version: u64,
}

/// Mounted rows and cells of one grid.
///
/// The invariant maintained by [`reconcile`](Self::reconcile) is that the
/// mounted rows are exactly the requested range, plus the row of the active
/// cell when it lies outside. A row that an in-flight gesture still holds
/// (see [`hold_row`](Self::hold_row)) is not detached when it leaves the
/// range: it is hidden and parked in a single grace slot, outside the
/// mounted set, and released at the start of the first reconcile after the
/// hold moves elsewhere.
///
/// Unmounting a row or cell that has enrichment records queues it for
/// deferred teardown when cleanup is enabled; otherwise it is released
/// immediately.
pub struct RenderCache<I, P: RenderSurface<I>, S: Strategy = Batched> {
    rows: S::Slots<RowEntry<P::Row, P::Cell, S>>,
    ledger: PostProcessLedger,
    cleanup: CleanupQueue<P::Row, P::Cell>,
    cleanup_enabled: bool,
    enrichment: EnrichmentCursor,
    active: Option<(usize, usize)>,
    held: Option<usize>,
    zombie: Option<Zombie<P::Row, P::Cell, S>>,
    window: Option<CellWindow>,
    counters: RenderCounters,
    _item: PhantomData<fn(&I)>,
}

impl<I, P: RenderSurface<I>, S: Strategy> Debug for RenderCache<I, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCache")
            .field("mode", &S::MODE)
            .field("rows", &self.rows.keys())
            .field("active", &self.active)
            .field("held", &self.held)
            .field("zombie", &self.zombie.as_ref().map(|z| z.row))
            .field("cleanup_queued", &self.cleanup.len())
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl<I, P: RenderSurface<I>, S: Strategy> Default for RenderCache<I, P, S> {
    fn default() -> Self {
        Self {
            rows: <S::Slots<RowEntry<P::Row, P::Cell, S>>>::default(),
            ledger: PostProcessLedger::new(),
            cleanup: CleanupQueue::new(),
            cleanup_enabled: false,
            enrichment: EnrichmentCursor::default(),
            active: None,
            held: None,
            zombie: None,
            window: None,
            counters: RenderCounters::default(),
            _item: PhantomData,
        }
    }
}

/// Retires cells of one row pass into the cleanup queue or the surface.
struct CellRetirer<'c, R, C> {
    ledger: &'c mut PostProcessLedger,
    cleanup: &'c mut CleanupQueue<R, C>,
    enabled: bool,
    group: Option<GroupId>,
}

impl<R, C> CellRetirer<'_, R, C> {
    fn retire<I, P>(&mut self, surface: &mut P, row_node: &R, row: usize, column: usize, cell: C)
    where
        P: RenderSurface<I, Row = R, Cell = C> + ?Sized,
    {
        surface.detach_cell(row_node, &cell);
        let status = self.ledger.remove_cell(row, column);
        if self.enabled && status.is_some() {
            let cleanup = &mut *self.cleanup;
            let group = *self.group.get_or_insert_with(|| cleanup.begin_group());
            self.cleanup.push_cell(group, row, column, cell);
        } else {
            surface.release_cell(cell);
        }
    }
}

fn row_request<'a, D>(
    frame: &Frame<'a, D>,
    metadata: Option<&'a RowMetadata>,
    row: usize,
    active_row: Option<usize>,
) -> RowRequest<'a, D::Item>
where
    D: Dataset + ?Sized,
{
    let data = frame.data;
    let item = data.item(row);
    RowRequest {
        row,
        top: row_top(row, frame.row_height, frame.offset),
        item,
        css_classes: metadata.and_then(|m| m.css_classes.as_deref()),
        odd: row % 2 == 1,
        loading: row < data.len() && item.is_none(),
        active: active_row == Some(row),
    }
}

fn cell_request<'a, D>(
    frame: &Frame<'a, D>,
    metadata: Option<&'a RowMetadata>,
    row: usize,
    slot: CellSlot,
    active: Option<(usize, usize)>,
) -> Option<CellRequest<'a, D::Item>>
where
    D: Dataset + ?Sized,
{
    let columns = frame.columns;
    let data = frame.data;
    Some(CellRequest {
        row,
        column: slot.column,
        span: slot.span,
        descriptor: columns.column(slot.column)?,
        item: data.item(row),
        formatter: metadata.and_then(|m| m.formatter_for(slot.column)),
        active: active == Some((row, slot.column)),
    })
}

impl<I, P: RenderSurface<I>, S: Strategy> RenderCache<I, P, S> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables deferred teardown of enriched nodes.
    pub fn set_cleanup_enabled(&mut self, enabled: bool) {
        self.cleanup_enabled = enabled;
    }

    /// Sets the active cell, whose row and cell are never unmounted by a
    /// reconcile.
    pub fn set_active(&mut self, active: Option<(usize, usize)>) {
        if self.active != active {
            self.active = active;
            self.window = None;
        }
    }

    /// The active cell.
    #[must_use]
    pub fn active(&self) -> Option<(usize, usize)> {
        self.active
    }

    /// Marks `row` as referenced by an in-flight gesture, or clears the mark.
    pub fn hold_row(&mut self, row: Option<usize>) {
        self.held = row;
    }

    /// Row currently parked in the grace slot.
    #[must_use]
    pub fn zombie_row(&self) -> Option<usize> {
        self.zombie.as_ref().map(|z| z.row)
    }

    /// Brings the mounted set in line with `range`.
    ///
    /// Runs, in order: release of a grace-held row whose hold ended, row
    /// unmounts, cell updates on rows that stay, row mounts. Calling it again
    /// with the same inputs changes nothing.
    pub fn reconcile<D>(
        &mut self,
        surface: &mut P,
        frame: &Frame<'_, D>,
        range: &RenderRange,
    ) -> ReconcileStats
    where
        D: Dataset<Item = I> + ?Sized,
    {
        let mut stats = ReconcileStats::default();
        self.release_zombie(surface, false);

        let exempt = self
            .active
            .map(|(row, _)| row)
            .filter(|row| self.rows.contains(*row) && !range.rows.contains(row));
        let old: Vec<usize> = self
            .rows
            .keys()
            .into_iter()
            .filter(|r| Some(*r) != exempt)
            .collect();

        let to_mount: Vec<usize> = match S::MODE {
            StrategyMode::Batched => {
                for &row in old.iter().filter(|r| !range.rows.contains(r)) {
                    self.retire_row(surface, row);
                    stats.unmounted.push(row);
                }
                range.rows.clone().filter(|r| !self.rows.contains(*r)).collect()
            }
            StrategyMode::Incremental => {
                let new: Vec<usize> = range.rows.clone().collect();
                match plan_keys(&old, &new) {
                    KeyPlan::Edges {
                        drop_front,
                        drop_back,
                        add_front,
                        add_back,
                    } => {
                        for &row in drop_front.iter().chain(drop_back) {
                            self.retire_row(surface, row);
                            stats.unmounted.push(row);
                        }
                        add_front.iter().chain(add_back).copied().collect()
                    }
                    KeyPlan::Rebuild => {
                        stats.rebuilt = !old.is_empty();
                        for &row in &old {
                            self.retire_row(surface, row);
                            stats.unmounted.push(row);
                        }
                        new
                    }
                }
            }
        };

        let window = CellWindow {
            left_px: range.left_px,
            right_px: range.right_px,
            columns_version: frame.columns.version(),
        };
        if self.window != Some(window) {
            let kept = self.rows.keys();
            self.refresh_cells(surface, frame, &kept, range, &mut stats);
            self.window = Some(window);
        }

        match S::MODE {
            StrategyMode::Batched => self.mount_batch(surface, frame, &to_mount, range, &mut stats),
            StrategyMode::Incremental => {
                for &row in &to_mount {
                    self.mount_one(surface, frame, row, range, &mut stats);
                }
            }
        }

        log::trace!(
            "reconcile {:?}: +{} -{} rows, +{} -{} cells",
            range.rows,
            stats.mounted.len(),
            stats.unmounted.len(),
            stats.cells_mounted,
            stats.cells_unmounted
        );
        stats
    }

    fn mount_batch<D>(
        &mut self,
        surface: &mut P,
        frame: &Frame<'_, D>,
        rows: &[usize],
        range: &RenderRange,
        stats: &mut ReconcileStats,
    ) where
        D: Dataset<Item = I> + ?Sized,
    {
        if rows.is_empty() {
            return;
        }
        let positions = frame.columns.positions();
        let metas: Vec<Option<RowMetadata>> =
            rows.iter().map(|r| frame.data.metadata(*r)).collect();
        let active = self.active;
        let active_row = active.map(|(r, _)| r);
        let batch: Vec<RowBatch<'_, I>> = rows
            .iter()
            .zip(&metas)
            .map(|(&row, meta)| RowBatch {
                row: row_request(frame, meta.as_ref(), row, active_row),
                cells: desired_cells(positions, meta.as_ref(), range.left_px, range.right_px)
                    .into_iter()
                    .filter_map(|slot| cell_request(frame, meta.as_ref(), row, slot, active))
                    .collect(),
            })
            .collect();

        let built = surface.create_rows_batch(&batch);
        for b in &built {
            surface.attach_row(&b.row, Placement::Append);
        }
        for (request, built) in batch.iter().zip(built).rev() {
            let mut cells = <S::Slots<CellEntry<P::Cell>>>::default();
            for (cell, node) in request.cells.iter().zip(built.cells) {
                cells.insert(
                    cell.column,
                    CellEntry {
                        node,
                        span: cell.span,
                    },
                );
                stats.cells_mounted += 1;
            }
            self.rows.insert(
                request.row.row,
                RowEntry {
                    node: built.row,
                    cells,
                },
            );
            stats.mounted.push(request.row.row);
            self.counters.rows_rendered += 1;
        }
    }

    fn mount_one<D>(
        &mut self,
        surface: &mut P,
        frame: &Frame<'_, D>,
        row: usize,
        range: &RenderRange,
        stats: &mut ReconcileStats,
    ) where
        D: Dataset<Item = I> + ?Sized,
    {
        let meta = frame.data.metadata(row);
        let request = row_request(frame, meta.as_ref(), row, self.active.map(|(r, _)| r));
        let node = surface.create_row(&request);
        let at = match self.rows.next_after(row) {
            Some((_, sibling)) => Placement::Before(&sibling.node),
            None => Placement::Append,
        };
        surface.attach_row(&node, at);

        let mut cells = <S::Slots<CellEntry<P::Cell>>>::default();
        let slots = desired_cells(
            frame.columns.positions(),
            meta.as_ref(),
            range.left_px,
            range.right_px,
        );
        for slot in slots {
            let Some(request) = cell_request(frame, meta.as_ref(), row, slot, self.active) else {
                continue;
            };
            let cell = surface.create_cell(&request);
            surface.attach_cell(&node, &cell, Placement::Append);
            cells.insert(
                slot.column,
                CellEntry {
                    node: cell,
                    span: slot.span,
                },
            );
            stats.cells_mounted += 1;
        }
        self.rows.insert(row, RowEntry { node, cells });
        stats.mounted.push(row);
        self.counters.rows_rendered += 1;
    }

    /// Updates the cells of rows that stay mounted.
    fn refresh_cells<D>(
        &mut self,
        surface: &mut P,
        frame: &Frame<'_, D>,
        rows: &[usize],
        range: &RenderRange,
        stats: &mut ReconcileStats,
    ) where
        D: Dataset<Item = I> + ?Sized,
    {
        let positions = frame.columns.positions();
        let metas: Vec<Option<RowMetadata>> =
            rows.iter().map(|r| frame.data.metadata(*r)).collect();
        let active = self.active;
        let Self {
            rows: slots,
            ledger,
            cleanup,
            cleanup_enabled,
            ..
        } = self;
        let mut pending: Vec<CellRequest<'_, I>> = Vec::new();

        for (&row, meta) in rows.iter().zip(&metas) {
            let Some(entry) = slots.get_mut(row) else {
                continue;
            };
            let desired = desired_cells(positions, meta.as_ref(), range.left_px, range.right_px);
            let exempt = active
                .filter(|(r, _)| *r == row)
                .map(|(_, c)| c)
                .filter(|c| entry.cells.contains(*c) && !desired.iter().any(|s| s.column == *c));
            let mut retirer = CellRetirer {
                ledger: &mut *ledger,
                cleanup: &mut *cleanup,
                enabled: *cleanup_enabled,
                group: None,
            };

            let mounted: SmallVec<[usize; 16]> = entry
                .cells
                .keys()
                .into_iter()
                .filter(|c| Some(*c) != exempt)
                .collect();
            let wanted: SmallVec<[usize; 16]> = desired.iter().map(|s| s.column).collect();

            let (drop, add): (SmallVec<[usize; 16]>, SmallVec<[usize; 16]>) = match S::MODE {
                StrategyMode::Batched => (
                    mounted
                        .iter()
                        .copied()
                        .filter(|c| !wanted.contains(c))
                        .collect(),
                    wanted
                        .iter()
                        .copied()
                        .filter(|c| !entry.cells.contains(*c))
                        .collect(),
                ),
                StrategyMode::Incremental => match plan_keys(&mounted, &wanted) {
                    KeyPlan::Edges {
                        drop_front,
                        drop_back,
                        add_front,
                        add_back,
                    } => (
                        drop_front.iter().chain(drop_back).copied().collect(),
                        add_front.iter().chain(add_back).copied().collect(),
                    ),
                    KeyPlan::Rebuild => (mounted.clone(), wanted.clone()),
                },
            };

            for column in drop {
                if let Some(cell) = entry.cells.remove(column) {
                    retirer.retire::<I, P>(surface, &entry.node, row, column, cell.node);
                    stats.cells_unmounted += 1;
                }
            }

            for column in add {
                let Some(slot) = desired.iter().find(|s| s.column == column).copied() else {
                    continue;
                };
                let Some(request) = cell_request(frame, meta.as_ref(), row, slot, active) else {
                    continue;
                };
                match S::MODE {
                    StrategyMode::Batched => pending.push(request),
                    StrategyMode::Incremental => {
                        let cell = surface.create_cell(&request);
                        let at = match entry.cells.next_after(column) {
                            Some((_, sibling)) => Placement::Before(&sibling.node),
                            None => Placement::Append,
                        };
                        surface.attach_cell(&entry.node, &cell, at);
                        entry.cells.insert(
                            column,
                            CellEntry {
                                node: cell,
                                span: slot.span,
                            },
                        );
                        stats.cells_mounted += 1;
                    }
                }
            }
        }

        if pending.is_empty() {
            return;
        }
        let nodes = surface.create_cells_batch(&pending);
        for (request, node) in pending.iter().zip(&nodes) {
            if let Some(entry) = slots.get(request.row) {
                surface.attach_cell(&entry.node, node, Placement::Append);
            }
        }
        for (request, node) in pending.iter().zip(nodes).rev() {
            let Some(entry) = slots.get_mut(request.row) else {
                surface.release_cell(node);
                continue;
            };
            entry.cells.insert(
                request.column,
                CellEntry {
                    node,
                    span: request.span,
                },
            );
            stats.cells_mounted += 1;
        }
    }

    /// Unmounts one row, parking it if a gesture holds it.
    fn retire_row(&mut self, surface: &mut P, row: usize) -> bool {
        let Some(entry) = self.rows.remove(row) else {
            return false;
        };
        self.counters.rows_removed += 1;
        let records = self.ledger.take_row(row);
        if self.held == Some(row) {
            surface.hide_row(&entry.node);
            if let Some(previous) = self.zombie.take() {
                self.dispose_row(surface, previous.row, previous.entry, previous.records);
            }
            log::debug!("row {row} is held by a gesture; hidden instead of removed");
            self.zombie = Some(Zombie {
                row,
                entry,
                records,
            });
        } else {
            self.dispose_row(surface, row, entry, records);
        }
        true
    }

    fn dispose_row(
        &mut self,
        surface: &mut P,
        row: usize,
        mut entry: RowEntry<P::Row, P::Cell, S>,
        records: Option<RowRecords>,
    ) {
        surface.detach_row(&entry.node);
        match records {
            Some(records) if self.cleanup_enabled => {
                let group = self.cleanup.begin_group();
                for (column, _) in records {
                    if let Some(cell) = entry.cells.remove(column) {
                        self.cleanup.push_cell(group, row, column, cell.node);
                    }
                }
                self.cleanup.push_row(group, row, entry.node);
            }
            _ => surface.release_row(entry.node),
        }
    }

    /// Releases the grace-held row if its hold ended, or unconditionally.
    fn release_zombie(&mut self, surface: &mut P, force: bool) {
        let free = self
            .zombie
            .as_ref()
            .is_some_and(|z| force || self.held != Some(z.row));
        if !free {
            return;
        }
        if let Some(zombie) = self.zombie.take() {
            log::debug!("releasing held row {}", zombie.row);
            self.dispose_row(surface, zombie.row, zombie.entry, zombie.records);
        }
    }

    /// Unmounts the given rows regardless of the active cell.
    ///
    /// Returns the number of rows that were mounted.
    pub fn invalidate_rows(
        &mut self,
        surface: &mut P,
        rows: impl IntoIterator<Item = usize>,
    ) -> usize {
        let mut removed = 0;
        for row in rows {
            if self.retire_row(surface, row) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.window = None;
        }
        removed
    }

    /// Unmounts every row.
    pub fn invalidate_all(&mut self, surface: &mut P) -> usize {
        let rows = self.rows.keys();
        let removed = self.invalidate_rows(surface, rows);
        self.window = None;
        removed
    }

    /// Unmounts rows at or beyond `len` and forgets an active cell there.
    pub fn truncate(&mut self, surface: &mut P, len: usize) -> usize {
        if self.active.is_some_and(|(r, _)| r >= len) {
            self.active = None;
        }
        let rows: Vec<usize> = self.rows.keys().into_iter().filter(|r| *r >= len).collect();
        self.invalidate_rows(surface, rows)
    }

    /// Flips enrichment records to stale so the next sweep re-runs them.
    pub fn invalidate_post_render(&mut self, row: Option<usize>, column: Option<usize>) -> usize {
        self.ledger.invalidate(row, column)
    }

    /// Starts a new enrichment sweep over `rows`.
    pub fn start_enrichment(&mut self, rows: Range<usize>, ascending: bool) {
        self.enrichment = EnrichmentCursor::new(rows, ascending);
    }

    /// Returns `true` while the current sweep has rows left.
    #[must_use]
    pub fn enrichment_pending(&self) -> bool {
        !self.enrichment.is_done()
    }

    /// Enriches the next mounted row of the sweep.
    ///
    /// Rows that are no longer mounted or lie beyond the data are skipped.
    /// Every cell of the row whose column registers enrichment and whose
    /// record is not `Rendered` is enriched and marked. Returns the row, or
    /// `None` when the sweep is finished.
    pub fn enrich_next<D>(&mut self, surface: &mut P, frame: &Frame<'_, D>) -> Option<usize>
    where
        D: Dataset<Item = I> + ?Sized,
    {
        let len = frame.data.len();
        while let Some(row) = self.enrichment.next_row() {
            if row >= len {
                continue;
            }
            let Some(entry) = self.rows.get(row) else {
                continue;
            };
            let item = frame.data.item(row);
            let mut enriched = 0_usize;
            for (column, cell) in entry.cells.iter() {
                let Some(descriptor) = frame.columns.column(column) else {
                    continue;
                };
                if !descriptor.has_post_render() {
                    continue;
                }
                let status = self.ledger.status(row, column);
                if status == Some(PostStatus::Rendered) {
                    continue;
                }
                surface.enrich_cell(
                    &cell.node,
                    row,
                    descriptor,
                    item,
                    status == Some(PostStatus::PendingCleanup),
                );
                self.ledger.mark_rendered(row, column);
                enriched += 1;
            }
            log::trace!("enriched {enriched} cells of row {row}");
            return Some(row);
        }
        None
    }

    /// Tears down the oldest queued cleanup group.
    ///
    /// Returns the number of entries processed, or `None` if the queue was
    /// empty.
    pub fn cleanup_next_group(&mut self, surface: &mut P, columns: &ColumnTable) -> Option<usize> {
        let (_, batch) = self.cleanup.pop_group()?;
        let processed = batch.len();
        for kind in batch {
            Self::teardown(surface, columns, kind);
        }
        Some(processed)
    }

    fn teardown(surface: &mut P, columns: &ColumnTable, kind: CleanupKind<P::Row, P::Cell>) {
        match kind {
            CleanupKind::Row { node, .. } => surface.release_row(node),
            CleanupKind::Cell { row, column, node } => match columns.column(column) {
                Some(descriptor) if descriptor.has_post_render_cleanup() => {
                    surface.teardown_cell(node, row, descriptor);
                }
                _ => surface.release_cell(node),
            },
        }
    }

    /// Number of queued cleanup entries.
    #[must_use]
    pub fn cleanup_pending(&self) -> usize {
        self.cleanup.len()
    }

    /// Releases everything: mounted rows, the grace-held row and queued
    /// cleanup, without deferring anything.
    pub fn clear(&mut self, surface: &mut P, columns: &ColumnTable) {
        let enabled = self.cleanup_enabled;
        self.cleanup_enabled = false;
        self.held = None;
        self.release_zombie(surface, true);
        for (_, entry) in self.rows.drain() {
            surface.detach_row(&entry.node);
            surface.release_row(entry.node);
            self.counters.rows_removed += 1;
        }
        let queued: Vec<_> = self.cleanup.drain_all().collect();
        for kind in queued {
            Self::teardown(surface, columns, kind);
        }
        self.ledger.clear();
        self.enrichment = EnrichmentCursor::default();
        self.window = None;
        self.cleanup_enabled = enabled;
    }

    /// Mounted rows in ascending order.
    #[must_use]
    pub fn mounted_rows(&self) -> Vec<usize> {
        self.rows.keys()
    }

    /// Number of mounted rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if `row` is mounted.
    #[must_use]
    pub fn is_mounted(&self, row: usize) -> bool {
        self.rows.contains(row)
    }

    /// Node of a mounted row.
    #[must_use]
    pub fn row_node(&self, row: usize) -> Option<&P::Row> {
        self.rows.get(row).map(|e| &e.node)
    }

    /// Node of a mounted cell.
    #[must_use]
    pub fn cell_node(&self, row: usize, column: usize) -> Option<&P::Cell> {
        self.rows.get(row)?.cells.get(column).map(|c| &c.node)
    }

    /// Span of a mounted cell.
    #[must_use]
    pub fn cell_span(&self, row: usize, column: usize) -> Option<usize> {
        self.rows.get(row)?.cells.get(column).map(|c| c.span)
    }

    /// Mounted cell columns of `row`, ascending.
    #[must_use]
    pub fn mounted_cells(&self, row: usize) -> Vec<usize> {
        self.rows.get(row).map(|e| e.cells.keys()).unwrap_or_default()
    }

    /// Enrichment records.
    #[must_use]
    pub fn ledger(&self) -> &PostProcessLedger {
        &self.ledger
    }

    /// Cumulative counters.
    #[must_use]
    pub fn counters(&self) -> RenderCounters {
        self.counters
    }
}
