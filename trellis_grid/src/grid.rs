// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid facade and its scroll coordinator.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use trellis_columns::{ColumnDefaults, ColumnSpec, ColumnTable};
use trellis_deferred::{DeferredTask, Scheduler, TaskSlot};
use trellis_reconcile::{
    Batched, Dataset, Frame, ReconcileStats, RenderCache, RenderCounters, RenderSurface, Strategy,
};
use trellis_viewport::{
    PagingGeometry, RangeQuery, RenderRange, ScrollDirection, VisibleRange, render_range,
    row_at_position, row_top, visible_range,
};

use crate::error::GridError;
use crate::observer::{GridObserver, ObserverId, Observers, ScrollChange};
use crate::options::GridOptions;
use crate::port::{ScrollPort, ScrollSubscription, SubscriptionGuard};

/// A virtualized grid over a dataset, drawn through a host surface.
///
/// The host owns the real scrollable element, the nodes and the timers; it
/// forwards scroll events to [`handle_scroll`](Self::handle_scroll) and fired
/// timers to [`run_task`](Self::run_task). Everything else happens inside
/// the grid:
///
/// - Scroll positions are mapped through [`PagingGeometry`], so datasets
///   taller than [`GridOptions::max_scroll_extent`] remain scrollable.
/// - Short scrolls render synchronously. Jumps of at least one viewport are
///   debounced by [`GridOptions::render_debounce`], and a pending debounced
///   render is always replaced, never stacked.
/// - Each render reconciles the [`RenderCache`] against the render range,
///   then restarts the enrichment loop over the visible rows.
///
/// `S` picks the cache strategy; see [`trellis_reconcile::Strategy`].
pub struct Grid<D, P, Sch, S = Batched>
where
    D: Dataset,
    P: RenderSurface<D::Item> + ScrollPort,
    Sch: Scheduler,
    S: Strategy,
{
    data: D,
    host: P,
    scheduler: Sch,
    options: GridOptions,
    columns: ColumnTable,
    paging: PagingGeometry,
    cache: RenderCache<D::Item, P, S>,
    viewport: Size,
    scroll: Point,
    prev_scroll: Point,
    last_rendered: Point,
    direction: ScrollDirection,
    canvas_width: f64,
    has_vscroll: bool,
    has_hscroll: bool,
    render_task: TaskSlot<Sch::Handle>,
    enrich_task: TaskSlot<Sch::Handle>,
    cleanup_task: TaskSlot<Sch::Handle>,
    observers: Observers,
    subscription: Option<SubscriptionGuard>,
    torn_down: bool,
}

impl<D, P, Sch, S> fmt::Debug for Grid<D, P, Sch, S>
where
    D: Dataset,
    P: RenderSurface<D::Item> + ScrollPort,
    Sch: Scheduler,
    S: Strategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.data.len())
            .field("columns", &self.columns.len())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("paging", &self.paging)
            .field("cache", &self.cache)
            .field("observers", &self.observers)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

fn finite_size(size: Size) -> Size {
    if size.is_finite() {
        return Size::new(size.width.max(0.0), size.height.max(0.0));
    }
    log::warn!("non-finite viewport size {size:?} clamped");
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size::new(clean(size.width), clean(size.height))
}

fn finite_point(p: Point) -> Point {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Point::new(clean(p.x), clean(p.y))
}

impl<D, P, Sch, S> Grid<D, P, Sch, S>
where
    D: Dataset,
    P: RenderSurface<D::Item> + ScrollPort,
    Sch: Scheduler,
    S: Strategy,
{
    /// Creates a grid and renders the first frame.
    ///
    /// Options are clamped with [`GridOptions::sanitized`]. Missing column
    /// widths default to [`GridOptions::default_column_width`].
    pub fn new(
        data: D,
        host: P,
        scheduler: Sch,
        columns: impl IntoIterator<Item = ColumnSpec>,
        options: GridOptions,
    ) -> Result<Self, GridError> {
        let options = options.sanitized();
        let defaults = ColumnDefaults {
            width: options.default_column_width,
            ..ColumnDefaults::default()
        };
        let mut cache = RenderCache::new();
        cache.set_cleanup_enabled(options.enable_async_post_render_cleanup);
        let mut grid = Self {
            data,
            host,
            scheduler,
            columns: ColumnTable::new(columns, &defaults),
            paging: PagingGeometry::new(options.max_scroll_extent),
            options,
            cache,
            viewport: Size::ZERO,
            scroll: Point::ZERO,
            prev_scroll: Point::ZERO,
            last_rendered: Point::ZERO,
            // A fresh grid is read from the top.
            direction: ScrollDirection::Forward,
            canvas_width: 0.0,
            has_vscroll: false,
            has_hscroll: false,
            render_task: TaskSlot::new(),
            enrich_task: TaskSlot::new(),
            cleanup_task: TaskSlot::new(),
            observers: Observers::default(),
            subscription: None,
            torn_down: false,
        };
        grid.update_canvas_width(true)?;
        grid.resize(None)?;
        Ok(grid)
    }

    /// Hands over the host's scroll event registration.
    ///
    /// It is released on [`teardown`](Self::teardown) or when the grid is
    /// dropped. A previous registration is released immediately.
    pub fn subscribe(&mut self, subscription: impl ScrollSubscription + 'static) {
        self.subscription = Some(SubscriptionGuard::new(subscription));
    }

    /// Returns `true` while a scroll registration is held.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(SubscriptionGuard::is_active)
    }

    /// Registers a lifecycle observer.
    pub fn add_observer(&mut self, observer: Box<dyn GridObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Removes an observer. Returns `false` if the id is unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    fn ensure_live(&self) -> Result<(), GridError> {
        if self.torn_down {
            Err(GridError::TornDown)
        } else {
            Ok(())
        }
    }

    fn query(&self) -> RangeQuery {
        RangeQuery {
            scroll: self.scroll,
            offset: self.paging.offset(),
            viewport: self.viewport,
            row_height: self.options.row_height,
            row_count: self.data.len(),
        }
    }

    /// Rows and pixels currently in the viewport.
    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        visible_range(&self.query())
    }

    /// Rows and pixels the next render pass will mount.
    #[must_use]
    pub fn render_range(&self) -> RenderRange {
        render_range(
            &self.query(),
            self.direction,
            self.options.min_row_buffer,
            self.canvas_width,
        )
    }

    fn visible_row_capacity(&self) -> usize {
        let rows = self.viewport.height / self.options.row_height;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "row counts of a finite viewport fit in usize"
        )]
        let whole = rows as usize;
        if (whole as f64) < rows { whole + 1 } else { whole }
    }

    fn available_width(&self) -> f64 {
        if self.has_vscroll {
            (self.viewport.width - self.options.scrollbar_size.width).max(0.0)
        } else {
            self.viewport.width
        }
    }

    /// Re-reads the viewport size from the host, or uses `size`, then
    /// recomputes geometry and renders.
    pub fn resize(&mut self, size: Option<Size>) -> Result<ReconcileStats, GridError> {
        self.ensure_live()?;
        self.viewport = finite_size(size.unwrap_or_else(|| self.host.viewport_size()));
        self.paging.set_viewport_extent(self.viewport.height);
        if self.options.force_fit_columns {
            self.autosize_columns()?;
        }
        self.update_row_count()?;
        self.render()
    }

    /// Recomputes geometry after the dataset length changed.
    ///
    /// Rows at or beyond the new length are unmounted and an active cell
    /// there is cleared. The virtual scroll position is kept when still in
    /// range, otherwise the grid scrolls to the bottom. Does not render.
    pub fn update_row_count(&mut self) -> Result<(), GridError> {
        self.ensure_live()?;
        let len = self.data.len();
        let rows = if self.options.leave_space_for_new_rows {
            len + self.visible_row_capacity().saturating_sub(1)
        } else {
            len
        };
        let row_height = self.options.row_height;
        let scrollbar = self.options.scrollbar_size;

        let had_vscroll = self.has_vscroll;
        self.has_vscroll = rows as f64 * row_height > self.viewport.height;
        self.has_hscroll = self.canvas_width > self.viewport.width - scrollbar.width;

        let beyond: Vec<usize> = self
            .cache
            .mounted_rows()
            .into_iter()
            .filter(|r| *r >= len)
            .collect();
        self.cache.truncate(&mut self.host, len);
        self.notify_removed(&beyond);

        let total = (row_height * rows as f64).max(self.viewport.height - scrollbar.height);
        if self.paging.update_extent(total, self.viewport.height) {
            self.invalidate_all_rows();
        }
        self.host
            .set_scroll_extent(self.canvas_width, self.paging.real_extent());

        let target = if self.scroll.y == 0.0 {
            0.0
        } else {
            self.scroll.y + self.paging.offset()
        };
        self.move_to_virtual(target);

        if self.options.force_fit_columns && had_vscroll != self.has_vscroll {
            self.autosize_columns()?;
        }
        self.update_canvas_width(false)
    }

    fn update_canvas_width(&mut self, force_rules: bool) -> Result<(), GridError> {
        let total = self.columns.total_width();
        let width = if self.options.full_width_rows {
            total.max(self.available_width())
        } else {
            total
        };
        let changed = width != self.canvas_width;
        if changed {
            self.canvas_width = width;
            self.has_hscroll =
                width > self.viewport.width - self.options.scrollbar_size.width;
            self.host
                .set_scroll_extent(width, self.paging.real_extent());
        }
        if changed || force_rules {
            self.host
                .apply_column_rules(self.columns.positions(), self.canvas_width)?;
        }
        Ok(())
    }

    fn autosize_columns(&mut self) -> Result<(), GridError> {
        let outcome = self
            .columns
            .autosize(self.available_width(), self.options.absolute_min_column_width);
        if outcome.changed {
            self.update_canvas_width(true)?;
        }
        if outcome.rerender {
            self.invalidate_all_rows();
        }
        Ok(())
    }

    /// Moves to a virtual scroll-top and writes the real position back.
    fn move_to_virtual(&mut self, y: f64) {
        let slack = if self.has_hscroll {
            self.options.scrollbar_size.height
        } else {
            0.0
        };
        let old_virtual = self.scroll.y + self.paging.offset();
        let update = self.paging.scroll_to_with_slack(y, slack);
        if update.offset_changed {
            self.invalidate_all_rows();
        }
        if update.real != self.scroll.y {
            self.direction =
                ScrollDirection::from_delta(update.real + self.paging.offset() - old_virtual);
            self.scroll.y = update.real;
            self.prev_scroll.y = update.real;
            self.host.set_scroll_position(self.scroll.x, update.real);
            let visible = self.visible_range();
            self.observers.each(|o| o.viewport_changed(&visible));
        }
    }

    /// Handles a scroll event on the real element.
    ///
    /// Moves shorter than [`GridOptions::render_threshold`] since the last
    /// render are ignored. Longer moves render synchronously while they stay
    /// under one viewport on both axes, and are debounced otherwise. A page
    /// change always renders.
    pub fn handle_scroll(&mut self, position: Point) -> Result<ScrollChange, GridError> {
        self.ensure_live()?;
        let position = finite_point(position);
        let mut change = ScrollChange::empty();

        if position.x != self.prev_scroll.x {
            self.prev_scroll.x = position.x;
            self.scroll.x = position.x;
            change |= ScrollChange::HORIZONTAL;
        }

        let travelled = position.y - self.prev_scroll.y;
        if travelled != 0.0 {
            self.direction = ScrollDirection::from_delta(travelled);
            self.prev_scroll.y = position.y;
            self.scroll.y = position.y;
            change |= ScrollChange::VERTICAL;

            let update = self.paging.on_real_scroll(position.y, travelled.abs());
            if update.real != position.y {
                self.scroll.y = update.real;
                self.prev_scroll.y = update.real;
                self.host.set_scroll_position(self.scroll.x, update.real);
            }
            if update.offset_changed {
                change |= ScrollChange::PAGE;
                self.invalidate_all_rows();
            }
        }

        if !change.is_empty() {
            self.render_task.cancel(&mut self.scheduler);
            let dy = (self.last_rendered.y - self.scroll.y).abs();
            let dx = (self.last_rendered.x - self.scroll.x).abs();
            let threshold = self.options.render_threshold;
            if change.contains(ScrollChange::PAGE) || dy > threshold || dx > threshold {
                if self.options.force_sync_scrolling
                    || (dy < self.viewport.height && dx < self.viewport.width)
                {
                    self.render()?;
                } else {
                    log::debug!("scroll jump of {dx}x{dy} px, deferring render");
                    self.render_task.replace(
                        &mut self.scheduler,
                        DeferredTask::Render,
                        self.options.render_debounce,
                    );
                }
                let visible = self.visible_range();
                self.observers.each(|o| o.viewport_changed(&visible));
            }
        }

        let scroll = self.scroll;
        self.observers.each(|o| o.scrolled(scroll, change));
        Ok(change)
    }

    /// Runs a full render pass now.
    ///
    /// Cancels a pending debounced render, reconciles the cache against the
    /// current render range and restarts enrichment over the visible rows.
    pub fn render(&mut self) -> Result<ReconcileStats, GridError> {
        self.ensure_live()?;
        self.render_task.cancel(&mut self.scheduler);
        let visible = self.visible_range();
        let range = self.render_range();
        self.observers.each(|o| o.before_rows_render(&range));

        let frame = Frame {
            data: &self.data,
            columns: &self.columns,
            row_height: self.options.row_height,
            offset: self.paging.offset(),
        };
        let stats = self.cache.reconcile(&mut self.host, &frame, &range);

        self.notify_removed(&stats.unmounted);
        if !stats.mounted.is_empty() {
            self.observers.each(|o| o.rows_rendered(&stats.mounted));
        }
        if stats.cells_mounted > 0 {
            self.observers.each(|o| o.cells_rendered(stats.cells_mounted));
        }

        if self.options.enable_async_post_render {
            let end = visible.rows.end.min(self.data.len());
            let ascending = self.direction != ScrollDirection::Backward;
            self.cache.start_enrichment(visible.rows.start..end, ascending);
            self.enrich_task.replace(
                &mut self.scheduler,
                DeferredTask::Enrich,
                self.options.async_post_render_delay,
            );
        }

        self.last_rendered = self.scroll;
        Ok(stats)
    }

    /// Runs the deferred task identified by `handle`.
    ///
    /// Returns `false` for handles that were replaced or cancelled since
    /// they were scheduled; those are ignored.
    pub fn run_task(&mut self, handle: Sch::Handle) -> Result<bool, GridError> {
        if self.torn_down {
            return Ok(false);
        }
        if self.render_task.fire(handle) {
            self.render()?;
        } else if self.enrich_task.fire(handle) {
            self.enrich_tick();
        } else if self.cleanup_task.fire(handle) {
            self.cleanup_tick();
        } else {
            log::warn!("ignoring stale deferred task {handle:?}");
            return Ok(false);
        }
        Ok(true)
    }

    fn enrich_tick(&mut self) {
        let frame = Frame {
            data: &self.data,
            columns: &self.columns,
            row_height: self.options.row_height,
            offset: self.paging.offset(),
        };
        if self.cache.enrich_next(&mut self.host, &frame).is_some() {
            self.enrich_task.replace(
                &mut self.scheduler,
                DeferredTask::Enrich,
                self.options.async_post_render_delay,
            );
        }
    }

    fn cleanup_tick(&mut self) {
        if self
            .cache
            .cleanup_next_group(&mut self.host, &self.columns)
            .is_some()
        {
            self.start_cleanup();
        }
    }

    fn start_cleanup(&mut self) {
        if self.options.enable_async_post_render_cleanup && self.cache.cleanup_pending() > 0 {
            self.cleanup_task.replace(
                &mut self.scheduler,
                DeferredTask::Cleanup,
                self.options.async_post_render_cleanup_delay,
            );
        }
    }

    fn notify_removed(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        self.observers.each(|o| o.rows_removed(rows));
        self.start_cleanup();
    }

    fn invalidate_all_rows(&mut self) -> usize {
        let rows = self.cache.mounted_rows();
        let removed = self.cache.invalidate_rows(&mut self.host, rows.iter().copied());
        self.notify_removed(&rows);
        removed
    }

    /// Recomputes geometry, unmounts every row and renders again.
    pub fn invalidate(&mut self) -> Result<ReconcileStats, GridError> {
        self.update_row_count()?;
        self.invalidate_all_rows();
        self.render()
    }

    /// Unmounts the given rows so the next render rebuilds them.
    ///
    /// Returns how many were mounted.
    pub fn invalidate_rows(&mut self, rows: impl IntoIterator<Item = usize>) -> usize {
        let rows: Vec<usize> = rows
            .into_iter()
            .filter(|r| self.cache.is_mounted(*r))
            .collect();
        let removed = self.cache.invalidate_rows(&mut self.host, rows.iter().copied());
        self.notify_removed(&rows);
        removed
    }

    /// Marks enrichment results stale so the enrichment loop runs again
    /// with its clean-first flag set.
    ///
    /// `None` matches every row or column. Returns how many records changed.
    pub fn invalidate_post_render(&mut self, row: Option<usize>, column: Option<usize>) -> usize {
        let flipped = self.cache.invalidate_post_render(row, column);
        if self.options.enable_async_post_render && !self.torn_down {
            let visible = self.visible_range();
            let end = visible.rows.end.min(self.data.len());
            let ascending = self.direction != ScrollDirection::Backward;
            self.cache.start_enrichment(visible.rows.start..end, ascending);
            self.enrich_task.replace(
                &mut self.scheduler,
                DeferredTask::Enrich,
                self.options.async_post_render_delay,
            );
        }
        flipped
    }

    /// Bounds of a cell in canvas coordinates, or `None` outside the data.
    ///
    /// The bottom edge is one pixel above the next row.
    #[must_use]
    pub fn cell_bounds(&self, row: usize, column: usize) -> Option<Rect> {
        if row >= self.data.len() {
            return None;
        }
        let positions = self.columns.positions();
        let (left, right) = (positions.left(column)?, positions.right(column)?);
        let top = row_top(row, self.options.row_height, self.paging.offset());
        Some(Rect::new(left, top, right, top + self.options.row_height - 1.0))
    }

    /// Row under a real canvas y-coordinate. Not clamped to the data.
    #[must_use]
    pub fn row_at_position(&self, y: f64) -> usize {
        row_at_position(y, self.paging.offset(), self.options.row_height)
    }

    /// Cell under a real canvas point, or `None` outside the data.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        let row = self.row_at_position(point.y);
        if row >= self.data.len() {
            return None;
        }
        Some((row, self.columns.positions().index_at(point.x)?))
    }

    /// Sets or clears the active cell.
    ///
    /// The active row and cell are never unmounted by scrolling. A cell
    /// outside the data or the columns clears the active cell. Returns the
    /// active cell now in effect.
    pub fn set_active_cell(&mut self, cell: Option<(usize, usize)>) -> Option<(usize, usize)> {
        let cell = cell.filter(|(r, c)| *r < self.data.len() && *c < self.columns.len());
        self.cache.set_active(cell);
        cell
    }

    /// The active cell.
    #[must_use]
    pub fn active_cell(&self) -> Option<(usize, usize)> {
        self.cache.active()
    }

    /// Marks the row an in-flight gesture started on, or clears the mark.
    ///
    /// A marked row that scrolls out is hidden instead of detached until
    /// the mark moves.
    pub fn hold_row(&mut self, row: Option<usize>) {
        self.cache.hold_row(row);
    }

    /// Replaces every column, then re-renders.
    pub fn set_columns(
        &mut self,
        specs: impl IntoIterator<Item = ColumnSpec>,
    ) -> Result<ReconcileStats, GridError> {
        self.ensure_live()?;
        self.columns.replace(specs);
        if self.options.force_fit_columns {
            self.autosize_columns()?;
        }
        self.update_canvas_width(true)?;
        self.invalidate_all_rows();
        self.render()
    }

    /// Sets the width of column `id`, clamped into its bounds, then
    /// re-renders.
    ///
    /// Returns `false` if the column is unknown or the width did not change.
    pub fn resize_column(&mut self, id: &str, width: f64) -> Result<bool, GridError> {
        self.ensure_live()?;
        let Some(index) = self.columns.index_of(id) else {
            return Ok(false);
        };
        if self.columns.set_width(index, width) != Some(true) {
            return Ok(false);
        }
        self.update_canvas_width(true)?;
        self.invalidate_all_rows();
        self.render()?;
        Ok(true)
    }

    /// Scrolls to a virtual scroll-top and renders.
    pub fn scroll_to_virtual(&mut self, y: f64) -> Result<ReconcileStats, GridError> {
        self.ensure_live()?;
        self.move_to_virtual(y);
        self.render()
    }

    /// Scrolls the minimum distance that shows `row` entirely, then renders.
    ///
    /// Returns `false` if the row was already in view.
    pub fn scroll_row_into_view(&mut self, row: usize) -> Result<bool, GridError> {
        self.ensure_live()?;
        let row_height = self.options.row_height;
        let top = self.scroll.y + self.paging.offset();
        let row_top = row as f64 * row_height;
        let row_bottom = row_top + row_height;
        let slack = if self.has_hscroll {
            self.options.scrollbar_size.height
        } else {
            0.0
        };
        if row_bottom > top + self.viewport.height {
            self.move_to_virtual(row_bottom - self.viewport.height + slack);
        } else if row_top < top {
            self.move_to_virtual(row_top);
        } else {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Scrolls horizontally and renders.
    pub fn scroll_left_to(&mut self, x: f64) -> Result<ReconcileStats, GridError> {
        self.ensure_live()?;
        let scrollbar = if self.has_vscroll {
            self.options.scrollbar_size.width
        } else {
            0.0
        };
        let max = (self.canvas_width - self.viewport.width + scrollbar).max(0.0);
        let x = if x.is_finite() { x.clamp(0.0, max) } else { 0.0 };
        self.scroll.x = x;
        self.prev_scroll.x = x;
        self.host.set_scroll_position(x, self.scroll.y);
        self.render()
    }

    /// Releases everything: pending tasks, mounted and queued nodes,
    /// observers and the scroll registration.
    ///
    /// Later calls fail with [`GridError::TornDown`]. Calling it twice is
    /// harmless.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.render_task.cancel(&mut self.scheduler);
        self.enrich_task.cancel(&mut self.scheduler);
        self.cleanup_task.cancel(&mut self.scheduler);
        self.cache.clear(&mut self.host, &self.columns);
        self.observers.clear();
        if let Some(mut guard) = self.subscription.take() {
            guard.release();
        }
        self.torn_down = true;
        log::debug!("grid torn down");
    }

    /// Cumulative render counters.
    #[must_use]
    pub fn counters(&self) -> RenderCounters {
        self.cache.counters()
    }

    /// The dataset.
    #[must_use]
    pub fn data(&self) -> &D {
        &self.data
    }

    /// The dataset, for in-place edits.
    ///
    /// Follow length changes with [`update_row_count`](Self::update_row_count)
    /// and item changes with [`invalidate_rows`](Self::invalidate_rows).
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// The host surface.
    #[must_use]
    pub fn host(&self) -> &P {
        &self.host
    }

    /// The host surface, mutably.
    pub fn host_mut(&mut self) -> &mut P {
        &mut self.host
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    /// The scheduler, mutably, for hosts that drive time themselves.
    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    /// The column table.
    #[must_use]
    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }

    /// The effective options.
    #[must_use]
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The paging state.
    #[must_use]
    pub fn paging(&self) -> &PagingGeometry {
        &self.paging
    }

    /// The render cache.
    #[must_use]
    pub fn cache(&self) -> &RenderCache<D::Item, P, S> {
        &self.cache
    }

    /// Current real scroll position.
    #[must_use]
    pub fn scroll_position(&self) -> Point {
        self.scroll
    }

    /// Direction of the last vertical scroll, [`ScrollDirection::Forward`]
    /// before the first one.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Width of the canvas holding the rows.
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Returns `true` while a debounced render is pending.
    #[must_use]
    pub fn render_pending(&self) -> bool {
        self.render_task.is_pending()
    }
}
