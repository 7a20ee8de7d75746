// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible and render ranges.

use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor` and `round`
use kurbo::{Point, Size};
use trellis_columns::PositionTable;

/// Direction of the most recent vertical scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward higher row indices.
    Forward,
    /// Toward lower row indices.
    Backward,
    /// No vertical movement.
    #[default]
    None,
}

impl ScrollDirection {
    /// Direction implied by a signed position delta.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Forward
        } else if delta < 0.0 {
            Self::Backward
        } else {
            Self::None
        }
    }
}

/// Everything needed to derive row and pixel ranges for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeQuery {
    /// Real scroll position: `x` is scroll-left, `y` is scroll-top.
    pub scroll: Point,
    /// Current paging offset added to the real scroll-top.
    pub offset: f64,
    /// Viewport size.
    pub viewport: Size,
    /// Height of every row.
    pub row_height: f64,
    /// Number of rows, including phantom rows reserved for new data.
    pub row_count: usize,
}

impl RangeQuery {
    fn virtual_top(&self) -> f64 {
        finite_or_zero(self.scroll.y) + finite_or_zero(self.offset)
    }

    fn row_height(&self) -> f64 {
        if self.row_height.is_finite() && self.row_height > 0.0 {
            self.row_height
        } else {
            1.0
        }
    }
}

/// Rows and pixels intersecting the viewport.
///
/// `rows` is half-open and always lies inside `0..row_count`. It includes one
/// extra row below the last partially visible one.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleRange {
    /// Visible row indices.
    pub rows: Range<usize>,
    /// Left edge of the viewport in canvas pixels.
    pub left_px: f64,
    /// Right edge of the viewport in canvas pixels.
    pub right_px: f64,
}

impl VisibleRange {
    /// Columns intersecting the viewport.
    #[must_use]
    pub fn columns(&self, positions: &PositionTable) -> Range<usize> {
        positions.columns_in(self.left_px, self.right_px)
    }
}

/// Rows and pixels that should be materialized: the visible range plus buffers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderRange {
    /// Row indices to mount, half-open, inside `0..row_count`.
    pub rows: Range<usize>,
    /// Left bound of the cell window in canvas pixels.
    pub left_px: f64,
    /// Right bound of the cell window in canvas pixels.
    pub right_px: f64,
}

impl RenderRange {
    /// Columns whose cells should be mounted on rows without span overrides.
    #[must_use]
    pub fn columns(&self, positions: &PositionTable) -> Range<usize> {
        positions.columns_in(self.left_px, self.right_px)
    }

    /// Returns `true` if no rows should be mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows intersecting the viewport.
///
/// `top = floor((scroll_top + offset) / row_height)` and
/// `bottom = floor((scroll_top + offset + viewport_height) / row_height) + 1`,
/// both clamped into `0..row_count`.
#[must_use]
pub fn visible_range(query: &RangeQuery) -> VisibleRange {
    let (top, bottom) = unclamped_rows(query);
    let left_px = finite_or_zero(query.scroll.x);
    VisibleRange {
        rows: clamp_rows(top, bottom, query.row_count),
        left_px,
        right_px: left_px + finite_or_zero(query.viewport.width),
    }
}

/// The visible range expanded by a directional buffer.
///
/// The trailing side of the scroll direction receives a full viewport's
/// worth of rows, the leading side `min_buffer` rows. Without a direction
/// both sides receive `min_buffer`. The pixel window is widened by one
/// viewport width on each side and clamped into `[0, canvas_width]`.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use trellis_viewport::{RangeQuery, ScrollDirection, render_range};
///
/// let query = RangeQuery {
///     scroll: Point::new(0.0, 2500.0),
///     offset: 0.0,
///     viewport: Size::new(800.0, 500.0),
///     row_height: 25.0,
///     row_count: 10_000,
/// };
/// let range = render_range(&query, ScrollDirection::Forward, 3, 2000.0);
/// // Visible rows 100..=121, three rows above, twenty rows below.
/// assert_eq!(range.rows, 97..142);
/// assert_eq!((range.left_px, range.right_px), (0.0, 1600.0));
/// ```
#[must_use]
pub fn render_range(
    query: &RangeQuery,
    direction: ScrollDirection,
    min_buffer: usize,
    canvas_width: f64,
) -> RenderRange {
    let (top, bottom) = unclamped_rows(query);
    let buffer = floor_index((finite_or_zero(query.viewport.height) / query.row_height()).round());
    let (before, after) = match direction {
        ScrollDirection::Backward => (buffer, min_buffer),
        ScrollDirection::Forward => (min_buffer, buffer),
        ScrollDirection::None => (min_buffer, min_buffer),
    };
    let vw = finite_or_zero(query.viewport.width);
    let canvas_width = finite_or_zero(canvas_width).max(0.0);
    let left = finite_or_zero(query.scroll.x);
    RenderRange {
        rows: clamp_rows(
            top.saturating_sub(before),
            bottom.saturating_add(after),
            query.row_count,
        ),
        left_px: (left - vw).clamp(0.0, canvas_width),
        right_px: (left + vw + vw).clamp(0.0, canvas_width),
    }
}

/// Row containing the virtual-space position `real_y + offset`.
///
/// The result is not clamped to the row count.
#[must_use]
pub fn row_at_position(real_y: f64, offset: f64, row_height: f64) -> usize {
    if !(row_height.is_finite() && row_height > 0.0) {
        return 0;
    }
    floor_index((finite_or_zero(real_y) + finite_or_zero(offset)) / row_height)
}

/// Top of `row` in real pixels for the given paging offset.
#[must_use]
pub fn row_top(row: usize, row_height: f64, offset: f64) -> f64 {
    row_height * row as f64 - offset
}

fn unclamped_rows(query: &RangeQuery) -> (usize, usize) {
    let rh = query.row_height();
    let y = query.virtual_top();
    let top = floor_index(y / rh);
    let bottom = floor_index((y + finite_or_zero(query.viewport.height)) / rh).saturating_add(1);
    (top, bottom)
}

/// Clamps an inclusive `[top, bottom]` pair into a half-open range inside `0..len`.
fn clamp_rows(top: usize, bottom: usize, len: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let last = len - 1;
    let top = top.min(last);
    let bottom = bottom.min(last).max(top);
    top..bottom + 1
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Floors a position into an index; NaN and non-positive values give zero.
pub(crate) fn floor_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is positive and `as` saturates; callers clamp to a valid index"
    )]
    let index = value.floor() as usize;
    index
}
