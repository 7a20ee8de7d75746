// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration.

use core::time::Duration;

use kurbo::Size;

/// Grid-wide options.
///
/// Every field has a usable default. Out-of-range values are never rejected;
/// [`sanitized`](Self::sanitized) clamps them and the grid applies it on
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Height of every row in pixels.
    pub row_height: f64,
    /// Width given to columns that declare none.
    pub default_column_width: f64,
    /// Rows rendered beyond the viewport on the side the scroll is leaving.
    pub min_row_buffer: usize,
    /// Fit resizable columns to the viewport width on construction and resize.
    pub force_fit_columns: bool,
    /// Run column enrichment callbacks in deferred ticks after rendering.
    pub enable_async_post_render: bool,
    /// Delay between enrichment ticks.
    pub async_post_render_delay: Duration,
    /// Defer teardown of enriched nodes to cleanup ticks.
    pub enable_async_post_render_cleanup: bool,
    /// Delay between cleanup ticks.
    pub async_post_render_cleanup_delay: Duration,
    /// Render every scroll synchronously, never debounced.
    pub force_sync_scrolling: bool,
    /// Scroll distance since the last render below which nothing is rendered.
    pub render_threshold: f64,
    /// Delay of a debounced render after a long jump.
    pub render_debounce: Duration,
    /// Largest scroll extent the platform can represent.
    pub max_scroll_extent: f64,
    /// Reserve one viewport of empty rows below the data.
    pub leave_space_for_new_rows: bool,
    /// Stretch the canvas to the viewport when columns are narrower.
    pub full_width_rows: bool,
    /// Width of the vertical and height of the horizontal scrollbar.
    pub scrollbar_size: Size,
    /// Smallest width force-fit may shrink a column to, whatever its own bound.
    pub absolute_min_column_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: 25.0,
            default_column_width: 80.0,
            min_row_buffer: 3,
            force_fit_columns: false,
            enable_async_post_render: false,
            async_post_render_delay: Duration::from_millis(50),
            enable_async_post_render_cleanup: false,
            async_post_render_cleanup_delay: Duration::from_millis(40),
            force_sync_scrolling: false,
            render_threshold: 20.0,
            render_debounce: Duration::from_millis(50),
            max_scroll_extent: 1_000_000.0,
            leave_space_for_new_rows: false,
            full_width_rows: false,
            scrollbar_size: Size::ZERO,
            absolute_min_column_width: 0.0,
        }
    }
}

fn at_least(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { fallback }
}

impl GridOptions {
    /// Returns a copy with every field clamped into a usable range.
    ///
    /// Non-finite values fall back to the default; row height and column
    /// width are at least one pixel; the scroll ceiling is at least one
    /// viewport's worth of rows.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            row_height: at_least(self.row_height, 1.0, d.row_height),
            default_column_width: at_least(self.default_column_width, 1.0, d.default_column_width),
            render_threshold: at_least(self.render_threshold, 0.0, d.render_threshold),
            max_scroll_extent: at_least(self.max_scroll_extent, 1.0, d.max_scroll_extent),
            scrollbar_size: Size::new(
                at_least(self.scrollbar_size.width, 0.0, 0.0),
                at_least(self.scrollbar_size.height, 0.0, 0.0),
            ),
            absolute_min_column_width: at_least(self.absolute_min_column_width, 0.0, 0.0),
            ..self.clone()
        }
    }
}
