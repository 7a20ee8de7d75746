// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

use crate::range::floor_index;

/// Number of pages the real extent is cut into once paging kicks in.
const PAGES_PER_REAL_EXTENT: f64 = 100.0;

/// Maps an unbounded virtual extent onto a real extent below a platform ceiling.
///
/// Below the ceiling there is a single page and virtual and real positions
/// coincide. Above it the real extent is pinned to the ceiling and cut into
/// pages of `real_extent / 100` pixels. Each page carries an offset of
/// `round(page * jump_coefficient)` that is added to a real position to
/// obtain the virtual one, so the last page still reaches the end of the
/// virtual extent.
///
/// The current page and offset are state: they change when the real scroll
/// position crosses into another page. Whenever the offset changes every row
/// positioned with the old offset is misplaced, so callers must drop all
/// mounted rows (see [`PagingUpdate::offset_changed`]).
///
/// ```rust
/// use trellis_viewport::PagingGeometry;
///
/// let mut paging = PagingGeometry::new(1_000_000.0);
/// paging.update_extent(25_000_000.0, 500.0);
/// assert_eq!(paging.page_count(), 2500);
///
/// let update = paging.scroll_to(24_999_500.0);
/// assert!(update.offset_changed);
/// assert!(update.real <= paging.real_extent());
/// assert_eq!(paging.real_to_virtual(update.real), 24_999_500.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PagingGeometry {
    ceiling: f64,
    viewport_extent: f64,
    total_virtual_extent: f64,
    real_extent: f64,
    page_extent: f64,
    page_count: usize,
    jump_coefficient: f64,
    page: usize,
    offset: f64,
}

/// A virtual position resolved to a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealPosition {
    /// Page containing the position.
    pub page: usize,
    /// Offset of that page.
    pub offset: f64,
    /// Position on the real scrollable element.
    pub real: f64,
}

/// Result of moving the geometry to a new position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagingUpdate {
    /// Real scroll position the surface should show.
    pub real: f64,
    /// The page offset changed; all mounted rows are stale.
    pub offset_changed: bool,
}

impl PagingGeometry {
    /// Creates an empty geometry with the given platform ceiling.
    ///
    /// Ceilings below one pixel are raised to one.
    #[must_use]
    pub fn new(ceiling: f64) -> Self {
        let ceiling = if ceiling.is_nan() { 1.0 } else { ceiling.max(1.0) };
        Self {
            ceiling,
            viewport_extent: 0.0,
            total_virtual_extent: 0.0,
            real_extent: 0.0,
            page_extent: 0.0,
            page_count: 1,
            jump_coefficient: 0.0,
            page: 0,
            offset: 0.0,
        }
    }

    /// Recomputes the page layout for a new virtual extent or viewport.
    ///
    /// The current page is clamped into the new page range. Returns `true`
    /// if that changed the offset.
    pub fn update_extent(&mut self, total_virtual_extent: f64, viewport_extent: f64) -> bool {
        let total = sanitize(total_virtual_extent);
        self.viewport_extent = sanitize(viewport_extent);
        self.total_virtual_extent = total;
        if total < self.ceiling {
            self.real_extent = total;
            self.page_extent = total;
            self.page_count = 1;
            self.jump_coefficient = 0.0;
        } else {
            self.real_extent = self.ceiling;
            self.page_extent = self.ceiling / PAGES_PER_REAL_EXTENT;
            self.page_count = floor_index(total / self.page_extent).max(2);
            self.jump_coefficient = (total - self.real_extent) / (self.page_count - 1) as f64;
        }
        let page = self.page.min(self.page_count - 1);
        let changed = self.set_page(page);
        log::debug!(
            "paging: virtual {total} px -> real {} px, {} pages, jump {}",
            self.real_extent,
            self.page_count,
            self.jump_coefficient
        );
        changed
    }

    /// Changes only the viewport extent used for clamping and jump detection.
    pub fn set_viewport_extent(&mut self, viewport_extent: f64) {
        self.viewport_extent = sanitize(viewport_extent);
    }

    /// Resolves a virtual position without changing any state.
    #[must_use]
    pub fn virtual_to_real(&self, virtual_pos: f64) -> RealPosition {
        let page = self.page_for(virtual_pos);
        let offset = self.offset_of(page);
        RealPosition {
            page,
            offset,
            real: virtual_pos - offset,
        }
    }

    /// Converts a real position to a virtual one using the current page.
    #[must_use]
    pub fn real_to_virtual(&self, real: f64) -> f64 {
        real + self.offset
    }

    /// Largest virtual scroll position that still fills the viewport.
    #[must_use]
    pub fn max_virtual_scroll(&self) -> f64 {
        (self.total_virtual_extent - self.viewport_extent).max(0.0)
    }

    /// Moves to a virtual position.
    ///
    /// The position is clamped into `[0, max_virtual_scroll() + slack]`, where
    /// `slack` accounts for a horizontal scrollbar overlapping the viewport.
    pub fn scroll_to_with_slack(&mut self, virtual_pos: f64, slack: f64) -> PagingUpdate {
        let max = self.max_virtual_scroll() + sanitize(slack);
        let y = if virtual_pos.is_nan() { 0.0 } else { virtual_pos.clamp(0.0, max) };
        let target = self.virtual_to_real(y);
        let offset_changed = self.set_page(target.page);
        PagingUpdate {
            real: target.real,
            offset_changed,
        }
    }

    /// Moves to a virtual position. See [`scroll_to_with_slack`](Self::scroll_to_with_slack).
    pub fn scroll_to(&mut self, virtual_pos: f64) -> PagingUpdate {
        self.scroll_to_with_slack(virtual_pos, 0.0)
    }

    /// Follows a scroll that happened on the real element.
    ///
    /// `travelled` is the real distance moved since the previous scroll event.
    /// Short moves keep the virtual position continuous and may hand back a
    /// corrected real position when a page boundary is crossed. Moves of at
    /// least one viewport (a scrollbar drag, say) derive the page from the
    /// real position's share of the real range instead, which keeps the thumb
    /// proportional near the tail; the real position is left untouched.
    pub fn on_real_scroll(&mut self, real: f64, travelled: f64) -> PagingUpdate {
        if travelled.abs() < self.viewport_extent {
            return self.scroll_to(real + self.offset);
        }
        let real_range = self.real_extent - self.viewport_extent;
        let page = if real_range <= 0.0 || self.page_extent <= 0.0 {
            0
        } else {
            let ratio = (self.total_virtual_extent - self.viewport_extent) / real_range;
            floor_index(real * ratio / self.page_extent).min(self.page_count - 1)
        };
        let offset_changed = self.set_page(page);
        PagingUpdate {
            real,
            offset_changed,
        }
    }

    fn page_for(&self, virtual_pos: f64) -> usize {
        if self.page_count <= 1 || self.page_extent <= 0.0 {
            return 0;
        }
        floor_index(virtual_pos / self.page_extent).min(self.page_count - 1)
    }

    fn offset_of(&self, page: usize) -> f64 {
        (page as f64 * self.jump_coefficient).round()
    }

    fn set_page(&mut self, page: usize) -> bool {
        let offset = self.offset_of(page);
        self.page = page;
        if offset == self.offset {
            return false;
        }
        log::debug!("paging: page {page}, offset {} -> {offset}", self.offset);
        self.offset = offset;
        true
    }

    /// Platform ceiling.
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Viewport extent on the paged axis.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Logical content extent.
    #[must_use]
    pub fn total_virtual_extent(&self) -> f64 {
        self.total_virtual_extent
    }

    /// Extent presented to the scrollable element.
    #[must_use]
    pub fn real_extent(&self) -> f64 {
        self.real_extent
    }

    /// Extent of one page in real pixels.
    #[must_use]
    pub fn page_extent(&self) -> f64 {
        self.page_extent
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Per-page offset increment.
    #[must_use]
    pub fn jump_coefficient(&self) -> f64 {
        self.jump_coefficient
    }

    /// Current page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current offset, `round(page * jump_coefficient)`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        log::warn!("non-finite extent {extent} clamped to zero");
        0.0
    }
}
