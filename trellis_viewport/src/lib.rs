// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Viewport: scroll paging and row/column windows for virtualized grids.
//!
//! Two concerns live here, both free of any rendering backend:
//!
//! - [`PagingGeometry`] maps a virtual content extent (row count times row
//!   height) onto a real scrollable extent that stays below a platform
//!   ceiling. Large datasets are cut into pages whose offset is added back to
//!   the real scroll position.
//! - [`visible_range`] and [`render_range`] turn a scroll position, paging
//!   offset and viewport size into the rows and pixels to materialize. The
//!   render range adds a buffer that leans toward the current
//!   [`ScrollDirection`].
//!
//! Column windows are derived from a [`trellis_columns::PositionTable`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_viewport::{PagingGeometry, RangeQuery, ScrollDirection, render_range};
//!
//! // One million rows, 25px each: far above a 1,000,000px ceiling.
//! let mut paging = PagingGeometry::new(1_000_000.0);
//! paging.update_extent(25_000_000.0, 500.0);
//!
//! // Jump to the very end.
//! let update = paging.scroll_to(paging.max_virtual_scroll());
//! let query = RangeQuery {
//!     scroll: Point::new(0.0, update.real),
//!     offset: paging.offset(),
//!     viewport: Size::new(800.0, 500.0),
//!     row_height: 25.0,
//!     row_count: 1_000_000,
//! };
//! let range = render_range(&query, ScrollDirection::Forward, 3, 800.0);
//! assert_eq!(range.rows.end, 1_000_000);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod paging;
mod range;

pub use paging::{PagingGeometry, PagingUpdate, RealPosition};
pub use range::{
    RangeQuery, RenderRange, ScrollDirection, VisibleRange, render_range, row_at_position,
    row_top, visible_range,
};
