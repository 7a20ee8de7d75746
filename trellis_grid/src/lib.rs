// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Grid: a virtualized data grid core.
//!
//! [`Grid`] keeps only the rows near the viewport mounted, over datasets of
//! any length. It combines the lower-level crates:
//!
//! - [`trellis_columns`] resolves column widths and the position table.
//! - [`trellis_viewport`] maps virtual scroll positions onto a bounded real
//!   extent and derives visible and render ranges.
//! - [`trellis_reconcile`] diffs mounted rows and cells against each range.
//! - [`trellis_deferred`] drives the debounced render, the enrichment loop
//!   and the grouped cleanup loop through a host [`Scheduler`].
//!
//! The host supplies one value implementing both
//! [`RenderSurface`](trellis_reconcile::RenderSurface) (nodes) and
//! [`ScrollPort`] (the scrollable element). It calls
//! [`Grid::handle_scroll`] on scroll events and [`Grid::run_task`] when a
//! scheduled task fires.
//!
//! [`Scheduler`]: trellis_deferred::Scheduler
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_columns::{ColumnSpec, PositionTable};
//! use trellis_deferred::ManualScheduler;
//! use trellis_grid::{Grid, GridOptions, ScrollPort, SurfaceError};
//! use trellis_reconcile::{CellRequest, Placement, RenderSurface, RowRequest};
//!
//! #[derive(Default)]
//! struct Host {
//!     next: u32,
//!     top: f64,
//! }
//!
//! impl RenderSurface<u64> for Host {
//!     type Row = u32;
//!     type Cell = u32;
//!     fn create_row(&mut self, _: &RowRequest<'_, u64>) -> u32 { self.next += 1; self.next }
//!     fn create_cell(&mut self, _: &CellRequest<'_, u64>) -> u32 { self.next += 1; self.next }
//!     fn attach_row(&mut self, _: &u32, _: Placement<'_, u32>) {}
//!     fn attach_cell(&mut self, _: &u32, _: &u32, _: Placement<'_, u32>) {}
//!     fn detach_row(&mut self, _: &u32) {}
//!     fn detach_cell(&mut self, _: &u32, _: &u32) {}
//!     fn hide_row(&mut self, _: &u32) {}
//! }
//!
//! impl ScrollPort for Host {
//!     fn viewport_size(&self) -> Size { Size::new(800.0, 500.0) }
//!     fn set_scroll_extent(&mut self, _: f64, _: f64) {}
//!     fn set_scroll_position(&mut self, _: f64, top: f64) { self.top = top; }
//!     fn apply_column_rules(&mut self, _: &PositionTable, _: f64) -> Result<(), SurfaceError> {
//!         Ok(())
//!     }
//! }
//!
//! let data: Vec<u64> = (0..1_000_000).collect();
//! let columns = (0..5).map(|i| ColumnSpec::new(format!("c{i}")).width(100.0));
//! let host = Host::default();
//! let mut grid: Grid<_, _, _> =
//!     Grid::new(data, host, ManualScheduler::new(), columns, GridOptions::default())?;
//! assert_eq!(grid.cache().mounted_rows(), (0..42).collect::<Vec<_>>());
//!
//! // 25 million virtual pixels fit into a one million pixel real extent.
//! grid.scroll_to_virtual(f64::MAX)?;
//! let visible = grid.visible_range();
//! assert_eq!(visible.rows.end, 1_000_000);
//! assert!(grid.scroll_position().y <= 1_000_000.0);
//! # Ok::<(), trellis_grid::GridError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod grid;
mod observer;
mod options;
mod port;

pub use error::{GridError, SurfaceError};
pub use grid::Grid;
pub use observer::{GridObserver, ObserverId, ScrollChange};
pub use options::GridOptions;
pub use port::{ScrollPort, ScrollSubscription, SubscriptionGuard};

pub use trellis_columns;
pub use trellis_deferred;
pub use trellis_reconcile;
pub use trellis_viewport;
