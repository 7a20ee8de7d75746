// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Reconcile: the render cache of a virtualized grid.
//!
//! Given the rows and pixels a frame should show (a
//! [`RenderRange`](trellis_viewport::RenderRange)), [`RenderCache::reconcile`]
//! unmounts what fell out, updates cells of rows that stayed, and mounts what
//! came in. Nodes are created and attached through a [`RenderSurface`]; the
//! cache never looks inside them.
//!
//! Two [`Strategy`] implementations share one external behavior:
//!
//! - [`Batched`]: hash-keyed slots; new nodes are requested in one batch call
//!   and distributed into the cache in reverse order.
//! - [`Incremental`]: ordered slots; edge overlaps are planned with
//!   [`plan_keys`] and each node is inserted before its next mounted sibling.
//!
//! The cache also tracks enrichment state per cell and queues enriched nodes
//! for grouped teardown, using the types of [`trellis_deferred`].
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_columns::{ColumnDefaults, ColumnSpec, ColumnTable};
//! use trellis_reconcile::{
//!     CellRequest, Frame, Incremental, Placement, RenderCache, RenderSurface, RowRequest,
//! };
//! use trellis_viewport::RenderRange;
//!
//! #[derive(Default)]
//! struct Nodes(u32);
//!
//! impl RenderSurface<&'static str> for Nodes {
//!     type Row = u32;
//!     type Cell = u32;
//!     fn create_row(&mut self, _: &RowRequest<'_, &'static str>) -> u32 { self.0 += 1; self.0 }
//!     fn create_cell(&mut self, _: &CellRequest<'_, &'static str>) -> u32 { self.0 += 1; self.0 }
//!     fn attach_row(&mut self, _: &u32, _: Placement<'_, u32>) {}
//!     fn attach_cell(&mut self, _: &u32, _: &u32, _: Placement<'_, u32>) {}
//!     fn detach_row(&mut self, _: &u32) {}
//!     fn detach_cell(&mut self, _: &u32, _: &u32) {}
//!     fn hide_row(&mut self, _: &u32) {}
//! }
//!
//! let data = vec!["a"; 1000];
//! let columns = ColumnTable::new(
//!     (0..4).map(|i| ColumnSpec::new(format!("c{i}"))),
//!     &ColumnDefaults::fixed_width(100.0),
//! );
//! let frame = Frame { data: &data, columns: &columns, row_height: 25.0, offset: 0.0 };
//! let mut surface = Nodes::default();
//! let mut cache = RenderCache::<_, Nodes, Incremental>::new();
//!
//! let range = |rows| RenderRange { rows, left_px: 0.0, right_px: 400.0 };
//! cache.reconcile(&mut surface, &frame, &range(100..141));
//! let stats = cache.reconcile(&mut surface, &frame, &range(120..161));
//! assert_eq!(stats.mounted, (141..161).collect::<Vec<_>>());
//! assert_eq!(stats.unmounted, (100..120).collect::<Vec<_>>());
//! assert_eq!(cache.mounted_cells(150), vec![0, 1, 2, 3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod dataset;
mod overlap;
mod slots;
mod strategy;
mod surface;

pub use cache::{CellSlot, Frame, ReconcileStats, RenderCache, RenderCounters, desired_cells};
pub use dataset::{ColSpan, ColumnOverride, Dataset, RowMetadata};
pub use overlap::{KeyPlan, plan_keys};
pub use slots::{HashSlots, OrderedSlots, Slots};
pub use strategy::{Batched, Incremental, Strategy, StrategyMode};
pub use surface::{BuiltRow, CellRequest, Placement, RenderSurface, RowBatch, RowRequest};
