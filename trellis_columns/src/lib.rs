// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Columns: column descriptors and horizontal layout for virtualized grids.
//!
//! This crate owns everything a grid needs to know about its columns before it
//! can decide which cells to materialize:
//!
//! - [`ColumnSpec`]: a partial, user-facing column declaration.
//! - [`ColumnDefaults`]: defaults applied to every missing field of a spec.
//! - [`Column`]: a resolved descriptor with `min_width <= width <= max_width`.
//! - [`distribute_width`]: grows or shrinks resolved columns toward an
//!   available width, proportionally to their grow/shrink factors.
//! - [`autosize`]: the "force fit" variant driven by per-column leeway.
//! - [`PositionTable`]: prefix-sum left/right edges with `O(log n)` pixel lookup.
//! - [`ColumnTable`]: an owned, versioned table of resolved columns. Every
//!   mutation produces a new [`version`](ColumnTable::version) and rebuilds the
//!   position table, so derived caches can key off the version instead of
//!   watching individual fields.
//!
//! Invalid constraints are never rejected. A width outside `[min_width, max_width]`
//! is clamped, negative factors become zero, and non-finite widths fall back to
//! the default width.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_columns::{ColumnDefaults, ColumnSpec, ColumnTable};
//!
//! let specs = (0..10).map(|i| ColumnSpec::new(format!("c{i}")).width(100.0).grow(1.0));
//! let mut table = ColumnTable::new(specs, &ColumnDefaults::default());
//!
//! // Fit ten 100px columns into a 1200px viewport.
//! table.resolve_to(1200.0);
//! assert!((table.total_width() - 1200.0).abs() < 1e-9);
//! assert!((table.column(0).unwrap().width() - 120.0).abs() < 1e-9);
//!
//! // Which column is under x = 250?
//! assert_eq!(table.positions().index_at(250.0), Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autosize;
mod column;
mod positions;
mod resolve;
mod table;

pub use autosize::{AutosizeOutcome, autosize};
pub use column::{Column, ColumnDefaults, ColumnId, ColumnSpec};
pub use positions::PositionTable;
pub use resolve::{distribute_width, resolve_column};
pub use table::ColumnTable;
