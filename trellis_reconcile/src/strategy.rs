// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable cache strategies.

use core::fmt::Debug;

use crate::slots::{HashSlots, OrderedSlots, Slots};

/// Which mount path a strategy takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyMode {
    /// Diff by membership, build all new nodes in one batch, append them.
    Batched,
    /// Plan edge-only updates and insert each node next to its sibling.
    Incremental,
}

/// Index structure and mount path used by a [`RenderCache`](crate::RenderCache).
///
/// Both strategies produce the same mounted set for the same input; they
/// differ in how many surface calls they make and in what order.
pub trait Strategy: Copy + Debug + Default + 'static {
    /// Storage for row entries and, per row, cell entries.
    type Slots<V: Debug>: Slots<V>;

    /// Mount path.
    const MODE: StrategyMode;
}

/// Hash-keyed cache with batched creation.
///
/// New rows (and new cells of existing rows) are requested from the surface
/// in a single [`create_rows_batch`](crate::RenderSurface::create_rows_batch)
/// or [`create_cells_batch`](crate::RenderSurface::create_cells_batch) call,
/// then distributed into the cache in reverse order. Surfaces that can parse
/// one markup string for a whole batch override those methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Batched;

impl Strategy for Batched {
    type Slots<V: Debug> = HashSlots<V>;

    const MODE: StrategyMode = StrategyMode::Batched;
}

/// Ordered cache with sibling-relative insertion.
///
/// When the new range overlaps the mounted one at an edge, only the keys
/// outside the overlap are touched, and every new node is placed before its
/// next mounted sibling so surface order matches index order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Incremental;

impl Strategy for Incremental {
    type Slots<V: Debug> = OrderedSlots<V>;

    const MODE: StrategyMode = StrategyMode::Incremental;
}
