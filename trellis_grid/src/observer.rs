// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use trellis_viewport::{RenderRange, VisibleRange};

bitflags::bitflags! {
    /// Axes a scroll event moved.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollChange: u8 {
        /// Scroll-top changed.
        const VERTICAL   = 0b0000_0001;
        /// Scroll-left changed.
        const HORIZONTAL = 0b0000_0010;
        /// The paging offset changed and every row was remounted.
        const PAGE       = 0b0000_0100;
    }
}

/// Receives grid lifecycle notifications. Every method defaults to a no-op.
///
/// Observers run synchronously inside the grid operation that triggers them
/// and cannot reach back into the grid.
pub trait GridObserver {
    /// A scroll event was handled. `scroll` is the real position.
    fn scrolled(&mut self, scroll: Point, change: ScrollChange) {
        let _ = (scroll, change);
    }

    /// The visible range moved far enough to schedule or run a render.
    fn viewport_changed(&mut self, visible: &VisibleRange) {
        let _ = visible;
    }

    /// A render pass is about to reconcile `range`.
    fn before_rows_render(&mut self, range: &RenderRange) {
        let _ = range;
    }

    /// Rows mounted by the last pass.
    fn rows_rendered(&mut self, rows: &[usize]) {
        let _ = rows;
    }

    /// Number of cells mounted by the last pass, new rows included.
    fn cells_rendered(&mut self, count: usize) {
        let _ = count;
    }

    /// Rows unmounted by the last pass or invalidation.
    fn rows_removed(&mut self, rows: &[usize]) {
        let _ = rows;
    }
}

/// Handle for removing a registered observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next: u64,
    entries: Vec<(ObserverId, Box<dyn GridObserver>)>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn GridObserver>) -> ObserverId {
        let id = ObserverId(self.next);
        self.next += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> Option<Box<dyn GridObserver>> {
        let i = self.entries.iter().position(|(e, _)| *e == id)?;
        Some(self.entries.remove(i).1)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn each(&mut self, mut f: impl FnMut(&mut dyn GridObserver)) {
        for (_, o) in &mut self.entries {
            f(o.as_mut());
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}
