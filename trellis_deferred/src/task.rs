// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scheduler seam and single-slot task bookkeeping.

use core::fmt::Debug;
use core::time::Duration;

/// Work a grid asks its host to run later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// A debounced render pass.
    Render,
    /// One enrichment tick.
    Enrich,
    /// One cleanup tick.
    Cleanup,
}

/// Host timer facility.
///
/// The grid never blocks and never runs deferred work itself. It asks the
/// scheduler for a handle, and the host hands that handle back (for example
/// to `Grid::run_task`) once the delay has elapsed. Cancelling a handle that
/// already fired or was already cancelled must be harmless.
pub trait Scheduler {
    /// Identifies one scheduled task.
    type Handle: Copy + Eq + Debug;

    /// Schedules `task` to fire after `delay`.
    fn schedule(&mut self, task: DeferredTask, delay: Duration) -> Self::Handle;

    /// Cancels a pending task.
    fn cancel(&mut self, handle: Self::Handle);
}

/// At most one pending task of one kind.
///
/// Every reschedule cancels the previous handle first, so a loop driven
/// through a slot never has two ticks in flight. A handle that fires after
/// it was replaced is rejected by [`fire`](Self::fire).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSlot<H> {
    pending: Option<H>,
}

impl<H> Default for TaskSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Copy + Eq + Debug> TaskSlot<H> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending task and schedules `task` in its place.
    pub fn replace<S>(&mut self, scheduler: &mut S, task: DeferredTask, delay: Duration) -> H
    where
        S: Scheduler<Handle = H> + ?Sized,
    {
        self.cancel(scheduler);
        let handle = scheduler.schedule(task, delay);
        self.pending = Some(handle);
        handle
    }

    /// Cancels the pending task, if any.
    pub fn cancel<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H> + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    /// Consumes `handle` if it is the pending one.
    ///
    /// Returns `false` for stale handles; the slot is left untouched.
    pub fn fire(&mut self, handle: H) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Returns `true` if `handle` is the pending one.
    #[must_use]
    pub fn holds(&self, handle: H) -> bool {
        self.pending == Some(handle)
    }

    /// Returns `true` if a task is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
