// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic scheduler driven by an explicit clock.

use alloc::vec::Vec;
use core::time::Duration;

use crate::task::{DeferredTask, Scheduler};

/// Handle issued by [`ManualScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Pending {
    id: TaskId,
    due: Duration,
    task: DeferredTask,
}

/// A [`Scheduler`] whose clock only moves when told to.
///
/// Useful for tests and for hosts that run their own frame loop: schedule
/// through the trait, then call [`advance`](Self::advance) or
/// [`advance_to_next`](Self::advance_to_next) and hand each returned id back
/// to whoever owns the work.
///
/// ```rust
/// use core::time::Duration;
/// use trellis_deferred::{DeferredTask, ManualScheduler, Scheduler};
///
/// let mut sched = ManualScheduler::new();
/// let a = sched.schedule(DeferredTask::Cleanup, Duration::from_millis(40));
/// let b = sched.schedule(DeferredTask::Enrich, Duration::from_millis(50));
///
/// assert!(sched.advance(Duration::from_millis(10)).is_empty());
/// assert_eq!(sched.advance(Duration::from_millis(30)), vec![(a, DeferredTask::Cleanup)]);
/// assert_eq!(sched.advance_to_next(), Some((b, DeferredTask::Enrich)));
/// assert_eq!(sched.now(), Duration::from_millis(50));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    /// Creates a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Pending tasks of a given kind.
    #[must_use]
    pub fn pending_of(&self, task: DeferredTask) -> usize {
        self.pending.iter().filter(|p| p.task == task).count()
    }

    /// Moves the clock forward and returns every task now due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<(TaskId, DeferredTask)> {
        self.now = self.now.saturating_add(by);
        let mut due = Vec::new();
        while let Some(next) = self.pop_due() {
            due.push(next);
        }
        due
    }

    /// Jumps the clock to the earliest pending task and returns it.
    pub fn advance_to_next(&mut self) -> Option<(TaskId, DeferredTask)> {
        let due = self.pending.iter().map(|p| p.due).min()?;
        if due > self.now {
            self.now = due;
        }
        self.pop_due()
    }

    /// Removes and returns the earliest task whose due time has passed.
    pub fn pop_due(&mut self) -> Option<(TaskId, DeferredTask)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= self.now)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        let p = self.pending.remove(index);
        Some((p.id, p.task))
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TaskId;

    fn schedule(&mut self, task: DeferredTask, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            task,
        });
        id
    }

    fn cancel(&mut self, handle: TaskId) {
        self.pending.retain(|p| p.id != handle);
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::ManualScheduler;
    use crate::{DeferredTask, Scheduler};

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut sched = ManualScheduler::new();
        let id = sched.schedule(DeferredTask::Render, Duration::from_millis(50));
        sched.cancel(id);
        assert!(sched.advance(Duration::from_secs(1)).is_empty());
        sched.cancel(id);
    }

    #[test]
    fn same_due_time_fires_in_schedule_order() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(DeferredTask::Enrich, Duration::ZERO);
        let b = sched.schedule(DeferredTask::Cleanup, Duration::ZERO);
        let fired = sched.advance(Duration::ZERO);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].0, a);
        assert_eq!(fired[1].0, b);
    }

    #[test]
    fn advance_to_next_on_empty() {
        let mut sched = ManualScheduler::new();
        assert_eq!(sched.advance_to_next(), None);
        assert_eq!(sched.now(), Duration::ZERO);
    }
}
