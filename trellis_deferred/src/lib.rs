// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Deferred: bookkeeping for work a grid postpones to idle time.
//!
//! After a render pass a grid may enrich cells (charts, images, anything too
//! slow for the scroll path) and, once those cells scroll away, tear the
//! enrichment down again. Both loops run one small step per scheduled tick.
//! This crate holds their state and the seam to the host's timers:
//!
//! - [`Scheduler`]: schedule a [`DeferredTask`] after a delay, cancel it.
//! - [`TaskSlot`]: at most one pending handle per loop; rescheduling always
//!   cancels first, and stale handles are recognized when they fire.
//! - [`ManualScheduler`]: a deterministic scheduler for tests and frame-loop
//!   hosts.
//! - [`PostProcessLedger`]: per-cell [`PostStatus`]; no record means
//!   unprocessed.
//! - [`CleanupQueue`]: teardown entries grouped by [`GroupId`] and drained a
//!   whole group at a time.
//! - [`EnrichmentCursor`]: the direction-aware walk over a row range.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use trellis_deferred::{DeferredTask, ManualScheduler, TaskSlot};
//!
//! let mut sched = ManualScheduler::new();
//! let mut render = TaskSlot::new();
//!
//! // Two scroll events inside the debounce window: only the last survives.
//! render.replace(&mut sched, DeferredTask::Render, Duration::from_millis(50));
//! let last = render.replace(&mut sched, DeferredTask::Render, Duration::from_millis(50));
//!
//! let fired = sched.advance(Duration::from_millis(50));
//! assert_eq!(fired, vec![(last, DeferredTask::Render)]);
//! assert!(render.fire(last));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cleanup;
mod cursor;
mod ledger;
mod manual;
mod task;

pub use cleanup::{CleanupKind, CleanupQueue, GroupId};
pub use cursor::EnrichmentCursor;
pub use ledger::{PostProcessLedger, PostStatus, RowRecords};
pub use manual::{ManualScheduler, TaskId};
pub use task::{DeferredTask, Scheduler, TaskSlot};
