// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped teardown queue.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Identifies the unmount event a batch of cleanup entries came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Raw value, for diagnostics.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What to tear down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanupKind<R, C> {
    /// Detach a row node.
    Row {
        /// Row index the node belonged to.
        row: usize,
        /// The node.
        node: R,
    },
    /// Run the column teardown hook on an enriched cell node.
    Cell {
        /// Row index the cell belonged to.
        row: usize,
        /// Column index of the cell.
        column: usize,
        /// The node.
        node: C,
    },
}

#[derive(Clone, Debug)]
struct Entry<R, C> {
    group: GroupId,
    kind: CleanupKind<R, C>,
}

/// FIFO of cleanup entries, drained one group at a time.
///
/// Entries pushed between two [`begin_group`](Self::begin_group) calls share
/// a [`GroupId`]; [`pop_group`](Self::pop_group) removes all of them at once,
/// so a consumer never observes a group half torn down.
///
/// ```rust
/// use trellis_deferred::{CleanupKind, CleanupQueue};
///
/// let mut queue = CleanupQueue::<&str, &str>::new();
/// let g = queue.begin_group();
/// queue.push_cell(g, 7, 2, "cell");
/// queue.push_row(g, 7, "row");
/// let later = queue.begin_group();
/// queue.push_row(later, 9, "other");
///
/// let (group, batch) = queue.pop_group().unwrap();
/// assert_eq!(group, g);
/// assert_eq!(batch.len(), 2);
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct CleanupQueue<R, C> {
    entries: VecDeque<Entry<R, C>>,
    next_group: u64,
}

impl<R, C> Default for CleanupQueue<R, C> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            next_group: 0,
        }
    }
}

impl<R, C> CleanupQueue<R, C> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh group id.
    pub fn begin_group(&mut self) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        id
    }

    /// Queues a row node.
    pub fn push_row(&mut self, group: GroupId, row: usize, node: R) {
        self.entries.push_back(Entry {
            group,
            kind: CleanupKind::Row { row, node },
        });
    }

    /// Queues an enriched cell node.
    pub fn push_cell(&mut self, group: GroupId, row: usize, column: usize, node: C) {
        self.entries.push_back(Entry {
            group,
            kind: CleanupKind::Cell { row, column, node },
        });
    }

    /// Removes every entry sharing the head entry's group.
    pub fn pop_group(&mut self) -> Option<(GroupId, Vec<CleanupKind<R, C>>)> {
        let group = self.entries.front()?.group;
        let mut batch = Vec::new();
        while self.entries.front().is_some_and(|e| e.group == group) {
            if let Some(entry) = self.entries.pop_front() {
                batch.push(entry.kind);
            }
        }
        log::trace!("cleanup group {}: {} entries", group.0, batch.len());
        Some((group, batch))
    }

    /// Removes every entry regardless of group.
    pub fn drain_all(&mut self) -> impl Iterator<Item = CleanupKind<R, C>> + '_ {
        self.entries.drain(..).map(|e| e.kind)
    }

    /// Returns `true` if a row entry for `row` is queued.
    #[must_use]
    pub fn contains_row(&self, row: usize) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.kind, CleanupKind::Row { row: r, .. } if r == row))
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
