// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-only update planning for sorted key sets.

/// How to move from one sorted key set to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPlan<'a> {
    /// The overlap is a contiguous run anchored at the first or last old
    /// key; only keys outside it change.
    Edges {
        /// Old keys before the overlap.
        drop_front: &'a [usize],
        /// Old keys after the overlap.
        drop_back: &'a [usize],
        /// New keys before the overlap.
        add_front: &'a [usize],
        /// New keys after the overlap.
        add_back: &'a [usize],
    },
    /// No usable overlap: drop every old key and add every new one.
    Rebuild,
}

impl KeyPlan<'_> {
    /// Returns `true` if applying the plan changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Edges {
                drop_front,
                drop_back,
                add_front,
                add_back,
            } => {
                drop_front.is_empty()
                    && drop_back.is_empty()
                    && add_front.is_empty()
                    && add_back.is_empty()
            }
            Self::Rebuild => false,
        }
    }
}

/// Plans the update from `old` to `new`; both must be sorted and free of
/// duplicates.
///
/// The overlap is the run of keys present in both. It is usable when it is
/// non-empty, contiguous in both inputs, and starts at `old`'s first key or
/// ends at `old`'s last key. Anything else is a [`KeyPlan::Rebuild`], except
/// that two empty sets need no work at all.
///
/// ```rust
/// use trellis_reconcile::{KeyPlan, plan_keys};
///
/// let old: Vec<usize> = (100..=140).collect();
/// let new: Vec<usize> = (120..=160).collect();
/// let KeyPlan::Edges { drop_front, drop_back, add_front, add_back } = plan_keys(&old, &new) else {
///     panic!("overlapping ranges update their edges");
/// };
/// assert_eq!(drop_front, &old[..20]);
/// assert!(drop_back.is_empty() && add_front.is_empty());
/// assert_eq!(add_back.first(), Some(&141));
/// ```
#[must_use]
pub fn plan_keys<'a>(old: &'a [usize], new: &'a [usize]) -> KeyPlan<'a> {
    if old.is_empty() && new.is_empty() {
        return KeyPlan::Edges {
            drop_front: &[],
            drop_back: &[],
            add_front: &[],
            add_back: &[],
        };
    }
    let (Some(&lo), Some(&hi)) = (
        old.iter().find(|k| new.binary_search(k).is_ok()),
        old.iter().rev().find(|k| new.binary_search(k).is_ok()),
    ) else {
        return KeyPlan::Rebuild;
    };
    if old.first() != Some(&lo) && old.last() != Some(&hi) {
        return KeyPlan::Rebuild;
    }
    let (Ok(old_lo), Ok(old_hi), Ok(new_lo), Ok(new_hi)) = (
        old.binary_search(&lo),
        old.binary_search(&hi),
        new.binary_search(&lo),
        new.binary_search(&hi),
    ) else {
        return KeyPlan::Rebuild;
    };
    if old[old_lo..=old_hi] != new[new_lo..=new_hi] {
        return KeyPlan::Rebuild;
    }
    KeyPlan::Edges {
        drop_front: &old[..old_lo],
        drop_back: &old[old_hi + 1..],
        add_front: &new[..new_lo],
        add_back: &new[new_hi + 1..],
    }
}
