// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-level host seams.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Size;
use trellis_columns::PositionTable;

use crate::error::SurfaceError;

/// The scrollable element around the grid canvas.
pub trait ScrollPort {
    /// Size of the visible area, scrollbars excluded.
    fn viewport_size(&self) -> Size;

    /// Sets the size of the scrollable content.
    fn set_scroll_extent(&mut self, width: f64, height: f64);

    /// Moves the scroll position. The host must not report this move back
    /// as a user scroll.
    fn set_scroll_position(&mut self, left: f64, top: f64);

    /// Positions every column, typically by rewriting one left and one right
    /// rule per column index.
    ///
    /// Fails when the backing structure for those rules is gone.
    fn apply_column_rules(
        &mut self,
        positions: &PositionTable,
        canvas_width: f64,
    ) -> Result<(), SurfaceError>;
}

/// A host registration delivering scroll events to a grid.
pub trait ScrollSubscription {
    /// Removes the registration. Called exactly once.
    fn release(&mut self);
}

/// Owns a [`ScrollSubscription`] and releases it exactly once.
///
/// Release happens on [`release`](Self::release) or on drop, whichever
/// comes first.
pub struct SubscriptionGuard {
    subscription: Option<Box<dyn ScrollSubscription>>,
}

impl SubscriptionGuard {
    /// Takes ownership of `subscription`.
    pub fn new(subscription: impl ScrollSubscription + 'static) -> Self {
        Self {
            subscription: Some(Box::new(subscription)),
        }
    }

    /// Releases the subscription now. Returns `false` if it was released
    /// already.
    pub fn release(&mut self) -> bool {
        match self.subscription.take() {
            Some(mut s) => {
                s.release();
                true
            }
            None => false,
        }
    }

    /// Returns `true` until the subscription is released.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::{ScrollSubscription, SubscriptionGuard};

    struct Counting(Rc<Cell<u32>>);

    impl ScrollSubscription for Counting {
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn releases_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        drop(SubscriptionGuard::new(Counting(count.clone())));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn explicit_release_is_not_repeated() {
        let count = Rc::new(Cell::new(0));
        let mut guard = SubscriptionGuard::new(Counting(count.clone()));
        assert!(guard.release());
        assert!(!guard.release());
        assert!(!guard.is_active());
        drop(guard);
        assert_eq!(count.get(), 1);
    }
}
