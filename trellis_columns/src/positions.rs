// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix-sum column edges.

use alloc::vec::Vec;
use core::ops::Range;

/// Left and right pixel edges of every column, derived by prefix sum.
///
/// The table has no identity of its own: it is always a pure function of the
/// column widths it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionTable {
    left: Vec<f64>,
    right: Vec<f64>,
}

impl PositionTable {
    /// Builds edges from widths in column order.
    pub fn from_widths(widths: impl IntoIterator<Item = f64>) -> Self {
        let widths = widths.into_iter();
        let (lower, _) = widths.size_hint();
        let mut left = Vec::with_capacity(lower);
        let mut right = Vec::with_capacity(lower);
        let mut x = 0.0;
        for w in widths {
            left.push(x);
            x += w;
            right.push(x);
        }
        Self { left, right }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left edge of column `index`.
    #[must_use]
    pub fn left(&self, index: usize) -> Option<f64> {
        self.left.get(index).copied()
    }

    /// Right edge of column `index`.
    #[must_use]
    pub fn right(&self, index: usize) -> Option<f64> {
        self.right.get(index).copied()
    }

    /// All left edges.
    #[must_use]
    pub fn lefts(&self) -> &[f64] {
        &self.left
    }

    /// All right edges.
    #[must_use]
    pub fn rights(&self) -> &[f64] {
        &self.right
    }

    /// Sum of all widths.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.right.last().copied().unwrap_or(0.0)
    }

    /// Index of the column whose `[left, right)` interval contains `x`.
    ///
    /// Returns `None` for positions before the first column or at/after the
    /// last right edge. Zero-width columns never contain a position.
    #[must_use]
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if x.is_nan() || x < 0.0 {
            return None;
        }
        let i = self.right.partition_point(|&r| r <= x);
        (i < self.len() && self.left[i] <= x).then_some(i)
    }

    /// Columns that intersect the pixel window `[left_px, right_px]`.
    ///
    /// A column is included when its right edge lies beyond `left_px` and its
    /// left edge does not lie beyond `right_px`. Both bounds are found by
    /// binary search.
    #[must_use]
    pub fn columns_in(&self, left_px: f64, right_px: f64) -> Range<usize> {
        let start = self.right.partition_point(|&r| r <= left_px);
        let end = self.left.partition_point(|&l| l <= right_px);
        start..end.max(start)
    }
}
