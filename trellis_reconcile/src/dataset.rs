// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only view of the rows a grid displays.

use alloc::string::String;
use alloc::vec::Vec;

/// How many columns a cell covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColSpan {
    /// A fixed number of columns; zero is treated as one.
    Cols(usize),
    /// Every column from this one to the last.
    Rest,
}

impl ColSpan {
    /// Number of columns covered when the cell starts at `column` of `column_count`.
    ///
    /// The result is at least one and never reaches past the last column.
    #[must_use]
    pub fn resolve(self, column: usize, column_count: usize) -> usize {
        let remaining = column_count.saturating_sub(column).max(1);
        match self {
            Self::Cols(n) => n.clamp(1, remaining),
            Self::Rest => remaining,
        }
    }
}

/// Per-cell overrides carried in [`RowMetadata`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnOverride {
    /// Column span.
    pub span: Option<ColSpan>,
    /// Opaque formatter token handed to the surface.
    pub formatter: Option<String>,
}

/// Optional per-row overrides.
///
/// Nothing here is interpreted by the cache except spans; the rest is passed
/// through to the surface in mount requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowMetadata {
    /// Extra CSS-like classes for the row.
    pub css_classes: Option<String>,
    /// Formatter token applied to every cell without its own override.
    pub formatter: Option<String>,
    /// Overrides keyed by column index.
    pub columns: Vec<(usize, ColumnOverride)>,
}

impl RowMetadata {
    /// Override for `column`, if any.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&ColumnOverride> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, o)| o)
    }

    /// Returns `true` if any cell of the row spans columns.
    #[must_use]
    pub fn has_spans(&self) -> bool {
        self.columns.iter().any(|(_, o)| o.span.is_some())
    }

    /// Formatter token for `column`: the cell override, else the row's.
    #[must_use]
    pub fn formatter_for(&self, column: usize) -> Option<&str> {
        self.column(column)
            .and_then(|o| o.formatter.as_deref())
            .or(self.formatter.as_deref())
    }
}

/// Rows shown by a grid.
///
/// Only length and random access are required. Hosts with grouping, paging
/// or lazy loading implement this over their own store; an absent item below
/// [`len`](Self::len) is rendered as a loading row.
pub trait Dataset {
    /// Row item type.
    type Item;

    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns `true` if there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`, if loaded.
    fn item(&self, index: usize) -> Option<&Self::Item>;

    /// Overrides for row `index`.
    fn metadata(&self, index: usize) -> Option<RowMetadata> {
        let _ = index;
        None
    }
}

impl<T> Dataset for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> Dataset for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn item(&self, index: usize) -> Option<&D::Item> {
        (**self).item(index)
    }

    fn metadata(&self, index: usize) -> Option<RowMetadata> {
        (**self).metadata(index)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{ColSpan, ColumnOverride, Dataset, RowMetadata};

    #[test]
    fn span_resolution() {
        assert_eq!(ColSpan::Cols(0).resolve(2, 5), 1);
        assert_eq!(ColSpan::Cols(3).resolve(2, 5), 3);
        assert_eq!(ColSpan::Rest.resolve(2, 5), 3);
        assert_eq!(ColSpan::Rest.resolve(9, 5), 1);
    }

    #[test]
    fn span_is_clamped_to_the_remaining_columns() {
        assert_eq!(ColSpan::Cols(10).resolve(2, 4), 2);
        assert_eq!(ColSpan::Cols(usize::MAX).resolve(1, 4), 3);
        assert_eq!(ColSpan::Cols(usize::MAX).resolve(7, 4), 1);
    }

    #[test]
    fn formatter_falls_back_to_row() {
        let meta = RowMetadata {
            formatter: Some("row".to_string()),
            columns: vec![(
                1,
                ColumnOverride {
                    formatter: Some("cell".to_string()),
                    ..ColumnOverride::default()
                },
            )],
            ..RowMetadata::default()
        };
        assert_eq!(meta.formatter_for(1), Some("cell"));
        assert_eq!(meta.formatter_for(0), Some("row"));
        assert!(!meta.has_spans());
    }

    #[test]
    fn vec_dataset() {
        let data = vec![1, 2, 3];
        assert_eq!(Dataset::len(&data), 3);
        assert_eq!(data.item(1), Some(&2));
        assert_eq!(data.item(3), None);
        assert!(data.metadata(0).is_none());
    }
}
