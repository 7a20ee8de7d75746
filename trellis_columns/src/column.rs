// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column declarations and resolved descriptors.

use alloc::string::String;

/// Stable identifier of a column.
pub type ColumnId = String;

/// Partial column declaration as written by a grid user.
///
/// Every field except the id is optional; missing fields are filled from
/// [`ColumnDefaults`] when the spec is resolved into a [`Column`].
///
/// ```rust
/// use trellis_columns::ColumnSpec;
///
/// let spec = ColumnSpec::new("price").field("unit_price").width(120.0).min_width(60.0);
/// assert_eq!(spec.id, "price");
/// assert_eq!(spec.width, Some(120.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSpec {
    /// Column identifier, unique within a table.
    pub id: ColumnId,
    /// Data field the column reads. Defaults to the id.
    pub field: Option<String>,
    /// Preferred width in pixels.
    pub width: Option<f64>,
    /// Lower width bound.
    pub min_width: Option<f64>,
    /// Upper width bound.
    pub max_width: Option<f64>,
    /// Share of positive free space this column absorbs.
    pub grow: Option<f64>,
    /// Share of negative free space this column absorbs.
    pub shrink: Option<f64>,
    /// Whether force-fit autosizing and user resizing may change the width.
    pub resizable: Option<bool>,
    /// Whether a width change must remount every cell of this column.
    pub rerender_on_resize: bool,
    /// Whether this column registers a deferred enrichment callback.
    pub post_render: bool,
    /// Whether this column registers a teardown callback for enriched cells.
    pub post_render_cleanup: bool,
}

impl ColumnSpec {
    /// Creates a spec with only an id.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the data field.
    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the preferred width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the minimum width.
    #[must_use]
    pub fn min_width(mut self, min_width: f64) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Sets the maximum width.
    #[must_use]
    pub fn max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Sets the grow factor.
    #[must_use]
    pub fn grow(mut self, grow: f64) -> Self {
        self.grow = Some(grow);
        self
    }

    /// Sets the shrink factor.
    #[must_use]
    pub fn shrink(mut self, shrink: f64) -> Self {
        self.shrink = Some(shrink);
        self
    }

    /// Sets whether the column is resizable.
    #[must_use]
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = Some(resizable);
        self
    }

    /// Marks the column as needing a full remount when its width changes.
    #[must_use]
    pub fn rerender_on_resize(mut self) -> Self {
        self.rerender_on_resize = true;
        self
    }

    /// Registers deferred enrichment for this column.
    ///
    /// When `cleanup` is `true` the column also supplies a teardown callback
    /// that runs when an enriched cell is unmounted.
    #[must_use]
    pub fn post_render(mut self, cleanup: bool) -> Self {
        self.post_render = true;
        self.post_render_cleanup = cleanup;
        self
    }
}

/// Defaults applied to missing [`ColumnSpec`] fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnDefaults {
    /// Width used when a spec has none.
    pub width: f64,
    /// Grow factor used when a spec has none.
    pub grow: f64,
    /// Shrink factor used when a spec has none.
    pub shrink: f64,
    /// Resizability used when a spec has none.
    pub resizable: bool,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            width: 80.0,
            grow: 1.0,
            shrink: 1.0,
            resizable: true,
        }
    }
}

impl ColumnDefaults {
    /// Defaults for grids that declare an explicit default column width.
    ///
    /// An explicit width means "keep this width": both factors are zero, so
    /// missing bounds collapse onto the width itself.
    #[must_use]
    pub fn fixed_width(width: f64) -> Self {
        Self {
            width,
            grow: 0.0,
            shrink: 0.0,
            resizable: true,
        }
    }
}

/// A resolved column descriptor.
///
/// Invariants: `min_width <= width <= max_width`, `grow >= 0`, `shrink >= 0`.
/// Descriptors are read-only outside this crate; widths change only through
/// [`ColumnTable`](crate::ColumnTable) operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub(crate) id: ColumnId,
    pub(crate) field: String,
    pub(crate) width: f64,
    pub(crate) min_width: f64,
    pub(crate) max_width: f64,
    pub(crate) grow: f64,
    pub(crate) shrink: f64,
    pub(crate) resizable: bool,
    pub(crate) rerender_on_resize: bool,
    pub(crate) post_render: bool,
    pub(crate) post_render_cleanup: bool,
}

impl Column {
    /// Column identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Data field the column reads.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Resolved width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Lower width bound.
    #[must_use]
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Upper width bound; may be `f64::INFINITY`.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Grow factor.
    #[must_use]
    pub fn grow(&self) -> f64 {
        self.grow
    }

    /// Shrink factor.
    #[must_use]
    pub fn shrink(&self) -> f64 {
        self.shrink
    }

    /// Whether the column may be resized.
    #[must_use]
    pub fn resizable(&self) -> bool {
        self.resizable
    }

    /// Whether a width change requires remounting the column's cells.
    #[must_use]
    pub fn rerender_on_resize(&self) -> bool {
        self.rerender_on_resize
    }

    /// Whether the column has a deferred enrichment callback.
    #[must_use]
    pub fn has_post_render(&self) -> bool {
        self.post_render
    }

    /// Whether the column has a teardown callback for enriched cells.
    #[must_use]
    pub fn has_post_render_cleanup(&self) -> bool {
        self.post_render_cleanup
    }

    /// Clamps `width` into this column's bounds.
    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 {
        if width.is_nan() {
            return self.width;
        }
        width.clamp(self.min_width, self.max_width)
    }
}
