// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying defaults to column specs and distributing free width.

use alloc::string::ToString;

use crate::column::{Column, ColumnDefaults, ColumnSpec};

/// Width changes smaller than this are treated as "no progress".
const WIDTH_EPSILON: f64 = 1e-9;

fn non_negative_factor(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

/// Resolves a partial spec into a [`Column`].
///
/// Missing bounds are derived from the factors: a column that cannot shrink
/// has `min_width == width`, otherwise `1`; a column that cannot grow has
/// `max_width == width`, otherwise unbounded. The width is then clamped into
/// the bounds. Nothing is rejected.
///
/// ```rust
/// use trellis_columns::{ColumnDefaults, ColumnSpec, resolve_column};
///
/// let fixed = ColumnDefaults::fixed_width(50.0);
/// let col = resolve_column(&ColumnSpec::new("a").min_width(70.0), &fixed);
/// assert_eq!(col.width(), 70.0);
/// assert_eq!(col.min_width(), 70.0);
/// assert_eq!(col.max_width(), 70.0);
/// ```
#[must_use]
pub fn resolve_column(spec: &ColumnSpec, defaults: &ColumnDefaults) -> Column {
    let fallback_width = if defaults.width.is_finite() {
        defaults.width.max(0.0)
    } else {
        0.0
    };
    let mut width = match spec.width {
        Some(w) if w.is_finite() => w.max(0.0),
        _ => fallback_width,
    };
    let grow = non_negative_factor(spec.grow.unwrap_or(defaults.grow));
    let shrink = non_negative_factor(spec.shrink.unwrap_or(defaults.shrink));

    let min_width = match spec.min_width {
        Some(m) if !m.is_nan() => m.max(0.0),
        _ if shrink == 0.0 => width,
        _ => 1.0,
    };
    if width < min_width {
        width = min_width;
    }
    let max_width = match spec.max_width {
        Some(m) if !m.is_nan() => m.max(min_width),
        _ if grow == 0.0 => width,
        _ => f64::INFINITY,
    };
    if width > max_width {
        width = max_width;
    }

    Column {
        id: spec.id.clone(),
        field: spec.field.clone().unwrap_or_else(|| spec.id.to_string()),
        width,
        min_width,
        max_width,
        grow,
        shrink,
        resizable: spec.resizable.unwrap_or(defaults.resizable),
        rerender_on_resize: spec.rerender_on_resize,
        post_render: spec.post_render,
        post_render_cleanup: spec.post_render_cleanup,
    }
}

/// Grows or shrinks `columns` toward `target` total width.
///
/// A positive delta is shared proportionally to `grow`, a negative one to
/// `shrink`. The first pass divides by `max(1, sum(factors))`, so factor sums
/// below one distribute only that fraction of the delta. Space rejected by a
/// column hitting its bound is redistributed among the remaining columns on
/// later passes. The loop stops as soon as a pass makes no progress, which
/// bounds it by `columns.len() + 1` passes on any constraint set.
///
/// Returns `true` if any width changed.
pub fn distribute_width(columns: &mut [Column], target: f64) -> bool {
    if !target.is_finite() || columns.is_empty() {
        return false;
    }
    let current: f64 = columns.iter().map(|c| c.width).sum();
    let delta = target - current;
    if delta.abs() <= WIDTH_EPSILON {
        return false;
    }
    let growing = delta > 0.0;
    let factor = |c: &Column| if growing { c.grow } else { c.shrink };

    let factor_sum: f64 = columns.iter().map(factor).sum();
    if factor_sum <= 0.0 {
        return false;
    }
    let mut remaining = delta * (factor_sum / factor_sum.max(1.0));
    let mut frozen = alloc::vec![false; columns.len()];
    let mut changed = false;

    for _ in 0..=columns.len() {
        let active_sum: f64 = columns
            .iter()
            .zip(&frozen)
            .filter(|(_, f)| !**f)
            .map(|(c, _)| factor(c))
            .sum();
        if active_sum <= 0.0 || remaining.abs() <= WIDTH_EPSILON {
            break;
        }
        let mut applied = 0.0;
        for (column, frozen) in columns.iter_mut().zip(frozen.iter_mut()) {
            let f = factor(column);
            if *frozen || f <= 0.0 {
                continue;
            }
            let wanted = column.width + remaining * f / active_sum;
            let clamped = wanted.clamp(column.min_width, column.max_width);
            if clamped != wanted {
                *frozen = true;
            }
            applied += clamped - column.width;
            column.width = clamped;
        }
        if applied.abs() <= WIDTH_EPSILON {
            break;
        }
        changed = true;
        remaining -= applied;
    }

    log::trace!(
        "distributed {delta} px across {} columns, {remaining} px left over",
        columns.len()
    );
    changed
}
