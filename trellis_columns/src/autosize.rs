// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Force-fit autosizing.
//!
//! Unlike [`distribute_width`](crate::distribute_width), which follows the
//! declared grow/shrink factors, autosizing fits resizable columns to the
//! viewport in whole pixels: shrinking is proportional to how much room each
//! column has above its minimum, growing is proportional to its current width.

use alloc::vec::Vec;

use crate::column::Column;

/// Result of an [`autosize`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutosizeOutcome {
    /// At least one width changed.
    pub changed: bool,
    /// A column marked `rerender_on_resize` changed width.
    pub rerender: bool,
}

fn floor_px(value: f64) -> f64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Pixel steps are small and non-negative; saturation is acceptable"
    )]
    let truncated = value as i64;
    truncated as f64
}

/// Fits resizable columns into `available` pixels.
///
/// `absolute_min_width` is a floor shared by every column (typically the
/// horizontal padding and border of a cell). Non-resizable columns never
/// change. Each phase stops as soon as an iteration fails to make progress.
pub fn autosize(
    columns: &mut [Column],
    available: f64,
    absolute_min_width: f64,
) -> AutosizeOutcome {
    if !available.is_finite() || columns.is_empty() {
        return AutosizeOutcome::default();
    }
    let mut widths: Vec<f64> = columns.iter().map(|c| c.width).collect();
    let mut total: f64 = widths.iter().sum();
    let floor_of = |c: &Column| c.min_width.max(absolute_min_width);

    let mut shrink_leeway: f64 = columns
        .iter()
        .filter(|c| c.resizable)
        .map(|c| (c.width - floor_of(c)).max(0.0))
        .sum();

    let mut prev_total = total;
    while total > available && shrink_leeway > 0.0 {
        let proportion = (total - available) / shrink_leeway;
        for (c, width) in columns.iter().zip(widths.iter_mut()) {
            if total <= available {
                break;
            }
            let min = floor_of(c);
            if !c.resizable || *width <= min {
                continue;
            }
            let mut step = floor_px(proportion * (*width - min));
            if step <= 0.0 {
                step = 1.0;
            }
            step = step.min(*width - min);
            total -= step;
            shrink_leeway -= step;
            *width -= step;
        }
        if prev_total <= total {
            break;
        }
        prev_total = total;
    }

    prev_total = total;
    while total < available && total > 0.0 {
        let proportion = available / total;
        for (c, width) in columns.iter().zip(widths.iter_mut()) {
            if total >= available {
                break;
            }
            if !c.resizable || c.max_width <= *width {
                continue;
            }
            let mut step = (floor_px(proportion * *width) - *width).min(c.max_width - *width);
            if step <= 0.0 {
                step = 1.0;
            }
            step = step.min(available - total);
            total += step;
            *width += step;
        }
        if prev_total >= total {
            break;
        }
        prev_total = total;
    }

    let mut outcome = AutosizeOutcome::default();
    for (c, width) in columns.iter_mut().zip(widths) {
        if c.width != width {
            outcome.changed = true;
            outcome.rerender |= c.rerender_on_resize;
            c.width = width;
        }
    }
    outcome
}
