// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavioral tests for paging and range calculation working together.

use kurbo::{Point, Size};
use trellis_viewport::{PagingGeometry, RangeQuery, visible_range};

const VIEWPORT: f64 = 500.0;
const ROW_HEIGHT: f64 = 25.0;

fn geometry(rows: usize) -> PagingGeometry {
    let mut paging = PagingGeometry::new(1_000_000.0);
    paging.update_extent(rows as f64 * ROW_HEIGHT, VIEWPORT);
    paging
}

fn query(paging: &PagingGeometry, real: f64, rows: usize) -> RangeQuery {
    RangeQuery {
        scroll: Point::new(0.0, real),
        offset: paging.offset(),
        viewport: Size::new(800.0, VIEWPORT),
        row_height: ROW_HEIGHT,
        row_count: rows,
    }
}

#[test]
fn million_rows_scenario() {
    let rows = 1_000_000;
    let mut paging = geometry(rows);
    assert_eq!(paging.page_count(), 2500);
    assert!((paging.jump_coefficient() - 9603.84).abs() < 0.01);

    let update = paging.scroll_to(paging.max_virtual_scroll());
    let range = visible_range(&query(&paging, update.real, rows));
    assert!(range.rows.end - 1 <= 999_999);
    assert_eq!(range.rows.end, rows);
}

#[test]
fn virtual_real_round_trip_within_a_pixel() {
    for rows in [1_000, 39_999, 40_000, 1_000_000, 3_000_000] {
        let mut paging = geometry(rows);
        let max = paging.max_virtual_scroll();
        let mut p = 0.0;
        while p <= max {
            let update = paging.scroll_to(p);
            let back = paging.real_to_virtual(update.real);
            assert!((back - p).abs() <= 1.0, "{rows} rows: {p} -> {back}");
            p += max / 997.0 + 1.0;
        }
    }
}

#[test]
fn visible_range_stays_inside_the_data() {
    for rows in [1, 7, 20, 21, 5_000, 1_000_000] {
        let mut paging = geometry(rows);
        let max = paging.max_virtual_scroll();
        for step in 0..=200 {
            let p = max * f64::from(step) / 200.0;
            let update = paging.scroll_to(p);
            let range = visible_range(&query(&paging, update.real, rows));
            assert!(range.rows.start < range.rows.end, "{rows} rows at {p}: empty");
            assert!(range.rows.end <= rows, "{rows} rows at {p}: {:?}", range.rows);
        }
    }
}

#[test]
fn real_scroll_events_track_virtual_position() {
    let rows = 1_000_000;
    let mut paging = geometry(rows);
    let mut real = 0.0;
    let mut last_virtual = 0.0;
    // Creep forward in small steps, the way a wheel does.
    for _ in 0..2000 {
        let update = paging.on_real_scroll(real + 40.0, 40.0);
        real = update.real;
        let virtual_pos = paging.real_to_virtual(real);
        assert!(virtual_pos > last_virtual, "virtual position must advance");
        last_virtual = virtual_pos;
    }
    assert!((last_virtual - 80_000.0).abs() < 1e-6);
}
