// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use trellis_columns::{ColumnDefaults, ColumnSpec, ColumnTable};
use trellis_viewport::{PagingGeometry, RangeQuery, ScrollDirection, render_range};

fn bench_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("trellis_viewport");

    let mut paging = PagingGeometry::new(1_000_000.0);
    paging.update_extent(25.0 * 10_000_000.0, 600.0);
    group.bench_function("scroll_to_sweep(pages=25000)", |b| {
        b.iter(|| {
            let mut y = 0.0;
            while y < paging.total_virtual_extent() {
                black_box(paging.scroll_to(y));
                y += 9_973.0;
            }
        });
    });

    group.bench_function("render_range", |b| {
        let query = RangeQuery {
            scroll: Point::new(1200.0, 480_000.0),
            offset: 0.0,
            viewport: Size::new(1600.0, 900.0),
            row_height: 25.0,
            row_count: 10_000_000,
        };
        b.iter(|| black_box(render_range(black_box(&query), ScrollDirection::Forward, 3, 8000.0)));
    });

    group.finish();
}

fn bench_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("trellis_columns");

    for &n in &[16_usize, 256] {
        let columns = ColumnTable::new(
            (0..n).map(|i| ColumnSpec::new(format!("c{i}")).width(60.0 + (i % 7) as f64 * 10.0)),
            &ColumnDefaults::default(),
        );
        let total = columns.total_width();
        group.bench_function(format!("columns_in(n={n})"), |b| {
            b.iter(|| {
                let mut x = 0.0;
                let mut hits = 0;
                while x < total {
                    hits += columns.positions().columns_in(x, x + 1600.0).len();
                    x += 37.0;
                }
                black_box(hits)
            });
        });

        group.bench_function(format!("autosize(n={n})"), |b| {
            b.iter_batched(
                || columns.clone(),
                |mut table| black_box(table.autosize(total * 0.75, 10.0)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_paging, bench_columns);
criterion_main!(benches);
