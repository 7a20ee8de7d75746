// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use trellis_columns::{ColumnDefaults, ColumnSpec, ColumnTable};
use trellis_reconcile::{
    Batched, CellRequest, Frame, Incremental, Placement, RenderCache, RenderSurface, RowRequest,
    Strategy,
};
use trellis_viewport::RenderRange;

/// A surface that only hands out ids.
#[derive(Default)]
struct Counter(u64);

impl RenderSurface<u32> for Counter {
    type Row = u64;
    type Cell = u64;

    fn create_row(&mut self, _: &RowRequest<'_, u32>) -> u64 {
        self.0 += 1;
        self.0
    }

    fn create_cell(&mut self, _: &CellRequest<'_, u32>) -> u64 {
        self.0 += 1;
        self.0
    }

    fn attach_row(&mut self, row: &u64, _: Placement<'_, u64>) {
        black_box(row);
    }

    fn attach_cell(&mut self, _: &u64, cell: &u64, _: Placement<'_, u64>) {
        black_box(cell);
    }

    fn detach_row(&mut self, row: &u64) {
        black_box(row);
    }

    fn detach_cell(&mut self, _: &u64, cell: &u64) {
        black_box(cell);
    }

    fn hide_row(&mut self, _: &u64) {}
}

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

fn table(columns: usize) -> ColumnTable {
    ColumnTable::new(
        (0..columns).map(|i| ColumnSpec::new(format!("c{i}"))),
        &ColumnDefaults::fixed_width(100.0),
    )
}

fn window(start: usize, rows: usize, left_px: f64, width: f64) -> RenderRange {
    RenderRange {
        rows: start..start + rows,
        left_px,
        right_px: left_px + width,
    }
}

fn primed<S: Strategy>(
    data: &[u32],
    columns: &ColumnTable,
    first: &RenderRange,
) -> (RenderCache<u32, Counter, S>, Counter) {
    let mut surface = Counter::default();
    let mut cache = RenderCache::new();
    let frame = Frame {
        data,
        columns,
        row_height: 25.0,
        offset: 0.0,
    };
    cache.reconcile(&mut surface, &frame, first);
    (cache, surface)
}

fn bench_strategy<S: Strategy>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("trellis_reconcile/{name}"));
    group.sample_size(50);

    let data: Vec<u32> = (0..100_000).collect();
    for &cols in &[8_usize, 32] {
        let columns = table(cols);
        let frame = Frame {
            data: data.as_slice(),
            columns: &columns,
            row_height: 25.0,
            offset: 0.0,
        };

        // One small step, the common case while wheel scrolling.
        group.bench_function(format!("step_scroll(cols={cols})"), |b| {
            b.iter_batched(
                || primed::<S>(&data, &columns, &window(1000, 60, 0.0, 2400.0)),
                |(mut cache, mut surface)| {
                    let stats =
                        cache.reconcile(&mut surface, &frame, &window(1003, 60, 0.0, 2400.0));
                    black_box(stats);
                },
                BatchSize::SmallInput,
            );
        });

        // A jump with no overlap; every row is replaced.
        group.bench_function(format!("jump(cols={cols})"), |b| {
            b.iter_batched(
                || primed::<S>(&data, &columns, &window(1000, 60, 0.0, 2400.0)),
                |(mut cache, mut surface)| {
                    let stats =
                        cache.reconcile(&mut surface, &frame, &window(50_000, 60, 0.0, 2400.0));
                    black_box(stats);
                },
                BatchSize::SmallInput,
            );
        });

        // Horizontal scroll; rows stay, cells change.
        group.bench_function(format!("horizontal(cols={cols})"), |b| {
            b.iter_batched(
                || primed::<S>(&data, &columns, &window(1000, 60, 0.0, 1600.0)),
                |(mut cache, mut surface)| {
                    let stats =
                        cache.reconcile(&mut surface, &frame, &window(1000, 60, 800.0, 1600.0));
                    black_box(stats);
                },
                BatchSize::SmallInput,
            );
        });

        // A random walk of short and long moves.
        group.bench_function(format!("random_walk_64(cols={cols})"), |b| {
            b.iter_batched(
                || {
                    (
                        primed::<S>(&data, &columns, &window(1000, 60, 0.0, 2400.0)),
                        Lcg(0x7E11_15AA_0000_0001),
                    )
                },
                |((mut cache, mut surface), mut rng)| {
                    let mut start = 1000_usize;
                    for _ in 0..64 {
                        let step = (rng.next_u32() % 200) as usize;
                        start = if rng.next_u32() % 2 == 0 {
                            (start + step).min(data.len() - 60)
                        } else {
                            start.saturating_sub(step)
                        };
                        let left = f64::from(rng.next_u32() % 800);
                        black_box(cache.reconcile(
                            &mut surface,
                            &frame,
                            &window(start, 60, left, 2400.0),
                        ));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    bench_strategy::<Batched>(c, "batched");
    bench_strategy::<Incremental>(c, "incremental");
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
