// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render cache behavior against a recording surface, for both strategies.

use std::collections::HashMap;
use std::ops::Range;

use trellis_columns::{Column, ColumnDefaults, ColumnSpec, ColumnTable};
use trellis_reconcile::{
    Batched, CellRequest, ColSpan, ColumnOverride, Dataset, Frame, Incremental, Placement,
    RenderCache, RenderSurface, RowMetadata, RowRequest, Strategy,
};
use trellis_viewport::RenderRange;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    CreateRow(usize),
    CreateCell(usize, usize),
    AttachRow(u32),
    AttachCell(u32),
    DetachRow(u32),
    DetachCell(u32),
    HideRow(u32),
    ReleaseRow(u32),
    ReleaseCell(u32),
    Enrich { row: usize, column: String, clean_first: bool },
    Teardown { row: usize, column: String },
}

/// Integer handles; rows on a canvas list, cells in per-row child lists.
#[derive(Debug, Default)]
struct Recorder {
    next: u32,
    canvas: Vec<u32>,
    children: HashMap<u32, Vec<u32>>,
    row_of: HashMap<u32, usize>,
    events: Vec<Event>,
}

impl Recorder {
    fn id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    fn canvas_rows(&self) -> Vec<usize> {
        self.canvas.iter().map(|n| self.row_of[n]).collect()
    }

    fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

fn place(list: &mut Vec<u32>, node: u32, at: Placement<'_, u32>) {
    match at {
        Placement::Append => list.push(node),
        Placement::Before(sibling) => {
            let i = list
                .iter()
                .position(|n| n == sibling)
                .expect("sibling must be attached");
            list.insert(i, node);
        }
    }
}

impl RenderSurface<u32> for Recorder {
    type Row = u32;
    type Cell = u32;

    fn create_row(&mut self, request: &RowRequest<'_, u32>) -> u32 {
        let id = self.id();
        self.row_of.insert(id, request.row);
        self.events.push(Event::CreateRow(request.row));
        id
    }

    fn create_cell(&mut self, request: &CellRequest<'_, u32>) -> u32 {
        self.events.push(Event::CreateCell(request.row, request.column));
        self.id()
    }

    fn attach_row(&mut self, row: &u32, at: Placement<'_, u32>) {
        assert!(!self.canvas.contains(row), "row attached twice");
        place(&mut self.canvas, *row, at);
        self.events.push(Event::AttachRow(*row));
    }

    fn attach_cell(&mut self, row: &u32, cell: &u32, at: Placement<'_, u32>) {
        place(self.children.entry(*row).or_default(), *cell, at);
        self.events.push(Event::AttachCell(*cell));
    }

    fn detach_row(&mut self, row: &u32) {
        let i = self
            .canvas
            .iter()
            .position(|n| n == row)
            .expect("detached row must be attached");
        self.canvas.remove(i);
        self.events.push(Event::DetachRow(*row));
    }

    fn detach_cell(&mut self, row: &u32, cell: &u32) {
        let cells = self.children.get_mut(row).expect("row has cells");
        cells.retain(|c| c != cell);
        self.events.push(Event::DetachCell(*cell));
    }

    fn hide_row(&mut self, row: &u32) {
        self.events.push(Event::HideRow(*row));
    }

    fn release_row(&mut self, row: u32) {
        self.events.push(Event::ReleaseRow(row));
    }

    fn release_cell(&mut self, cell: u32) {
        self.events.push(Event::ReleaseCell(cell));
    }

    fn enrich_cell(
        &mut self,
        _: &u32,
        row: usize,
        column: &Column,
        _: Option<&u32>,
        clean_first: bool,
    ) {
        self.events.push(Event::Enrich {
            row,
            column: column.id().to_owned(),
            clean_first,
        });
    }

    fn teardown_cell(&mut self, cell: u32, row: usize, column: &Column) {
        self.events.push(Event::Teardown {
            row,
            column: column.id().to_owned(),
        });
        self.release_cell(cell);
    }
}

/// Rows `0..len` whose item is their index, with optional spans.
#[derive(Debug)]
struct Rows {
    items: Vec<u32>,
    spans: HashMap<usize, Vec<(usize, ColSpan)>>,
}

impl Rows {
    fn new(len: u32) -> Self {
        Self {
            items: (0..len).collect(),
            spans: HashMap::new(),
        }
    }
}

impl Dataset for Rows {
    type Item = u32;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<&u32> {
        self.items.get(index)
    }

    fn metadata(&self, index: usize) -> Option<RowMetadata> {
        let spans = self.spans.get(&index)?;
        Some(RowMetadata {
            columns: spans
                .iter()
                .map(|(c, s)| {
                    (
                        *c,
                        ColumnOverride {
                            span: Some(*s),
                            ..ColumnOverride::default()
                        },
                    )
                })
                .collect(),
            ..RowMetadata::default()
        })
    }
}

fn columns(count: usize) -> ColumnTable {
    ColumnTable::new(
        (0..count).map(|i| ColumnSpec::new(format!("c{i}"))),
        &ColumnDefaults::fixed_width(100.0),
    )
}

fn enriched_columns(count: usize) -> ColumnTable {
    ColumnTable::new(
        (0..count).map(|i| ColumnSpec::new(format!("c{i}")).post_render(true)),
        &ColumnDefaults::fixed_width(100.0),
    )
}

fn range(rows: Range<usize>, left_px: f64, right_px: f64) -> RenderRange {
    RenderRange {
        rows,
        left_px,
        right_px,
    }
}

fn frame<'a>(data: &'a Rows, columns: &'a ColumnTable) -> Frame<'a, Rows> {
    Frame {
        data,
        columns,
        row_height: 25.0,
        offset: 0.0,
    }
}

fn edge_scroll_touches_only_the_edges<S: Strategy>() {
    let data = Rows::new(1000);
    let cols = columns(5);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder, S>::new();

    cache.reconcile(&mut surface, &f, &range(100..141, 0.0, 500.0));
    let kept: Vec<u32> = (120..141)
        .map(|r| *cache.row_node(r).expect("mounted"))
        .collect();
    surface.take_events();

    let stats = cache.reconcile(&mut surface, &f, &range(120..161, 0.0, 500.0));
    let mut mounted = stats.mounted.clone();
    mounted.sort_unstable();
    assert_eq!(mounted, (141..161).collect::<Vec<_>>());
    let mut unmounted = stats.unmounted.clone();
    unmounted.sort_unstable();
    assert_eq!(unmounted, (100..120).collect::<Vec<_>>());
    assert!(!stats.rebuilt, "an edge overlap must not rebuild");
    assert_eq!(cache.mounted_rows(), (120..161).collect::<Vec<_>>());

    for (row, node) in (120..141).zip(&kept) {
        assert_eq!(cache.row_node(row), Some(node), "row {row} was remounted");
    }
    for event in surface.take_events() {
        match event {
            Event::CreateRow(row) | Event::CreateCell(row, _) => {
                assert!((141..161).contains(&row), "created inside the overlap: {row}");
            }
            Event::AttachRow(node) | Event::DetachRow(node) | Event::ReleaseRow(node) => {
                assert!(!kept.contains(&node), "touched kept row node {node}");
            }
            _ => {}
        }
    }
}

#[test]
fn edge_scroll_batched() {
    edge_scroll_touches_only_the_edges::<Batched>();
}

#[test]
fn edge_scroll_incremental() {
    edge_scroll_touches_only_the_edges::<Incremental>();
}

fn reconcile_is_idempotent<S: Strategy>() {
    let data = Rows::new(100);
    let cols = columns(8);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder, S>::new();
    let r = range(10..30, 150.0, 420.0);

    let first = cache.reconcile(&mut surface, &f, &r);
    assert_eq!(first.mounted.len(), 20);
    assert_eq!(first.cells_mounted, 20 * 4);
    surface.take_events();

    let again = cache.reconcile(&mut surface, &f, &r);
    assert!(again.is_noop(), "second pass changed something: {again:?}");
    assert!(surface.take_events().is_empty(), "second pass touched the surface");
}

#[test]
fn idempotent_batched() {
    reconcile_is_idempotent::<Batched>();
}

#[test]
fn idempotent_incremental() {
    reconcile_is_idempotent::<Incremental>();
}

/// Small deterministic generator for range sweeps.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) % bound as u64) as usize
    }
}

#[test]
fn strategies_agree_on_random_walks() {
    let data = Rows::new(500);
    let cols = columns(10);
    let f = frame(&data, &cols);
    let mut batched_surface = Recorder::default();
    let mut ordered_surface = Recorder::default();
    let mut batched = RenderCache::<u32, Recorder, Batched>::new();
    let mut ordered = RenderCache::<u32, Recorder, Incremental>::new();
    let mut rng = Lcg(7);

    let mut top = 0_usize;
    for step in 0..300 {
        // Mostly small moves, sometimes a jump.
        top = if rng.next(8) == 0 {
            rng.next(460)
        } else {
            (top + rng.next(15)).saturating_sub(7).min(460)
        };
        let height = 20 + rng.next(20);
        let left = (rng.next(6) * 100) as f64 + 30.0;
        let r = range(top..(top + height).min(500), left, left + 350.0);

        batched.reconcile(&mut batched_surface, &f, &r);
        ordered.reconcile(&mut ordered_surface, &f, &r);

        let expected: Vec<usize> = r.rows.clone().collect();
        assert_eq!(batched.mounted_rows(), expected, "batched, step {step}");
        assert_eq!(ordered.mounted_rows(), expected, "ordered, step {step}");
        assert_eq!(ordered_surface.canvas_rows(), expected, "surface order, step {step}");
        for row in r.rows.clone() {
            assert_eq!(
                batched.mounted_cells(row),
                ordered.mounted_cells(row),
                "cells of row {row}, step {step}"
            );
        }
        let mut batched_canvas = batched_surface.canvas_rows();
        batched_canvas.sort_unstable();
        assert_eq!(batched_canvas, expected, "batched surface, step {step}");
    }
}

#[test]
fn incremental_keeps_cells_in_column_order() {
    let data = Rows::new(50);
    let cols = columns(10);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder, Incremental>::new();

    cache.reconcile(&mut surface, &f, &range(0..5, 400.0, 650.0));
    cache.reconcile(&mut surface, &f, &range(0..5, 150.0, 450.0));
    let row = *cache.row_node(2).expect("mounted");
    let expected: Vec<u32> = cache
        .mounted_cells(2)
        .into_iter()
        .map(|c| *cache.cell_node(2, c).expect("mounted cell"))
        .collect();
    assert_eq!(cache.mounted_cells(2), vec![1, 2, 3, 4]);
    assert_eq!(surface.children[&row], expected);
}

fn active_row_survives<S: Strategy>() {
    let data = Rows::new(200);
    let cols = columns(6);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder, S>::new();

    cache.reconcile(&mut surface, &f, &range(0..20, 0.0, 300.0));
    cache.set_active(Some((5, 1)));
    cache.reconcile(&mut surface, &f, &range(50..70, 0.0, 300.0));
    let mut expected = vec![5];
    expected.extend(50..70);
    assert_eq!(cache.mounted_rows(), expected);

    // Horizontal scroll keeps the active cell too.
    cache.reconcile(&mut surface, &f, &range(50..70, 350.0, 600.0));
    assert!(cache.cell_node(5, 1).is_some(), "active cell unmounted");
    assert_eq!(cache.mounted_cells(60), vec![3, 4, 5]);

    cache.set_active(None);
    cache.reconcile(&mut surface, &f, &range(50..70, 350.0, 600.0));
    assert!(!cache.is_mounted(5), "released row must be unmounted");
}

#[test]
fn active_row_batched() {
    active_row_survives::<Batched>();
}

#[test]
fn active_row_incremental() {
    active_row_survives::<Incremental>();
}

#[test]
fn held_row_is_hidden_until_the_hold_moves() {
    let data = Rows::new(100);
    let cols = columns(3);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();

    cache.reconcile(&mut surface, &f, &range(0..10, 0.0, 300.0));
    let node = *cache.row_node(3).expect("mounted");
    cache.hold_row(Some(3));
    surface.take_events();

    cache.reconcile(&mut surface, &f, &range(20..30, 0.0, 300.0));
    let events = surface.take_events();
    assert!(events.contains(&Event::HideRow(node)), "held row must be hidden");
    assert!(!events.contains(&Event::DetachRow(node)), "held row must stay attached");
    assert!(!cache.is_mounted(3));
    assert_eq!(cache.zombie_row(), Some(3));

    // Still held: the grace slot survives further passes.
    cache.reconcile(&mut surface, &f, &range(21..31, 0.0, 300.0));
    assert_eq!(cache.zombie_row(), Some(3));
    assert!(surface.canvas.contains(&node), "held row detached early");

    cache.hold_row(None);
    cache.reconcile(&mut surface, &f, &range(21..31, 0.0, 300.0));
    let events = surface.take_events();
    assert_eq!(cache.zombie_row(), None);
    assert!(events.contains(&Event::DetachRow(node)), "released row must detach");
    assert!(events.contains(&Event::ReleaseRow(node)), "released row must be disposed");
}

#[test]
fn second_held_row_replaces_the_first() {
    let data = Rows::new(100);
    let cols = columns(2);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();

    cache.reconcile(&mut surface, &f, &range(0..10, 0.0, 200.0));
    let held = *cache.row_node(2).expect("mounted");
    cache.hold_row(Some(2));
    cache.reconcile(&mut surface, &f, &range(10..20, 0.0, 200.0));
    assert!(surface.canvas.contains(&held), "held row stays attached");

    // Row 2 is released at the start of this pass, then row 12 is parked.
    cache.hold_row(Some(12));
    cache.reconcile(&mut surface, &f, &range(30..40, 0.0, 200.0));
    assert_eq!(cache.zombie_row(), Some(12));
    assert!(!surface.canvas.contains(&held), "previous held row must be released");
    assert_eq!(surface.canvas.len(), 11, "ten mounted rows plus the held one");
}

#[test]
fn enriched_rows_tear_down_one_group_per_tick() {
    let data = Rows::new(100);
    let cols = enriched_columns(3);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();
    cache.set_cleanup_enabled(true);

    cache.reconcile(&mut surface, &f, &range(0..4, 0.0, 300.0));
    cache.start_enrichment(0..4, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}
    assert_eq!(cache.ledger().row_count(), 4);
    surface.take_events();

    cache.reconcile(&mut surface, &f, &range(50..54, 0.0, 300.0));
    let events = surface.take_events();
    let detached = events.iter().filter(|e| matches!(e, Event::DetachRow(_))).count();
    assert_eq!(detached, 4, "rows leave the canvas immediately");
    assert!(
        !events.iter().any(|e| matches!(e, Event::ReleaseRow(_) | Event::Teardown { .. })),
        "teardown waits for the cleanup tick"
    );
    assert_eq!(cache.cleanup_pending(), 4 * 4);

    let mut ticks = 0;
    while let Some(processed) = cache.cleanup_next_group(&mut surface, &cols) {
        ticks += 1;
        assert_eq!(processed, 4, "three cells and their row per group");
        let events = surface.take_events();
        let teardowns: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Event::Teardown { row, .. } => Some(*row),
                _ => None,
            })
            .collect();
        assert_eq!(teardowns.len(), 3);
        assert!(teardowns.iter().all(|r| *r == teardowns[0]), "one row per group");
        assert_eq!(
            events.iter().filter(|e| matches!(e, Event::ReleaseRow(_))).count(),
            1
        );
    }
    assert_eq!(ticks, 4);
    assert_eq!(cache.ledger().row_count(), 0);
}

#[test]
fn without_cleanup_unmount_releases_immediately() {
    let data = Rows::new(100);
    let cols = enriched_columns(2);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();

    cache.reconcile(&mut surface, &f, &range(0..3, 0.0, 200.0));
    cache.start_enrichment(0..3, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}
    surface.take_events();

    cache.reconcile(&mut surface, &f, &range(10..13, 0.0, 200.0));
    let released = surface
        .take_events()
        .iter()
        .filter(|e| matches!(e, Event::ReleaseRow(_)))
        .count();
    assert_eq!(released, 3);
    assert_eq!(cache.cleanup_pending(), 0);
}

#[test]
fn enriched_cell_scrolled_out_horizontally_is_queued() {
    let data = Rows::new(10);
    let cols = enriched_columns(6);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder, Incremental>::new();
    cache.set_cleanup_enabled(true);

    cache.reconcile(&mut surface, &f, &range(0..2, 0.0, 250.0));
    cache.start_enrichment(0..2, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}

    cache.reconcile(&mut surface, &f, &range(0..2, 320.0, 550.0));
    // Columns 0..3 of both rows left; one group per row pass.
    assert_eq!(cache.cleanup_pending(), 6);
    assert_eq!(cache.cleanup_next_group(&mut surface, &cols), Some(3));
    assert_eq!(cache.cleanup_next_group(&mut surface, &cols), Some(3));
    assert_eq!(cache.cleanup_next_group(&mut surface, &cols), None);
}

#[test]
fn enrichment_walks_the_sweep_direction_and_skips_done_cells() {
    let data = Rows::new(20);
    let cols = ColumnTable::new(
        [
            ColumnSpec::new("plain"),
            ColumnSpec::new("chart").post_render(false),
        ],
        &ColumnDefaults::fixed_width(100.0),
    );
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();

    cache.reconcile(&mut surface, &f, &range(0..6, 0.0, 200.0));
    surface.take_events();
    // Rows 6 and 7 are not mounted and are skipped.
    cache.start_enrichment(2..8, false);
    let mut order = Vec::new();
    while let Some(row) = cache.enrich_next(&mut surface, &f) {
        order.push(row);
    }
    assert_eq!(order, vec![5, 4, 3, 2]);
    let enriched: Vec<Event> = surface.take_events();
    assert_eq!(enriched.len(), 4, "only the chart column is enriched");
    assert!(enriched.iter().all(|e| matches!(
        e,
        Event::Enrich { column, clean_first: false, .. } if column == "chart"
    )));

    // A second sweep finds everything rendered.
    cache.start_enrichment(0..6, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}
    assert_eq!(
        surface.take_events().len(),
        2,
        "only rows 0 and 1 were still unprocessed"
    );

    // Stale records are enriched again after cleaning.
    assert_eq!(cache.invalidate_post_render(Some(3), None), 1);
    cache.start_enrichment(0..6, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}
    assert_eq!(
        surface.take_events(),
        vec![Event::Enrich {
            row: 3,
            column: "chart".to_owned(),
            clean_first: true
        }]
    );
    assert!(!cache.enrichment_pending());
}

#[test]
fn spanning_cells_mount_once() {
    let mut data = Rows::new(10);
    data.spans.insert(2, vec![(0, ColSpan::Cols(3))]);
    data.spans.insert(3, vec![(1, ColSpan::Rest)]);
    let cols = columns(5);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();

    cache.reconcile(&mut surface, &f, &range(0..5, 0.0, 500.0));
    assert_eq!(cache.mounted_cells(1), vec![0, 1, 2, 3, 4]);
    assert_eq!(cache.mounted_cells(2), vec![0, 3, 4]);
    assert_eq!(cache.cell_span(2, 0), Some(3));
    assert_eq!(cache.mounted_cells(3), vec![0, 1]);
    assert_eq!(cache.cell_span(3, 1), Some(4));

    // Scrolled so only column 4 is in view: spanning cells still cover it.
    cache.reconcile(&mut surface, &f, &range(0..5, 420.0, 480.0));
    assert_eq!(cache.mounted_cells(1), vec![4]);
    assert_eq!(cache.mounted_cells(2), vec![4]);
    assert_eq!(cache.mounted_cells(3), vec![1]);
}

#[test]
fn invalidation_and_truncation() {
    let data = Rows::new(40);
    let cols = columns(2);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();
    let r = range(10..30, 0.0, 200.0);

    cache.reconcile(&mut surface, &f, &r);
    let before = *cache.row_node(15).expect("mounted");
    assert_eq!(cache.invalidate_rows(&mut surface, [15, 16, 99]), 2);
    let mut stats = cache.reconcile(&mut surface, &f, &r);
    stats.mounted.sort_unstable();
    assert_eq!(stats.mounted, vec![15, 16]);
    assert_ne!(cache.row_node(15), Some(&before), "invalidated row must be rebuilt");

    cache.set_active(Some((25, 0)));
    assert_eq!(cache.truncate(&mut surface, 20), 10);
    assert_eq!(cache.active(), None);
    assert_eq!(cache.mounted_rows(), (10..20).collect::<Vec<_>>());

    assert_eq!(cache.invalidate_all(&mut surface), 10);
    assert!(cache.is_empty());
    assert!(surface.canvas.is_empty());
    assert_eq!(
        cache.counters().rows_removed,
        2 + 10 + 10,
        "every unmount is counted"
    );
}

#[test]
fn clear_releases_everything() {
    let data = Rows::new(40);
    let cols = enriched_columns(2);
    let f = frame(&data, &cols);
    let mut surface = Recorder::default();
    let mut cache = RenderCache::<u32, Recorder>::new();
    cache.set_cleanup_enabled(true);

    cache.reconcile(&mut surface, &f, &range(0..5, 0.0, 200.0));
    cache.start_enrichment(0..5, true);
    while cache.enrich_next(&mut surface, &f).is_some() {}
    cache.hold_row(Some(1));
    cache.reconcile(&mut surface, &f, &range(10..15, 0.0, 200.0));
    assert!(cache.cleanup_pending() > 0);
    assert_eq!(cache.zombie_row(), Some(1));

    cache.clear(&mut surface, &cols);
    assert!(cache.is_empty());
    assert_eq!(cache.zombie_row(), None);
    assert_eq!(cache.cleanup_pending(), 0);
    assert!(surface.canvas.is_empty(), "canvas: {:?}", surface.canvas);
}
