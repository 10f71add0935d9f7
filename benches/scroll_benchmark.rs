//! Window update throughput benchmarks.
//!
//! Measures the cost of one scroll notification for the incremental paths
//! and for a full rebuild, at several list sizes.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use virtlist::config::WindowConfig;
use virtlist::state::WindowController;
use virtlist::surface::{StackSurface, Viewport};

type Controller = WindowController<f64, StackSurface<f64>>;

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

/// Items cycle through a few extents so the estimate is not trivially exact.
fn build(count: usize) -> Controller {
    let items = (0..count).map(|i| 20.0 + (i % 7) as f64 * 5.0).collect();
    let mut list = WindowController::new(
        StackSurface::new(800.0),
        |extent: &f64| *extent,
        WindowConfig::default(),
    );
    list.set_items(items);
    list
}

fn scroll_to(list: &mut Controller, offset: f64) {
    list.surface_mut().set_scroll_offset(offset);
    while list.surface_mut().take_scroll_notification() {
        black_box(list.on_scroll());
    }
}

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");
    for count in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let items: Vec<f64> = vec![30.0; count];
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut list = WindowController::new(
                        StackSurface::new(800.0),
                        |extent: &f64| *extent,
                        WindowConfig::default(),
                    );
                    list.set_items(items);
                    black_box(list.window_range())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_incremental_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_scroll");
    for count in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched_ref(
                || build(count),
                |list| {
                    // One screen's worth of wheel-sized steps down, then back.
                    for step in 1..=40 {
                        scroll_to(list, f64::from(step) * 20.0);
                    }
                    for step in (0..40).rev() {
                        scroll_to(list, f64::from(step) * 20.0);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump");
    for count in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched_ref(
                || build(count),
                |list| {
                    let end = list.surface().scroll_extent();
                    scroll_to(list, end / 2.0);
                    scroll_to(list, end);
                    scroll_to(list, 0.0);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_incremental_scroll, bench_jump);
criterion_main!(benches);
