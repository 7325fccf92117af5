use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use vizkit::api::{ChartKind, EngineConfig, SampleDataGenerator, VizEngine};
use vizkit::core::Viewport;
use vizkit::layout::{
    SortOrder, StackOffset, StackOrder, evaluation_grid, kde_layout, pie_layout, stack_layout,
};

fn bench_pie_layout_1k(c: &mut Criterion) {
    let mut generator = SampleDataGenerator::new(1);
    let series = generator.walk_series("values", 1_000, 500.0, 20.0);

    c.bench_function("pie_layout_1k", |b| {
        b.iter(|| {
            let _ = pie_layout(black_box(&series.points), black_box(0.0), SortOrder::None)
                .expect("layout should succeed");
        })
    });
}

fn bench_wiggle_stack_16x512(c: &mut Criterion) {
    let mut generator = SampleDataGenerator::new(2);
    let series: Vec<_> = (0..16)
        .map(|i| generator.walk_series(format!("s{i}"), 512, 100.0, 8.0))
        .collect();

    c.bench_function("wiggle_stack_16x512", |b| {
        b.iter(|| {
            let _ = stack_layout(
                black_box(&series),
                StackOrder::InsideOut,
                StackOffset::Wiggle,
            )
            .expect("layout should succeed");
        })
    });
}

fn bench_kde_10k_samples_256_grid(c: &mut Criterion) {
    let mut generator = SampleDataGenerator::new(3);
    let samples = generator.samples(10_000, 50.0, 10.0);
    let grid = evaluation_grid(20.0, 80.0, 256).expect("valid grid");

    c.bench_function("kde_10k_samples_256_grid", |b| {
        b.iter(|| {
            let _ = kde_layout(black_box(&samples), black_box(2.0), black_box(&grid))
                .expect("estimate should succeed");
        })
    });
}

fn bench_donut_snapshot_200_slices(c: &mut Criterion) {
    let mut generator = SampleDataGenerator::new(4);
    let series = vec![generator.walk_series("values", 200, 500.0, 20.0)];

    let config = EngineConfig::new(Viewport::new(1600, 900), ChartKind::Donut);
    let mut engine = VizEngine::new(config).expect("engine init");
    engine.set_series(&series, 0.0).expect("set series");
    engine.tick(400.0).expect("tick");

    c.bench_function("donut_snapshot_200_slices", |b| {
        b.iter(|| {
            let _ = engine.snapshot().expect("snapshot should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_pie_layout_1k,
    bench_wiggle_stack_16x512,
    bench_kde_10k_samples_256_grid,
    bench_donut_snapshot_200_slices
);
criterion_main!(benches);
