//! Benchmark suite for style-trend-algo
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use style_trend_algo::{
    render_svg, render_trend, synthesize_prediction, Category, ChartDimensions, PredictionEntry,
    PredictionResult,
};

fn sample_result() -> PredictionResult {
    PredictionResult::new(
        Some(Category::Kinesthetic),
        vec![
            PredictionEntry::new(Category::Kinesthetic, 48.0, true),
            PredictionEntry::new(Category::Visual, 27.0, false),
            PredictionEntry::new(Category::Auditory, 15.0, false),
            PredictionEntry::new(Category::ReadingWriting, 10.0, false),
        ],
    )
}

fn bench_synthesize(c: &mut Criterion) {
    let result = sample_result();
    c.bench_function("synthesize_prediction", |b| {
        b.iter(|| synthesize_prediction(black_box(&result)))
    });
}

fn bench_render(c: &mut Criterion) {
    let trend = synthesize_prediction(&sample_result());
    let dims = ChartDimensions::default();
    c.bench_function("render_trend", |b| {
        b.iter(|| render_trend(black_box(&trend), black_box(&dims)))
    });
    c.bench_function("render_svg", |b| {
        b.iter(|| render_svg(&render_trend(black_box(&trend), &dims)))
    });
}

criterion_group!(benches, bench_synthesize, bench_render);
criterion_main!(benches);
