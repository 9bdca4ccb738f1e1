use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vi_calc::processing::engine::{IndexEngine, RowBundle};
use vi_calc::processing::indices::{BandSet, IndexKind};

const WIDTH: usize = 4096;

fn synthetic_row(base: f64, period: usize) -> Vec<Option<f64>> {
    (0..WIDTH)
        .map(|i| Some(base + (i % period) as f64 * 0.002))
        .collect()
}

/// Benchmark the two-band hot path in isolation
fn benchmark_ndvi_row(c: &mut Criterion) {
    let rows = RowBundle {
        red: synthetic_row(0.05, 50),
        nir: synthetic_row(0.25, 100),
        ..Default::default()
    };
    let engine = IndexEngine::new(IndexKind::Ndvi, BandSet::NONE).expect("two-band config");
    let mut out = vec![None; WIDTH];

    c.bench_function("ndvi_row_evaluation", |b| {
        b.iter(|| engine.evaluate_row(black_box(&rows), &mut out))
    });
}

/// Benchmark the widest bundle (six bands) through the same dispatch
fn benchmark_gvi_row(c: &mut Criterion) {
    let supplied = BandSet {
        green: true,
        blue: true,
        chan5: true,
        chan7: true,
    };
    let rows = RowBundle {
        red: synthetic_row(0.05, 50),
        nir: synthetic_row(0.25, 100),
        green: Some(synthetic_row(0.1, 70)),
        blue: Some(synthetic_row(0.03, 30)),
        chan5: Some(synthetic_row(0.2, 90)),
        chan7: Some(synthetic_row(0.15, 60)),
    };
    let engine = IndexEngine::new(IndexKind::Gvi, supplied).expect("six-band config");
    let mut out = vec![None; WIDTH];

    c.bench_function("gvi_row_evaluation", |b| {
        b.iter(|| engine.evaluate_row(black_box(&rows), &mut out))
    });
}

criterion_group!(benches, benchmark_ndvi_row, benchmark_gvi_row);
criterion_main!(benches);
