//! Criterion benchmarks for bump detection (§4.3): baseline-by-convex-hull-
//! elimination and area/center computation.
//! Focus sizes: scan-point counts in {20, 50, 100, 500}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lidartrack::bump::{Bump, BumpModel};
use lidartrack::scan::ScanPoint;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn triangular_profile(n: usize, seed: u64) -> Vec<ScanPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = n / 2;
    (0..n)
        .map(|i| {
            let x = i as f32 * 8.0 / (n as f32 - 1.0);
            let base = if i <= half {
                x / half as f32
            } else {
                (n as f32 - 1.0 - i as f32) / half as f32
            };
            let noise = rng.gen_range(-0.01..0.01);
            ScanPoint::new(x, base + noise)
        })
        .collect()
}

fn bench_detect(c: &mut Criterion) {
    let model = BumpModel::default();
    let mut group = c.benchmark_group("bump_detect");
    for &n in &[20usize, 50, 100, 500] {
        group.bench_with_input(BenchmarkId::new("no_reference", n), &n, |b, &n| {
            b.iter_batched(
                || triangular_profile(n, 3),
                |pts| {
                    let _bump = Bump::detect(&pts, true, &model, 8.0);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_track(c: &mut Criterion) {
    let model = BumpModel::default();
    let reference = Bump::detect(&triangular_profile(100, 5), true, &model, 8.0);
    let mut group = c.benchmark_group("bump_track");
    group.bench_function("with_reference_100pts", |b| {
        b.iter_batched(
            || triangular_profile(100, 6),
            |pts| {
                let _tracked = Bump::track(&pts, &reference, &model, 8.0);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_detect, bench_track);
criterion_main!(benches);
