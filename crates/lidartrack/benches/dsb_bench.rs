//! Criterion benchmarks for the digital-segment builder (§4.1).
//! Focus sizes: point counts in {10, 50, 200, 1000}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lidartrack::dsb::DsbBuilder;
use lidartrack::lattice::LatticePoint;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn noisy_line(n: usize, seed: u64) -> Vec<LatticePoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let x = i as i64 * 100;
            let y = rng.gen_range(-5..=5);
            LatticePoint::new(x, y)
        })
        .collect()
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsb_growth");
    for &n in &[10usize, 50, 200, 1000] {
        group.bench_with_input(BenchmarkId::new("add_right_sequential", n), &n, |b, &n| {
            b.iter_batched(
                || noisy_line(n, 7),
                |pts| {
                    let mut builder = DsbBuilder::new(50.0, pts[0]);
                    for p in &pts[1..] {
                        builder.add_right_sorted(*p);
                    }
                    let _ = builder.end_of_birth();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_pinching(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsb_pinching");
    group.bench_function("tighten_after_growth", |b| {
        b.iter_batched(
            || noisy_line(200, 11),
            |pts| {
                let mut builder = DsbBuilder::new(200.0, pts[0]);
                for p in &pts[1..100] {
                    builder.add_right_sorted(*p);
                }
                builder.set_max_width(5.0);
                for p in &pts[100..] {
                    builder.add_right_sorted(*p);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_growth, bench_pinching);
criterion_main!(benches);
