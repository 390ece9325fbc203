//! Criterion benchmark for a full structure tracker pass (§4.5) over a
//! long synthetic flat track, using an in-memory tile set / scanner.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lidartrack::plateau::{Plateau, PlateauModel};
use lidartrack::scan::{CellPoints, DirectionalScanner, Stroke, TileSet};
use lidartrack::tracker::{StructureTracker, TrackerModel};

/// A flat, noise-free 3 m track running along `y`, centered on `x = 0`,
/// spanning `[-half_length_m, half_length_m]`.
struct SyntheticTrack {
    half_width_m: f64,
    half_length_m: f64,
}

impl TileSet for SyntheticTrack {
    fn collect_points(&self, cell_i: i32, cell_j: i32) -> CellPoints {
        let x = cell_i as f32 * 0.1;
        let y = cell_j as f32 * 0.1;
        if x.abs() > self.half_width_m as f32 + 1.0 || y.abs() > self.half_length_m as f32 {
            return CellPoints::Unloaded;
        }
        CellPoints::Loaded(vec![(x, y, 100.0)])
    }
}

struct SyntheticScanner {
    a: f64,
    b: f64,
    c: f64,
    half_width_m: f64,
    cell_size: f64,
    right_steps: i32,
    left_steps: i32,
}

impl SyntheticScanner {
    fn new(half_width_m: f64, cell_size: f64) -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            half_width_m,
            cell_size,
            right_steps: 0,
            left_steps: 0,
        }
    }

    fn cells_at(&self, depth: f64) -> Vec<(i32, i32)> {
        let ux = -self.b;
        let uy = self.a;
        let steps = (self.half_width_m / self.cell_size).ceil() as i32;
        (-steps..=steps)
            .map(|k| {
                let s = k as f64 * self.cell_size;
                let x = self.a * depth + s * ux;
                let y = self.b * depth + s * uy;
                ((x / self.cell_size).floor() as i32, (y / self.cell_size).floor() as i32)
            })
            .collect()
    }
}

impl DirectionalScanner for SyntheticScanner {
    fn first(&mut self) -> Vec<(i32, i32)> {
        self.right_steps = 0;
        self.left_steps = 0;
        self.cells_at(self.c)
    }

    fn next_on_right(&mut self) -> Option<Vec<(i32, i32)>> {
        self.right_steps += 1;
        Some(self.cells_at(self.c + self.right_steps as f64 * 0.5))
    }

    fn next_on_left(&mut self) -> Option<Vec<(i32, i32)>> {
        self.left_steps += 1;
        Some(self.cells_at(self.c - self.left_steps as f64 * 0.5))
    }

    fn bind_to(&mut self, a: f64, b: f64, c: f64) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.right_steps = 0;
        self.left_steps = 0;
    }

    fn is_last_scan_reversed(&self) -> bool {
        false
    }

    fn scan_period(&self) -> f64 {
        0.5
    }
}

fn bench_full_pass(c: &mut Criterion) {
    let model = PlateauModel::default();
    let tracker_model = TrackerModel::default();
    let mut group = c.benchmark_group("tracker_full_pass");
    for &half_length_m in &[10.0f64, 50.0, 200.0] {
        group.bench_with_input(
            BenchmarkId::new("flat_track", half_length_m as u64),
            &half_length_m,
            |b, &half_length_m| {
                b.iter(|| {
                    let tracker = StructureTracker::<Plateau>::new(&model, &tracker_model);
                    let tiles = SyntheticTrack {
                        half_width_m: 1.5,
                        half_length_m,
                    };
                    let mut scanner = SyntheticScanner::new(1.5, 0.1);
                    let stroke = Stroke {
                        p1: (-3.0, 0.0),
                        p2: (3.0, 0.0),
                    };
                    let _ = std::hint::black_box(tracker.detect(stroke, &tiles, &mut scanner, true));
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_full_pass);
criterion_main!(benches);
