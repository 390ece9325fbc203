//! A minimal file-backed [`TileSet`]/[`DirectionalScanner`] pair (§6),
//! standing in for the tiled point-cloud storage and directional scanner
//! provider the core treats as external collaborators. This is
//! demonstration plumbing for the `track` subcommand, not part of the
//! tracking engine itself.

use std::collections::{HashMap, HashSet};

use lidartrack::scan::{CellPoints, DirectionalScanner, TileSet};

/// Buckets a flat point cloud into square cells so the core can address it
/// the way it would address a real tiled DTM.
pub struct GridTileSet {
    cell_size: f64,
    cells: HashMap<(i32, i32), Vec<(f32, f32, f32)>>,
}

impl GridTileSet {
    pub fn from_points(points: Vec<(f32, f32, f32)>, cell_size: f64) -> Self {
        let mut cells: HashMap<(i32, i32), Vec<(f32, f32, f32)>> = HashMap::new();
        for p in points {
            let i = (p.0 as f64 / cell_size).floor() as i32;
            let j = (p.1 as f64 / cell_size).floor() as i32;
            cells.entry((i, j)).or_default().push(p);
        }
        Self { cell_size, cells }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

impl TileSet for GridTileSet {
    fn collect_points(&self, cell_i: i32, cell_j: i32) -> CellPoints {
        match self.cells.get(&(cell_i, cell_j)) {
            Some(pts) => CellPoints::Loaded(pts.clone()),
            None => CellPoints::Unloaded,
        }
    }
}

/// Produces the ordered grid cells of successive orthogonal scans along a
/// line that can be recentered via [`bind_to`](DirectionalScanner::bind_to).
///
/// A scan is a band of cells straddling the line `a*x + b*y = c`, spanning
/// `band_half_width_m` on either side along the line's own direction;
/// successive scans step `step_m` further along the line's normal.
pub struct GridDirectionalScanner {
    cell_size: f64,
    band_half_width_m: f64,
    step_m: f64,
    a: f64,
    b: f64,
    c: f64,
    right_steps: i32,
    left_steps: i32,
}

impl GridDirectionalScanner {
    pub fn new(cell_size: f64, band_half_width_m: f64, step_m: f64) -> Self {
        Self {
            cell_size,
            band_half_width_m,
            step_m,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            right_steps: 0,
            left_steps: 0,
        }
    }

    fn scan_cells_at(&self, depth_c: f64) -> Vec<(i32, i32)> {
        // (a, b) is a unit normal (the stroke's perpendicular axis); the
        // line itself runs along (-b, a).
        let ux = -self.b;
        let uy = self.a;
        let steps = (self.band_half_width_m / self.cell_size).ceil() as i32;
        let mut seen: HashSet<(i32, i32)> = HashSet::new();
        for k in -steps..=steps {
            let s = k as f64 * self.cell_size;
            let x = self.a * depth_c + s * ux;
            let y = self.b * depth_c + s * uy;
            let i = (x / self.cell_size).floor() as i32;
            let j = (y / self.cell_size).floor() as i32;
            seen.insert((i, j));
        }
        seen.into_iter().collect()
    }
}

impl DirectionalScanner for GridDirectionalScanner {
    fn first(&mut self) -> Vec<(i32, i32)> {
        self.right_steps = 0;
        self.left_steps = 0;
        self.scan_cells_at(self.c)
    }

    fn next_on_right(&mut self) -> Option<Vec<(i32, i32)>> {
        self.right_steps += 1;
        Some(self.scan_cells_at(self.c + self.right_steps as f64 * self.step_m))
    }

    fn next_on_left(&mut self) -> Option<Vec<(i32, i32)>> {
        self.left_steps += 1;
        Some(self.scan_cells_at(self.c - self.left_steps as f64 * self.step_m))
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
        self.step_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_set_buckets_points_by_cell() {
        let ts = GridTileSet::from_points(vec![(0.4, 0.4, 1.0), (1.6, 0.2, 2.0)], 1.0);
        match ts.collect_points(0, 0) {
            CellPoints::Loaded(pts) => assert_eq!(pts.len(), 1),
            CellPoints::Unloaded => panic!("expected a loaded cell"),
        }
        assert!(matches!(ts.collect_points(5, 5), CellPoints::Unloaded));
    }

    #[test]
    fn scanner_steps_away_from_bound_origin() {
        let mut sc = GridDirectionalScanner::new(1.0, 3.0, 1.0);
        sc.bind_to(0.0, 1.0, 0.0);
        let first = sc.first();
        assert!(!first.is_empty());
        let next = sc.next_on_right().unwrap();
        assert_ne!(first, next);
    }
}
