//! Baseline detection by convex-hull elimination (§4.3), and summit search.
//!
//! Grounded on the original `Bump::setBaseLine`/`Bump::getSummit`: starting
//! from the line through the interval's two endpoints, repeatedly replace
//! each side's "deepest" hull vertex with a lower one and withdraw points
//! that the updated line now excludes, until no replacement improves.

use crate::scan::ScanPoint;

const EPS_SCALE: f64 = 1e-4;

struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    fn through(p: ScanPoint, q: ScanPoint) -> Self {
        Line {
            a: (q.y - p.y) as f64,
            b: (p.x - q.x) as f64,
            c: (q.y - p.y) as f64 * p.x as f64 + (p.x - q.x) as f64 * p.y as f64,
        }
    }

    fn signed_height(&self, p: ScanPoint) -> f64 {
        self.c - self.a * p.x as f64 - self.b * p.y as f64
    }

    fn eps(&self) -> f64 {
        EPS_SCALE * self.a.abs().max(self.b.abs()).max(1.0)
    }
}

/// Result of a successful baseline search: the indices (into the original
/// point slice) of the two baseline endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub start_index: usize,
    pub end_index: usize,
}

/// Finds the baseline over `points[s_num..=e_num]`. Returns `None` if every
/// interior point lies on or below (above, for hollows) the straight line
/// joining the two endpoints already — there is no bump to find
/// (`NO_BUMP_LINE`).
pub fn find_baseline(points: &[ScanPoint], s_num: usize, e_num: usize, over: bool) -> Option<Baseline> {
    if e_num <= s_num + 1 {
        return None;
    }
    let mut line = Line::through(points[s_num], points[e_num]);

    let mut summit = s_num;
    let mut best_h = 0.0f64;
    let mut found = false;
    for i in (s_num + 1)..e_num {
        let h = line.signed_height(points[i]);
        if (over && h > best_h) || (!over && h < best_h) {
            best_h = h;
            summit = i;
            found = true;
        }
    }
    if !found {
        return None;
    }

    // seq[0]: s_num .. summit-1 (ascending). seq[1]: e_num .. summit+1 (descending).
    let mut seq0: Vec<usize> = (s_num..summit).collect();
    let mut seq1: Vec<usize> = (summit + 1..=e_num).rev().collect();
    let mut ok0 = vec![true; seq0.len()];
    let mut ok1 = vec![true; seq1.len()];
    let mut f0 = 0usize;
    let mut f1 = 0usize;

    loop {
        let mut searching = false;
        let mut depth = 0.0f64;
        let eps = line.eps();

        for (seq, ok, f) in [
            (&seq0, &ok0, &mut f0),
            (&seq1, &ok1, &mut f1),
        ] {
            for i in 1..seq.len() {
                if !ok[i] {
                    continue;
                }
                let h = line.signed_height(points[seq[i]]);
                let improves = (over && h < depth - eps) || (!over && h > depth + eps);
                if i != *f && improves {
                    depth = h;
                    *f = i;
                    searching = true;
                }
            }
        }
        if !searching {
            break;
        }

        line = Line::through(points[seq1[f1]], points[seq0[f0]]);
        let eps = line.eps();

        for (seq, ok, f) in [
            (&mut seq0, &mut ok0, f0),
            (&mut seq1, &mut ok1, f1),
        ] {
            for i in (f + 1)..seq.len() {
                if !ok[i] {
                    continue;
                }
                let h = line.signed_height(points[seq[i]]);
                let excluded = (over && h >= -eps) || (!over && h <= eps);
                if excluded {
                    ok[i] = false;
                }
            }
            if seq.len() > f {
                let outer = Line::through(points[seq[0]], points[seq[f]]);
                let oeps = outer.eps();
                for i in 1..f {
                    if !ok[i] {
                        continue;
                    }
                    let h = outer.signed_height(points[seq[i]]);
                    let excluded = (over && h > oeps) || (!over && h < -oeps);
                    if excluded {
                        ok[i] = false;
                    }
                }
            }
        }
    }

    Some(Baseline {
        start_index: seq0[f0],
        end_index: seq1[f1],
    })
}

/// Highest (lowest, for hollows) perpendicular distance from the baseline
/// over the interior points, and the index that achieves it.
pub fn find_summit(
    points: &[ScanPoint],
    baseline: Baseline,
    over: bool,
) -> Option<(usize, f64)> {
    let line = Line::through(points[baseline.start_index], points[baseline.end_index]);
    let mut best_i = None;
    let mut best_h = 0.0f64;
    for i in (baseline.start_index + 1)..baseline.end_index {
        let h = line.signed_height(points[i]);
        if (over && h > best_h) || (!over && h < best_h) {
            best_h = h;
            best_i = Some(i);
        }
    }
    best_i.map(|i| (i, best_h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(summit_x: f32, summit_y: f32) -> Vec<ScanPoint> {
        vec![
            ScanPoint::new(0.0, 0.0),
            ScanPoint::new(1.0, summit_y * 0.5),
            ScanPoint::new(summit_x, summit_y),
            ScanPoint::new(3.0, summit_y * 0.5),
            ScanPoint::new(4.0, 0.0),
        ]
    }

    #[test]
    fn finds_baseline_on_symmetric_triangle() {
        let pts = tri(2.0, 1.0);
        let bl = find_baseline(&pts, 0, pts.len() - 1, true).unwrap();
        assert_eq!(bl.start_index, 0);
        assert_eq!(bl.end_index, pts.len() - 1);
        let (summit_i, h) = find_summit(&pts, bl, true).unwrap();
        assert_eq!(summit_i, 2);
        assert!((h - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_profile_has_no_bump_line() {
        let pts = vec![
            ScanPoint::new(0.0, 0.0),
            ScanPoint::new(1.0, 0.0),
            ScanPoint::new(2.0, 0.0),
            ScanPoint::new(3.0, 0.0),
        ];
        assert!(find_baseline(&pts, 0, pts.len() - 1, true).is_none());
    }

    #[test]
    fn hollow_uses_opposite_sign() {
        let pts = tri(2.0, -1.0);
        let bl = find_baseline(&pts, 0, pts.len() - 1, false).unwrap();
        let (summit_i, h) = find_summit(&pts, bl, false).unwrap();
        assert_eq!(summit_i, 2);
        assert!(h < 0.0);
    }
}
