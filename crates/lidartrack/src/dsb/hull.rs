//! Convex hull and width computation over the integer lattice.
//!
//! The digital-segment builder recomputes the hull of its current point set
//! on every addition rather than threading incremental updates through; scan
//! lengths in practice (a few hundred points) make this cheap, and it keeps
//! the rollback-on-overflow logic in [`super::proto`] trivial to reason
//! about.

use super::super::lattice::{cross, LatticePoint};

/// Andrew's monotone chain convex hull, returned in CCW order.
///
/// Returns `None` if fewer than two distinct points remain after dedup.
pub fn convex_hull(points: &[LatticePoint]) -> Option<Vec<LatticePoint>> {
    if points.len() < 2 {
        return None;
    }
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup();
    if pts.len() < 2 {
        return None;
    }

    let mut lower: Vec<LatticePoint> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2
            && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0
        {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<LatticePoint> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2
            && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0
        {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    Some(lower)
}

/// Minimum polygon width: over every hull edge, the farthest vertex's
/// perpendicular distance to the line through that edge, minimized over all
/// edges. This is exactly the "strict thickness" of §4.1: the tightest
/// antipodal edge–vertex pair.
///
/// A hull of fewer than 3 vertices (a single segment, possibly degenerate)
/// has width 0 by convention: the point set is already perfectly flat.
pub fn polygon_width(hull: &[LatticePoint]) -> f64 {
    if hull.len() < 3 {
        return 0.0;
    }
    let n = hull.len();
    let mut min_width = f64::INFINITY;
    for i in 0..n {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let edge_len = (((b.x - a.x).pow(2) + (b.y - a.y).pow(2)) as f64).sqrt();
        if edge_len == 0.0 {
            continue;
        }
        let mut max_dist = 0.0f64;
        for &v in hull.iter() {
            let d = (cross(a, b, v) as f64 / edge_len).abs();
            if d > max_dist {
                max_dist = d;
            }
        }
        if max_dist < min_width {
            min_width = max_dist;
        }
    }
    if min_width.is_infinite() {
        0.0
    } else {
        min_width
    }
}

/// Finds the hull edge that realizes [`polygon_width`], returning its two
/// endpoints (in hull order) and the achieved width. Used by
/// [`super::proto::DsbBuilder::end_of_birth`] to derive the DSS support
/// vector from the tightest antipodal pair rather than recomputing it.
pub fn narrowest_edge(hull: &[LatticePoint]) -> Option<(LatticePoint, LatticePoint, f64)> {
    if hull.len() < 3 {
        return hull
            .first()
            .zip(hull.get(1))
            .map(|(&a, &b)| (a, b, 0.0));
    }
    let n = hull.len();
    let mut best: Option<(LatticePoint, LatticePoint, f64)> = None;
    for i in 0..n {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let edge_len = (((b.x - a.x).pow(2) + (b.y - a.y).pow(2)) as f64).sqrt();
        if edge_len == 0.0 {
            continue;
        }
        let max_dist = hull
            .iter()
            .map(|&v| (cross(a, b, v) as f64 / edge_len).abs())
            .fold(0.0f64, f64::max);
        if best.map(|(_, _, w)| max_dist < w).unwrap_or(true) {
            best = Some((a, b, max_dist));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> LatticePoint {
        LatticePoint::new(x, y)
    }

    #[test]
    fn collinear_points_have_zero_width() {
        let pts = vec![p(0, 0), p(1, 0), p(2, 0), p(3, 0)];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(polygon_width(&hull), 0.0);
    }

    #[test]
    fn unit_square_has_width_one() {
        let pts = vec![p(0, 0), p(1000, 0), p(1000, 1000), p(0, 1000)];
        let hull = convex_hull(&pts).unwrap();
        assert!((polygon_width(&hull) - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn single_outlier_sets_thickness() {
        let pts = vec![p(0, 0), p(100, 0), p(200, 0), p(300, 0), p(150, 50)];
        let hull = convex_hull(&pts).unwrap();
        let w = polygon_width(&hull);
        assert!(w > 0.0 && w <= 50.0);
    }
}
