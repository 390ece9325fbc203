//! Area, surface center and mass center of a bump's cross-section (§4.3).
//!
//! Works in a local frame anchored on the baseline: `u` runs along the
//! baseline direction, `v` is the perpendicular height above it (below it,
//! for hollows — `v` is always signed so that a bump has `v >= 0` over its
//! baseline). Area is the trapezoidal integral of `v` over `u`; the surface
//! center is the point where a line parallel to the baseline-normal bisects
//! that area; the mass center is the intersection of the line parallel to
//! the baseline at half area (its `v`, from closed-form integration of the
//! trapezoid chain) with the line through the surface center perpendicular
//! to the baseline (its `u`, inherited from `surface_center`).

use crate::scan::ScanPoint;

use super::measure::MeasureLine;

/// A 2-D point in the baseline-aligned `(u, v)` frame.
#[derive(Debug, Clone, Copy)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

pub struct BaselineFrame {
    origin: ScanPoint,
    ux: f64,
    uy: f64,
    vx: f64,
    vy: f64,
}

impl BaselineFrame {
    pub fn new(start: ScanPoint, end: ScanPoint, over: bool) -> Self {
        let dx = (end.x - start.x) as f64;
        let dy = (end.y - start.y) as f64;
        let len = (dx * dx + dy * dy).sqrt().max(1e-12);
        let (ux, uy) = (dx / len, dy / len);
        // Perpendicular, oriented so that `over` bumps get v >= 0.
        let (mut vx, mut vy) = (-uy, ux);
        if !over {
            vx = -vx;
            vy = -vy;
        }
        Self {
            origin: start,
            ux,
            uy,
            vx,
            vy,
        }
    }

    pub fn project(&self, p: ScanPoint) -> UvPoint {
        let dx = (p.x - self.origin.x) as f64;
        let dy = (p.y - self.origin.y) as f64;
        UvPoint {
            u: dx * self.ux + dy * self.uy,
            v: dx * self.vx + dy * self.vy,
        }
    }
}

/// Area and centers of the region between the baseline and the profile
/// points `points[start_index..=end_index]`.
#[derive(Debug, Clone, Copy)]
pub struct AreaEstimate {
    pub area: f64,
    pub surface_center: UvPoint,
    /// Intersection of the half-area-height line with the perpendicular
    /// through `surface_center` (§4.3).
    pub mass_center: UvPoint,
}

/// Area and second v-moment of the trapezoid under segment `a -> b`.
fn segment_moments(a: UvPoint, b: UvPoint) -> (f64, f64) {
    let du = b.u - a.u;
    if du.abs() < 1e-12 {
        return (0.0, 0.0);
    }
    let h0 = a.v;
    let k = (b.v - h0) / du;
    let area = du * (h0 + b.v) / 2.0;
    let m_vsq = h0 * h0 * du + h0 * k * du * du + k * k * du.powi(3) / 3.0;
    (area, m_vsq)
}

pub fn estimate_area(
    points: &[ScanPoint],
    start_index: usize,
    end_index: usize,
    frame: &BaselineFrame,
) -> Option<AreaEstimate> {
    estimate_area_relative(points, start_index, end_index, frame, &|_| 0.0)
}

/// Area and centers measured against the measure line rather than the
/// baseline itself (§4.3/§11.4): a translated/tilted `v = 0` reference.
pub(crate) fn estimate_area_against_line(
    points: &[ScanPoint],
    start_index: usize,
    end_index: usize,
    frame: &BaselineFrame,
    line: &MeasureLine,
) -> Option<AreaEstimate> {
    estimate_area_relative(points, start_index, end_index, frame, &|u| line.height_at(u))
}

fn estimate_area_relative(
    points: &[ScanPoint],
    start_index: usize,
    end_index: usize,
    frame: &BaselineFrame,
    line_v: &dyn Fn(f64) -> f64,
) -> Option<AreaEstimate> {
    if end_index <= start_index {
        return None;
    }
    let uv: Vec<UvPoint> = points[start_index..=end_index]
        .iter()
        .map(|p| {
            let proj = frame.project(*p);
            UvPoint {
                u: proj.u,
                v: proj.v - line_v(proj.u),
            }
        })
        .collect();

    let mut area = 0.0;
    let mut m_vsq = 0.0;
    for w in uv.windows(2) {
        let (a, mvi) = segment_moments(w[0], w[1]);
        area += a;
        m_vsq += mvi;
    }
    if area.abs() < 1e-12 {
        return None;
    }
    let mass_center_v = m_vsq / (2.0 * area);

    // Walk segments to find where cumulative area crosses half the total,
    // then linearly interpolate the profile height there.
    let half = area / 2.0;
    let mut cum = 0.0;
    let mut surface = uv[uv.len() - 1];
    for w in uv.windows(2) {
        let (a, _) = segment_moments(w[0], w[1]);
        if (cum + a - half).abs() < 1e-9 || (cum < half && cum + a >= half) {
            let t = if a.abs() < 1e-12 {
                0.0
            } else {
                (half - cum) / a
            };
            surface = UvPoint {
                u: w[0].u + t * (w[1].u - w[0].u),
                v: w[0].v + t * (w[1].v - w[0].v),
            };
            break;
        }
        cum += a;
    }

    Some(AreaEstimate {
        area,
        surface_center: surface,
        mass_center: UvPoint {
            u: surface.u,
            v: mass_center_v,
        },
    })
}

/// Area bounds (§4.3): the same measure-line-relative integral, summed in
/// forward and reverse traversal order, giving a lower/upper envelope that
/// reproduces the single-pass estimate exactly when the measure line sits
/// on the baseline (§8 "Idempotence of measure line").
pub(crate) fn estimate_area_bounds_against_line(
    points: &[ScanPoint],
    start_index: usize,
    end_index: usize,
    frame: &BaselineFrame,
    line: &MeasureLine,
) -> (f64, f64) {
    if end_index <= start_index {
        return (0.0, 0.0);
    }
    let uv: Vec<UvPoint> = points[start_index..=end_index]
        .iter()
        .map(|p| {
            let proj = frame.project(*p);
            UvPoint {
                u: proj.u,
                v: proj.v - line.height_at(proj.u),
            }
        })
        .collect();

    let forward: f64 = uv.windows(2).map(|w| segment_moments(w[0], w[1]).0).sum();
    let reverse: f64 = uv.windows(2).rev().map(|w| segment_moments(w[0], w[1]).0).sum();
    (forward.min(reverse), forward.max(reverse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_triangle_has_expected_area_and_centers() {
        let pts = vec![
            ScanPoint::new(0.0, 0.0),
            ScanPoint::new(2.0, 1.0),
            ScanPoint::new(4.0, 0.0),
        ];
        let frame = BaselineFrame::new(pts[0], pts[2], true);
        let est = estimate_area(&pts, 0, 2, &frame).unwrap();
        assert!((est.area - 2.0).abs() < 1e-6);
        assert!((est.surface_center.u - 2.0).abs() < 0.3);
        assert!((est.mass_center.v - 1.0 / 3.0).abs() < 0.1);
        assert!((est.mass_center.u - est.surface_center.u).abs() < 1e-9);
    }
}
