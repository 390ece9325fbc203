//! Assembled structure (§4.6): one central primitive plus two ordered
//! sections, with signed-index addressing and geometric aggregation.
//!
//! `CarriageTrack = Structure<Plateau>` and `Ridge = Structure<Bump>` are
//! thin aliases over the same generic assembly (§11.2) rather than two
//! hand-duplicated types.

use crate::bump::Bump;
use crate::plateau::Plateau;
use crate::primitive::Primitive;
use crate::scan::Stroke;

use super::section::Section;
use super::status::StructureStatus;

/// `0` addresses the central primitive; negative indices walk the right
/// section, positive indices the left section (§3).
#[derive(Debug, Clone)]
pub struct Structure<P: Primitive> {
    central: P,
    right: Section<P>,
    left: Section<P>,
    stroke: Stroke,
    status: StructureStatus,
}

pub type CarriageTrack = Structure<Plateau>;
pub type Ridge = Structure<Bump>;

impl<P: Primitive> Structure<P> {
    pub fn new(central: P, stroke: Stroke) -> Self {
        Self {
            central,
            right: Section::new(),
            left: Section::new(),
            stroke,
            status: StructureStatus::Ok,
        }
    }

    pub fn central(&self) -> &P {
        &self.central
    }

    pub fn right(&self) -> &Section<P> {
        &self.right
    }

    pub fn right_mut(&mut self) -> &mut Section<P> {
        &mut self.right
    }

    pub fn left(&self) -> &Section<P> {
        &self.left
    }

    pub fn left_mut(&mut self) -> &mut Section<P> {
        &mut self.left
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn status(&self) -> StructureStatus {
        self.status
    }

    pub fn set_status(&mut self, status: StructureStatus) {
        self.status = status;
    }

    /// Signed-index accessor (§4.6): `None` iff `|i|` exceeds the relevant
    /// section's length.
    pub fn primitive(&self, i: isize) -> Option<&P> {
        match i.cmp(&0) {
            std::cmp::Ordering::Equal => Some(&self.central),
            std::cmp::Ordering::Less => self.right.get((-i - 1) as usize),
            std::cmp::Ordering::Greater => self.left.get((i - 1) as usize),
        }
    }

    /// Total number of scans spanned, central included (§4.5's "spread").
    pub fn spread(&self) -> usize {
        1 + self.right.len() + self.left.len()
    }

    pub fn count_of_accepted(&self) -> usize {
        1 + self.right.count_of_accepted() + self.left.count_of_accepted()
    }

    pub fn holes(&self) -> usize {
        self.right.holes() + self.left.holes()
    }

    /// Mean estimated width over every accepted primitive, center included.
    pub fn mean_width(&self) -> f32 {
        let widths: Vec<f32> = std::iter::once(&self.central)
            .chain(self.right.iter())
            .chain(self.left.iter())
            .filter(|p| p.accepted())
            .map(|p| p.estimated_end() - p.estimated_start())
            .collect();
        mean(&widths)
    }

    /// Mean altitude over every accepted primitive (§4.6 "mean height").
    pub fn mean_height(&self) -> f32 {
        let heights: Vec<f32> = std::iter::once(&self.central)
            .chain(self.right.iter())
            .chain(self.left.iter())
            .filter(|p| p.accepted())
            .map(|p| p.altitude())
            .collect();
        mean(&heights)
    }

    /// Least-squares slope of altitude against signed scan index over
    /// accepted primitives (§4.6 "slope over section").
    pub fn slope(&self) -> f32 {
        let samples: Vec<(f32, f32)> = self
            .right
            .iter()
            .enumerate()
            .filter(|(_, p)| p.accepted())
            .map(|(k, p)| (-(k as f32 + 1.0), p.altitude()))
            .chain(std::iter::once((0.0, self.central.altitude())))
            .chain(
                self.left
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.accepted())
                    .map(|(k, p)| (k as f32 + 1.0, p.altitude())),
            )
            .collect();
        least_squares_slope(&samples)
    }

    /// Fraction of along-stroke absolute shift relative to spread, used by
    /// shift-length pruning (§4.5 step 7).
    pub fn relative_shift_length(&self) -> f32 {
        let shifts: Vec<f32> = std::iter::once(&self.central)
            .chain(self.right.iter())
            .chain(self.left.iter())
            .filter(|p| p.accepted())
            .map(|p| p.scan_shift().abs())
            .collect();
        if shifts.is_empty() {
            0.0
        } else {
            shifts.iter().sum::<f32>() / shifts.len() as f32
        }
    }

    /// Connected-point reconstruction (§4.6, §11.1): walks outward from the
    /// center on each side, concatenating `right` (reversed, so along-stroke
    /// order holds) + central + `left`. Holes of up to `lack_tolerance`
    /// missing scans are bridged by linearly interpolating the endpoint
    /// centers of the accepted primitives bracketing the gap, rather than
    /// re-deriving raw scan pixels (those are not retained past one
    /// tracking iteration; §5 memory discipline).
    pub fn connected_centers(&self, lack_tolerance: usize) -> Vec<(f32, f32)> {
        let mut right_points = reconstruct_side(&self.right, lack_tolerance, true);
        right_points.reverse();
        let mut out = right_points;
        out.push((self.central.estimated_center(), self.central.altitude()));
        out.extend(reconstruct_side(&self.left, lack_tolerance, false));
        out
    }
}

fn mean(xs: &[f32]) -> f32 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f32>() / xs.len() as f32
    }
}

fn least_squares_slope(samples: &[(f32, f32)]) -> f32 {
    let n = samples.len() as f32;
    if n < 2.0 {
        return 0.0;
    }
    let mean_x = samples.iter().map(|(x, _)| x).sum::<f32>() / n;
    let mean_y = samples.iter().map(|(_, y)| y).sum::<f32>() / n;
    let mut num = 0.0f32;
    let mut den = 0.0f32;
    for &(x, y) in samples {
        num += (x - mean_x) * (y - mean_y);
        den += (x - mean_x) * (x - mean_x);
    }
    if den.abs() < 1e-9 {
        0.0
    } else {
        num / den
    }
}

fn reconstruct_side<P: Primitive>(section: &Section<P>, lack_tolerance: usize, reversed_for_right: bool) -> Vec<(f32, f32)> {
    let _ = reversed_for_right;
    let mut out = Vec::new();
    let mut last_accepted_pos: Option<(usize, f32, f32)> = None;
    for (idx, p) in section.iter().enumerate() {
        if !p.accepted() {
            continue;
        }
        if let Some((last_idx, last_x, last_y)) = last_accepted_pos {
            let gap = idx - last_idx;
            if gap > 1 && gap - 1 <= lack_tolerance {
                for k in 1..gap {
                    let t = k as f32 / gap as f32;
                    out.push((
                        last_x + t * (p.estimated_center() - last_x),
                        last_y + t * (p.altitude() - last_y),
                    ));
                }
            }
        }
        out.push((p.estimated_center(), p.altitude()));
        last_accepted_pos = Some((idx, p.estimated_center(), p.altitude()));
    }
    out
}

/// Area/volume/width bounds (§4.6): the lower/upper envelope derived from a
/// bump's own area-bound estimate, propagated through an aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounded {
    pub mean: f32,
    pub lower: f32,
    pub upper: f32,
}

impl Structure<Bump> {
    /// Walks outward from each accepted bump's summit until height drops
    /// below `r * h_est` on both sides, returning the mean and standard
    /// deviation of the resulting width (§4.6). Each bump retains its own
    /// baseline-frame profile from detection, so the walk is the real
    /// interpolated-foot measurement, not an approximation of it.
    pub fn mean_width_at_height_ratio(&self, r: f32) -> (f32, f32) {
        let widths: Vec<f32> = std::iter::once(&self.central)
            .chain(self.right.iter())
            .chain(self.left.iter())
            .filter(|p| p.accepted())
            .map(|p| p.width_at_height_ratio(r))
            .collect();
        if widths.is_empty() {
            return (0.0, 0.0);
        }
        let m = mean(&widths);
        let var = widths.iter().map(|w| (w - m) * (w - m)).sum::<f32>() / widths.len() as f32;
        (m, var.sqrt())
    }

    /// Trapezoidal volume over the section, weighted by scan period
    /// (assumed uniform, `period_m`), with lower/upper bounds from each
    /// bump's own area bounds (§4.6).
    pub fn volume(&self, period_m: f32, area_bounds: impl Fn(&Bump) -> (f64, f64)) -> Bounded {
        let bumps: Vec<&Bump> = std::iter::once(&self.central)
            .chain(self.right.iter())
            .chain(self.left.iter())
            .filter(|p| p.accepted())
            .collect();
        let mut vol = 0.0f64;
        let mut vol_lo = 0.0f64;
        let mut vol_hi = 0.0f64;
        for b in &bumps {
            let (lo, hi) = area_bounds(b);
            vol += b.area() * period_m as f64;
            vol_lo += lo * period_m as f64;
            vol_hi += hi * period_m as f64;
        }
        Bounded {
            mean: vol as f32,
            lower: vol_lo as f32,
            upper: vol_hi as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plateau::PlateauModel;
    use crate::scan::ScanPoint;

    fn ok_plateau(y: f32) -> Plateau {
        let pts: Vec<ScanPoint> = (0..20).map(|i| ScanPoint::new(i as f32 * 4.0 / 19.0, y)).collect();
        Plateau::detect(&pts, &PlateauModel::default())
    }

    fn stroke() -> Stroke {
        Stroke { p1: (0.0, 0.0), p2: (0.0, 6.0) }
    }

    #[test]
    fn signed_index_addresses_center_and_sides() {
        let mut s: Structure<Plateau> = Structure::new(ok_plateau(100.0), stroke());
        s.right_mut().push(ok_plateau(100.0));
        s.left_mut().push(ok_plateau(100.0));
        assert!(s.primitive(0).is_some());
        assert!(s.primitive(-1).is_some());
        assert!(s.primitive(1).is_some());
        assert!(s.primitive(-2).is_none());
        assert!(s.primitive(2).is_none());
    }

    #[test]
    fn mean_height_averages_accepted_altitudes() {
        let mut s: Structure<Plateau> = Structure::new(ok_plateau(100.0), stroke());
        s.right_mut().push(ok_plateau(102.0));
        assert!((s.mean_height() - 101.0).abs() < 1e-3);
    }

    #[test]
    fn connected_centers_interpolates_single_hole() {
        let mut s: Structure<Plateau> = Structure::new(ok_plateau(100.0), stroke());
        let mut failed = Plateau::detect(&[], &PlateauModel::default());
        let _ = &mut failed;
        s.left_mut().push(ok_plateau(100.0));
        s.left_mut().push(Plateau::detect(&[], &PlateauModel::default()));
        s.left_mut().push(ok_plateau(100.0));
        let pts = s.connected_centers(2);
        assert!(pts.len() >= 3);
    }
}
