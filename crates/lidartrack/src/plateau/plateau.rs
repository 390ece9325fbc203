//! Plateau: a flat cross-section primitive (§4.2).

use super::model::PlateauModel;
use super::status::PlateauStatus;
use crate::dsb::DsbBuilder;
use crate::lattice::LatticePoint;
use crate::primitive::{DetectContext, Primitive};
use crate::scan::ScanPoint;

/// A flat segment fitted to one scan.
///
/// Bands follow §3's naming: `int` is the raw detected/tracked interval,
/// `ext` the next point beyond it on either side (or the interval itself if
/// there is none), and `est` the decision-table estimate used as the next
/// reference (§4.2 step 7).
#[derive(Debug, Clone, Copy)]
pub struct Plateau {
    status: PlateauStatus,
    accepted: bool,

    s_ref: f32,
    e_ref: f32,
    h_ref: f32,
    has_ref: bool,

    s_int: f32,
    e_int: f32,
    s_ext: f32,
    e_ext: f32,
    s_est: f32,
    e_est: f32,
    h_min: f32,

    s_ok: bool,
    e_ok: bool,
    w_ok: bool,
    width_change: i32,

    slope_abs: f32,
    scan_shift: f32,
}

impl Plateau {
    /// Builds a throwaway reference-only plateau from the three scalars a
    /// caller might have without a live `Plateau` handy; see the resolved
    /// open question in §4.2.
    pub fn from_reference_band(s_ref: f32, e_ref: f32, h_ref: f32) -> Self {
        Self {
            status: PlateauStatus::None,
            accepted: false,
            s_ref,
            e_ref,
            h_ref,
            has_ref: true,
            s_int: s_ref,
            e_int: e_ref,
            s_ext: s_ref,
            e_ext: e_ref,
            s_est: s_ref,
            e_est: e_ref,
            h_min: h_ref,
            s_ok: false,
            e_ok: false,
            w_ok: false,
            width_change: 0,
            slope_abs: 0.0,
            scan_shift: 0.0,
        }
    }

    fn failed(status: PlateauStatus) -> Self {
        Self {
            status,
            accepted: false,
            s_ref: 0.0,
            e_ref: 0.0,
            h_ref: 0.0,
            has_ref: false,
            s_int: 0.0,
            e_int: 0.0,
            s_ext: 0.0,
            e_ext: 0.0,
            s_est: 0.0,
            e_est: 0.0,
            h_min: 0.0,
            s_ok: false,
            e_ok: false,
            w_ok: false,
            width_change: 0,
            slope_abs: 0.0,
            scan_shift: 0.0,
        }
    }

    /// Detects a plateau with no reference band (§4.2, "Detection").
    pub fn detect(points: &[ScanPoint], model: &PlateauModel) -> Self {
        if points.len() < model.min_count_of_points() {
            return Self::failed(PlateauStatus::NotEnoughInputPoints);
        }

        let mut by_height: Vec<f32> = points.iter().map(|p| p.y).collect();
        by_height.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let tol = model.thickness_tolerance();
        let (h_min, best_count) = best_altitude_window(&by_height, tol);
        if best_count < model.min_count_of_points() {
            return Self::failed(PlateauStatus::NotEnoughSameAltitudePoints);
        }

        let run = longest_contiguous_run(points, h_min, tol);
        let run = match run {
            Some(r) => r,
            None => return Self::failed(PlateauStatus::NotEnoughConnectedPoints),
        };
        if run.len() < model.min_count_of_points() {
            return Self::failed(PlateauStatus::NotEnoughConnectedPoints);
        }
        let s_int = points[run.start].x;
        let e_int = points[run.end - 1].x;
        if e_int - s_int < model.min_length() {
            return Self::failed(PlateauStatus::TooNarrow);
        }
        if (run.len() as f32) < model.opt_height_min_use() * best_count as f32 {
            return Self::failed(PlateauStatus::OptimalHeightUnderused);
        }

        let (s_ext, s_gap) = match run.start.checked_sub(1) {
            Some(i) => (points[i].x, s_int - points[i].x),
            None => (s_int, 0.0),
        };
        let (e_ext, e_gap) = if run.end < points.len() {
            (points[run.end].x, points[run.end].x - e_int)
        } else {
            (e_int, 0.0)
        };
        let s_sharp = s_gap < model.bound_accuracy();
        let e_sharp = e_gap < model.bound_accuracy();
        if !s_sharp && !e_sharp {
            return Self::failed(PlateauStatus::NoBoundPosition);
        }

        Self {
            status: PlateauStatus::Ok,
            accepted: true,
            s_ref: 0.0,
            e_ref: 0.0,
            h_ref: 0.0,
            has_ref: false,
            s_int,
            e_int,
            s_ext,
            e_ext,
            s_est: (s_int + s_ext) / 2.0,
            e_est: (e_int + e_ext) / 2.0,
            h_min,
            s_ok: s_sharp,
            e_ok: e_sharp,
            w_ok: true,
            width_change: 0,
            slope_abs: 0.0,
            scan_shift: 0.0,
        }
    }

    /// Tracks a plateau against a reference template (§4.2, "Tracking").
    ///
    /// `confidence_distance` is the along-track distance (in scans) since
    /// the last accepted primitive, used to scale the width-change gate.
    pub fn track(
        points: &[ScanPoint],
        reference: &Plateau,
        model: &PlateauModel,
        confidence_distance: f32,
    ) -> Self {
        if points.len() < model.min_count_of_points() {
            return Self::failed(PlateauStatus::NotEnoughInputPoints);
        }
        let origin_y = points[0].y;
        // The reference band a `track` call is judged against is always the
        // supplying primitive's own *estimated* band — its `s_ref`/`e_ref`
        // record what *it* was tracked against, one step further back.
        let ref_s = reference.s_est;
        let ref_e = reference.e_est;
        let ref_h = reference.h_min;
        let ref_center = (ref_s + ref_e) / 2.0;

        let mut sorted: Vec<(usize, ScanPoint)> = points.iter().copied().enumerate().collect();
        sorted.sort_by(|a, b| a.1.x.partial_cmp(&b.1.x).unwrap_or(std::cmp::Ordering::Equal));

        let seed_idx = sorted
            .iter()
            .enumerate()
            .min_by(|(_, (_, a)), (_, (_, b))| {
                (a.x - ref_center)
                    .abs()
                    .partial_cmp(&(b.x - ref_center).abs())
                    .unwrap()
            })
            .map(|(i, _)| i)
            .unwrap();

        let lattice_of = |sp: ScanPoint| LatticePoint::from_meters(sp.x, sp.y, origin_y);
        let mut builder = DsbBuilder::new(
            (model.thickness_tolerance() as f64) * crate::lattice::LATTICE_SCALE,
            lattice_of(sorted[seed_idx].1),
        );

        let mut left_cursor = seed_idx;
        let mut right_cursor = seed_idx;
        let mut left_fails = 0i32;
        let mut right_fails = 0i32;
        let mut go_right = true;
        let mut extent = 0.0f32;

        loop {
            let pinch_margin = model.bs_pinch_margin();
            if extent > model.min_length() {
                let current = builder.end_of_birth().map(|d| d.width).unwrap_or(0.0);
                let floor = (PlateauModel::MIN_THICKNESS_TOLERANCE as f64)
                    * crate::lattice::LATTICE_SCALE;
                builder.set_max_width(((1.0 + pinch_margin as f64) * current).max(floor));
            }

            let mut progressed = false;
            if go_right && right_fails < model.max_interruption() {
                if right_cursor + 1 < sorted.len() {
                    right_cursor += 1;
                    let pt = sorted[right_cursor].1;
                    if builder.add_right_sorted(lattice_of(pt)) {
                        right_fails = 0;
                        extent = extent.max(pt.x - sorted[seed_idx].1.x);
                        progressed = true;
                    } else {
                        right_fails += 1;
                    }
                }
            } else if !go_right && left_fails < model.max_interruption() {
                if left_cursor > 0 {
                    left_cursor -= 1;
                    let pt = sorted[left_cursor].1;
                    if builder.add_left_sorted(lattice_of(pt)) {
                        left_fails = 0;
                        extent = extent.max(sorted[seed_idx].1.x - pt.x);
                        progressed = true;
                    } else {
                        left_fails += 1;
                    }
                }
            }
            go_right = !go_right;

            let _ = progressed;
            let right_done = right_cursor + 1 >= sorted.len() || right_fails >= model.max_interruption();
            let left_done = left_cursor == 0 || left_fails >= model.max_interruption();
            if right_done && left_done {
                break;
            }
        }

        // Shorten on either end by one point to drop the last antipodal vertex.
        if builder.right_len() > model.min_count_of_points() {
            builder.remove_right(1);
        }
        if builder.left_len() > model.min_count_of_points() {
            builder.remove_left(1);
        }

        let dss = match builder.end_of_birth() {
            Some(d) => d,
            None => return Self::failed(PlateauStatus::NoDss),
        };
        if dss.slope_abs() > (model.bs_max_tilt() as f64) / 100.0 {
            return Self::failed(PlateauStatus::TooTiltedDss);
        }

        // h_min is read off the fitted DSS's own central line at the
        // reference center, not off whichever point happened to come first
        // in `points` — `origin_y` is only the meters-to-lattice translation
        // origin (plateau.cpp `track`, `ihmin = (c - a*icenter)/b - stol/2`).
        let icenter = ref_center as f64 * crate::lattice::LATTICE_SCALE;
        let stol = model.thickness_tolerance() as f64 * crate::lattice::LATTICE_SCALE;
        let h_min = if dss.b != 0 {
            let ihmin = (dss.c as f64 - dss.a as f64 * icenter) / dss.b as f64 - stol / 2.0;
            origin_y + (ihmin / crate::lattice::LATTICE_SCALE) as f32
        } else {
            origin_y
        };

        let s_int = sorted[left_cursor].1.x;
        let e_int = sorted[right_cursor].1.x;
        let s_ext = if left_cursor > 0 {
            sorted[left_cursor - 1].1.x
        } else {
            s_int
        };
        let e_ext = if right_cursor + 1 < sorted.len() {
            sorted[right_cursor + 1].1.x
        } else {
            e_int
        };

        let s_ok = (s_int - ref_s).abs() <= model.side_shift_tolerance();
        let e_ok = (e_int - ref_e).abs() <= model.side_shift_tolerance();

        let width = e_int - s_int;
        let ref_width = ref_e - ref_s;
        let width_delta = width - ref_width;
        let width_gate = model.width_move_tolerance() * confidence_distance.max(1.0);
        let width_change = if width_delta > width_gate {
            1
        } else if width_delta < -width_gate {
            -1
        } else {
            0
        };
        let w_ok = width_change == 0;

        // Decision table of §4.2 step 7.
        let (s_est, e_est, mut status) = plateau_estimate_band(
            ref_s, ref_e, s_int, e_int, s_ext, e_ext, model.min_length(), model.max_length(),
        );
        if matches!(status, PlateauStatus::None) {
            status = PlateauStatus::Ok;
        }

        Self {
            status,
            accepted: status.is_ok(),
            s_ref: ref_s,
            e_ref: ref_e,
            h_ref: ref_h,
            has_ref: true,
            s_int,
            e_int,
            s_ext,
            e_ext,
            s_est,
            e_est,
            h_min,
            s_ok,
            e_ok,
            w_ok,
            width_change,
            slope_abs: dss.slope_abs() as f32,
            scan_shift: 0.0,
        }
    }

    pub fn status(&self) -> PlateauStatus {
        self.status
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn reliable(&self) -> bool {
        self.s_ok && self.e_ok && self.w_ok
    }

    pub fn possible(&self) -> bool {
        self.s_ok || self.e_ok
    }

    pub fn bounded(&self) -> bool {
        self.s_ok && self.e_ok
    }

    pub fn estimated_start(&self) -> f32 {
        self.s_est
    }

    pub fn estimated_end(&self) -> f32 {
        self.e_est
    }

    pub fn estimated_center(&self) -> f32 {
        (self.s_est + self.e_est) / 2.0
    }

    pub fn estimated_width(&self) -> f32 {
        self.e_est - self.s_est
    }

    pub fn h_min(&self) -> f32 {
        self.h_min
    }

    pub fn internal_start(&self) -> f32 {
        self.s_int
    }

    pub fn internal_end(&self) -> f32 {
        self.e_int
    }

    pub fn external_start(&self) -> f32 {
        self.s_ext
    }

    pub fn external_end(&self) -> f32 {
        self.e_ext
    }

    pub fn width_change(&self) -> i32 {
        self.width_change
    }

    pub fn set_scan_shift(&mut self, shift: f32) {
        self.scan_shift = shift;
    }

    pub fn scan_shift(&self) -> f32 {
        self.scan_shift
    }

    /// `true` if `pos` lies strictly within the external band; used by
    /// retroactive acceptance (§4.5 step 5) and connected-point
    /// reconstruction (§4.6).
    pub fn contains(&self, pos: f32) -> bool {
        pos > self.s_ext && pos < self.e_ext
    }

    /// Comparator used by the no-initial-probe realignment (§11.3): smaller
    /// absolute DSS slope is "less tilted".
    pub fn less_tilted_than(&self, other: &Plateau) -> bool {
        self.slope_abs < other.slope_abs
    }
}

impl Primitive for Plateau {
    type Model = PlateauModel;
    type Status = PlateauStatus;

    fn detect(points: &[ScanPoint], model: &PlateauModel, _ctx: DetectContext) -> Self {
        Plateau::detect(points, model)
    }

    fn track(points: &[ScanPoint], reference: &Self, model: &PlateauModel, ctx: DetectContext) -> Self {
        Plateau::track(points, reference, model, ctx.confidence_distance)
    }

    fn status(&self) -> PlateauStatus {
        self.status()
    }

    fn accepted(&self) -> bool {
        self.accepted()
    }

    fn accept(&mut self) {
        self.accept()
    }

    fn reliable(&self) -> bool {
        self.reliable()
    }

    fn possible(&self) -> bool {
        self.possible()
    }

    fn bounded(&self) -> bool {
        self.bounded()
    }

    fn estimated_start(&self) -> f32 {
        self.estimated_start()
    }

    fn estimated_end(&self) -> f32 {
        self.estimated_end()
    }

    fn altitude(&self) -> f32 {
        self.h_min()
    }

    fn contains(&self, pos: f32) -> bool {
        self.contains(pos)
    }

    fn less_tilted_than(&self, other: &Self) -> bool {
        self.less_tilted_than(other)
    }

    fn set_scan_shift(&mut self, shift: f32) {
        self.set_scan_shift(shift)
    }

    fn scan_shift(&self) -> f32 {
        self.scan_shift()
    }

    /// Drops points in the excluded altitude band before re-detecting, so
    /// the sliding window of step 2 finds the next-best plateau instead of
    /// re-discovering the one that just failed `OptimalHeightUnderused`.
    fn detect_excluding(
        points: &[ScanPoint],
        model: &PlateauModel,
        _ctx: DetectContext,
        excluded: (f32, f32),
    ) -> Self {
        let filtered: Vec<ScanPoint> = points
            .iter()
            .copied()
            .filter(|p| p.y < excluded.0 || p.y >= excluded.1)
            .collect();
        Plateau::detect(&filtered, model)
    }
}

struct Run {
    start: usize,
    end: usize,
}

impl Run {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

fn best_altitude_window(sorted_heights: &[f32], tol: f32) -> (f32, usize) {
    let mut best_lo = sorted_heights[0];
    let mut best_count = 0usize;
    let mut lo = 0usize;
    for hi in 0..sorted_heights.len() {
        while sorted_heights[hi] - sorted_heights[lo] >= tol {
            lo += 1;
        }
        let count = hi - lo + 1;
        if count > best_count {
            best_count = count;
            best_lo = sorted_heights[lo];
        }
    }
    (best_lo, best_count)
}

fn longest_contiguous_run(points: &[ScanPoint], h_min: f32, tol: f32) -> Option<Run> {
    let mut best: Option<Run> = None;
    let mut cur_start: Option<usize> = None;
    for i in 0..=points.len() {
        let in_band = i < points.len() && points[i].y >= h_min && points[i].y < h_min + tol;
        if in_band {
            if cur_start.is_none() {
                cur_start = Some(i);
            }
        } else if let Some(s) = cur_start.take() {
            let candidate = Run { start: s, end: i };
            if best.as_ref().map(|b| candidate.len() > b.len()).unwrap_or(true) {
                best = Some(candidate);
            }
        }
    }
    best
}

#[allow(clippy::too_many_arguments)]
fn plateau_estimate_band(
    s_ref: f32,
    e_ref: f32,
    s_int: f32,
    e_int: f32,
    s_ext: f32,
    e_ext: f32,
    min_length: f32,
    max_length: f32,
) -> (f32, f32, PlateauStatus) {
    let s_left_of_ext = s_ref < s_ext;
    let e_right_of_ext = e_ref > e_ext;
    let s_inside = s_ref >= s_ext && s_ref <= e_int;
    let e_inside = e_ref <= e_ext && e_ref >= s_int;

    if s_left_of_ext && e_right_of_ext {
        let span = e_ext - s_ext;
        let status = if span < min_length {
            PlateauStatus::TooLargeNarrowing
        } else {
            PlateauStatus::None
        };
        return (s_ext, e_ext, status);
    }
    if s_left_of_ext {
        let mut e_est = e_ref.min(e_ext).max(s_ext + min_length);
        if e_est > e_ext {
            e_est = e_ext;
        }
        return (s_ext, e_est, PlateauStatus::None);
    }
    if s_inside && e_inside {
        let span = e_ref - s_ref;
        let status = if span > max_length {
            PlateauStatus::TooLargeWidening
        } else {
            PlateauStatus::None
        };
        return (s_ref, e_ref, status);
    }
    if s_inside && e_ref < s_ref {
        let e_est = (s_int + min_length).min(e_ext);
        return (s_int, e_est, PlateauStatus::None);
    }
    // Right-of mirror cases.
    let mut s_est = s_ref.max(s_int).min(e_ext - min_length);
    if s_est < s_int {
        s_est = s_int;
    }
    (s_est, e_ext, PlateauStatus::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_scan(n: usize, y: f32) -> Vec<ScanPoint> {
        (0..n)
            .map(|i| ScanPoint::new(i as f32 * 4.0 / (n - 1) as f32, y))
            .collect()
    }

    #[test]
    fn single_scan_flat_plateau_is_ok() {
        let pts = flat_scan(20, 100.0);
        let model = PlateauModel::default();
        let p = Plateau::detect(&pts, &model);
        assert_eq!(p.status(), PlateauStatus::Ok);
        assert!((p.internal_start() - 0.0).abs() < 1e-4);
        assert!((p.internal_end() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn two_height_plateau_splits_by_tolerance() {
        let mut pts = Vec::new();
        for i in 0..10 {
            pts.push(ScanPoint::new(i as f32 * 0.4, 100.0));
            pts.push(ScanPoint::new(i as f32 * 0.4 + 0.2, 100.1));
        }
        pts.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let mut loose = PlateauModel::default();
        loose.set_thickness_tolerance(0.23);
        let p = Plateau::detect(&pts, &loose);
        assert_eq!(p.status(), PlateauStatus::Ok);

        let mut tight = PlateauModel::default();
        tight.set_thickness_tolerance(0.05);
        let p2 = Plateau::detect(&pts, &tight);
        assert_eq!(p2.status(), PlateauStatus::NotEnoughConnectedPoints);
    }

    #[test]
    fn too_few_points_fails_fast() {
        let pts = vec![ScanPoint::new(0.0, 1.0), ScanPoint::new(1.0, 1.0)];
        let model = PlateauModel::default();
        let p = Plateau::detect(&pts, &model);
        assert_eq!(p.status(), PlateauStatus::NotEnoughInputPoints);
    }

    #[test]
    fn band_invariants_hold() {
        let pts = flat_scan(30, 50.0);
        let model = PlateauModel::default();
        let p = Plateau::detect(&pts, &model);
        assert!(p.s_int <= p.e_int);
        assert!(p.s_ext <= p.s_int + 1e-6);
        assert!(p.e_int <= p.e_ext + 1e-6);
    }
}
