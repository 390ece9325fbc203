//! User-adjustable measure line (§4.3): translating and tilting the baseline
//! redefines the measured area without re-running baseline detection.

use crate::scan::ScanPoint;

use super::area::{BaselineFrame, UvPoint};
use super::baseline::Baseline;
use super::model::BumpModel;

/// The measure line: the baseline, optionally translated up by `t * h_init`
/// and tilted by `r * h_init` (§11.4), expressed as two points in the
/// baseline-aligned frame.
#[derive(Debug, Clone, Copy)]
pub struct MeasureLine {
    pub start: UvPoint,
    pub end: UvPoint,
}

impl MeasureLine {
    /// Builds the measure line from the baseline's own two endpoints (both
    /// at `v = 0` in the baseline frame) raised and tilted per `model`.
    ///
    /// `h_init` is the summit height used to scale the translation/rotation
    /// ratios into absolute offsets (§4.3).
    pub fn new(frame: &BaselineFrame, start: ScanPoint, end: ScanPoint, h_init: f64, model: &BumpModel) -> Self {
        let u0 = frame.project(start);
        let u1 = frame.project(end);
        let t = model.measure_translation_ratio() as f64 * h_init;
        let r = model.measure_rotation_ratio() as f64 * h_init;
        // Translate both ends up by t, then tilt by splitting +/- r across
        // the two ends around their midpoint so the line pivots in place.
        MeasureLine {
            start: UvPoint {
                u: u0.u,
                v: u0.v + t - r,
            },
            end: UvPoint {
                u: u1.u,
                v: u1.v + t + r,
            },
        }
    }

    pub(crate) fn height_at(&self, u: f64) -> f64 {
        let du = self.end.u - self.start.u;
        if du.abs() < 1e-12 {
            return self.start.v;
        }
        let k = (self.end.v - self.start.v) / du;
        self.start.v + k * (u - self.start.u)
    }
}

/// Re-intersects the profile with the measure line, returning the indices
/// of the new foot points (where the profile crosses the line, searching
/// outward from `summit_index`) and the new summit index within
/// `[start_index, end_index]`.
pub fn reintersect(
    points: &[ScanPoint],
    start_index: usize,
    end_index: usize,
    summit_index: usize,
    frame: &BaselineFrame,
    line: &MeasureLine,
    over: bool,
) -> Option<(Baseline, usize)> {
    if summit_index <= start_index || summit_index >= end_index {
        return None;
    }

    let signed = |i: usize| -> f64 {
        let p = frame.project(points[i]);
        let h = line.height_at(p.u);
        if over {
            p.v - h
        } else {
            h - p.v
        }
    };

    let mut new_start = start_index;
    for i in (start_index..summit_index).rev() {
        if signed(i) < 0.0 {
            new_start = i + 1;
            break;
        }
        new_start = i;
    }

    let mut new_end = end_index;
    for i in (summit_index + 1)..=end_index {
        if signed(i) < 0.0 {
            new_end = i;
            break;
        }
        new_end = i;
    }

    if new_end <= new_start {
        return None;
    }

    let mut summit = summit_index;
    let mut best = signed(summit_index);
    for i in new_start..=new_end {
        let h = signed(i);
        if h > best {
            best = h;
            summit = i;
        }
    }

    Some((
        Baseline {
            start_index: new_start,
            end_index: new_end,
        },
        summit,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translating_measure_line_up_shortens_feet() {
        let pts = vec![
            ScanPoint::new(0.0, 0.0),
            ScanPoint::new(1.0, 0.5),
            ScanPoint::new(2.0, 1.0),
            ScanPoint::new(3.0, 0.5),
            ScanPoint::new(4.0, 0.0),
        ];
        let frame = BaselineFrame::new(pts[0], pts[4], true);
        let mut model = BumpModel::default();
        model.set_measure_translation_ratio(0.5);
        let line = MeasureLine::new(&frame, pts[0], pts[4], 1.0, &model);
        let (baseline, summit) = reintersect(&pts, 0, 4, 2, &frame, &line, true).unwrap();
        assert_eq!(summit, 2);
        assert!(baseline.end_index <= 4);
        assert!(baseline.end_index - baseline.start_index <= 4);
    }

    #[test]
    fn zero_ratios_keep_measure_line_on_baseline() {
        let pts = vec![
            ScanPoint::new(0.0, 0.0),
            ScanPoint::new(1.0, 0.5),
            ScanPoint::new(2.0, 1.0),
            ScanPoint::new(3.0, 0.5),
            ScanPoint::new(4.0, 0.0),
        ];
        let frame = BaselineFrame::new(pts[0], pts[4], true);
        let model = BumpModel::default();
        let line = MeasureLine::new(&frame, pts[0], pts[4], 1.0, &model);
        let (baseline, summit) = reintersect(&pts, 0, 4, 2, &frame, &line, true).unwrap();
        assert_eq!(baseline.start_index, 0);
        assert_eq!(baseline.end_index, 4);
        assert_eq!(summit, 2);
    }
}
