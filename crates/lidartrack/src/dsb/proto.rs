//! Digital-segment builder (DSB): incremental, bounded-width blurred segment
//! growth from a seed point, extending left and right with rollback.
//!
//! Grounded on the original `BSProto`/`ConvexHull` pair: a segment-in-growth
//! keeps its full point set, a convex hull recomputed on demand (see
//! [`super::hull`]), and a maximal width past which an extension is refused
//! and rolled back.

use super::super::lattice::LatticePoint;
use super::hull::{convex_hull, narrowest_edge, polygon_width};

/// A frozen digital straight segment, the result of [`DsbBuilder::end_of_birth`].
#[derive(Debug, Clone, Copy)]
pub struct DigitalStraightSegment {
    /// Support vector `(a, b)` of the line `a*x + b*y = c`.
    pub a: i64,
    pub b: i64,
    /// Offset of the lower bounding line.
    pub c: i64,
    /// Digital period (`gcd(|a|, |b|)`, at least 1).
    pub period: i64,
    /// Strict thickness achieved by the segment, in lattice units.
    pub width: f64,
}

impl DigitalStraightSegment {
    /// `|dy/dx|` of the segment's support vector, used for tilt checks.
    pub fn slope_abs(&self) -> f64 {
        if self.a == 0 {
            0.0
        } else {
            (self.b as f64 / self.a as f64).abs()
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.max(1)
}

/// Growth state of a [`DsbBuilder`], per the §4.1 state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsbState {
    OnePoint,
    Flat,
    TwoDim,
}

/// A blurred segment under construction.
///
/// Points are kept split by the side they were added from so that
/// [`remove_left`](Self::remove_left)/[`remove_right`](Self::remove_right)
/// can roll back a fixed number of the most recent additions on that side,
/// and so the caller can alternate sides to keep both extents comparable, as
/// §4.2 step 3 requires.
#[derive(Debug, Clone)]
pub struct DsbBuilder {
    center: LatticePoint,
    left: Vec<LatticePoint>,
    right: Vec<LatticePoint>,
    max_width: f64,
}

impl DsbBuilder {
    /// Starts a new segment from one lattice point.
    pub fn new(max_width: f64, center: LatticePoint) -> Self {
        Self {
            center,
            left: Vec::new(),
            right: Vec::new(),
            max_width,
        }
    }

    fn all_points(&self) -> Vec<LatticePoint> {
        let mut pts = Vec::with_capacity(self.left.len() + self.right.len() + 1);
        pts.extend(self.left.iter().rev().copied());
        pts.push(self.center);
        pts.extend(self.right.iter().copied());
        pts
    }

    fn current_width(&self) -> f64 {
        match convex_hull(&self.all_points()) {
            Some(hull) => polygon_width(&hull),
            None => 0.0,
        }
    }

    /// Tries to extend on the right; rolls back and returns `false` if the
    /// resulting strict thickness would exceed `max_width`.
    pub fn add_right(&mut self, p: LatticePoint) -> bool {
        self.right.push(p);
        if self.current_width() > self.max_width {
            self.right.pop();
            false
        } else {
            true
        }
    }

    /// Symmetric counterpart of [`add_right`](Self::add_right).
    pub fn add_left(&mut self, p: LatticePoint) -> bool {
        self.left.push(p);
        if self.current_width() > self.max_width {
            self.left.pop();
            false
        } else {
            true
        }
    }

    /// Sorted-add variant: for monotone scan traversal, callers are expected
    /// to pass points in increasing/decreasing along-stroke order already;
    /// this is semantically identical to [`add_right`]/[`add_left`] but
    /// documents the usual calling convention of §4.2 step 3.
    pub fn add_right_sorted(&mut self, p: LatticePoint) -> bool {
        debug_assert!(
            self.right.last().map(|q| q.x <= p.x).unwrap_or(true),
            "add_right_sorted called out of order"
        );
        self.add_right(p)
    }

    pub fn add_left_sorted(&mut self, p: LatticePoint) -> bool {
        debug_assert!(
            self.left.last().map(|q| q.x >= p.x).unwrap_or(true),
            "add_left_sorted called out of order"
        );
        self.add_left(p)
    }

    /// Drops the last `n` additions on the right.
    pub fn remove_right(&mut self, n: usize) {
        let new_len = self.right.len().saturating_sub(n);
        self.right.truncate(new_len);
    }

    /// Drops the last `n` additions on the left.
    pub fn remove_left(&mut self, n: usize) {
        let new_len = self.left.len().saturating_sub(n);
        self.left.truncate(new_len);
    }

    /// Tightens (or loosens) the allowed width, used by pinching (§4.1).
    pub fn set_max_width(&mut self, w: f64) {
        self.max_width = w;
    }

    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    pub fn left_len(&self) -> usize {
        self.left.len()
    }

    pub fn right_len(&self) -> usize {
        self.right.len()
    }

    pub fn state(&self) -> DsbState {
        if self.left.is_empty() && self.right.is_empty() {
            return DsbState::OnePoint;
        }
        match convex_hull(&self.all_points()) {
            None => DsbState::Flat,
            Some(hull) => {
                if polygon_width(&hull) == 0.0 {
                    DsbState::Flat
                } else {
                    DsbState::TwoDim
                }
            }
        }
    }

    /// Finalizes the segment into a frozen [`DigitalStraightSegment`].
    ///
    /// Returns `None` if fewer than two points have been added (the segment
    /// never left the `empty`/`one_point` state of §4.1).
    pub fn end_of_birth(&self) -> Option<DigitalStraightSegment> {
        let pts = self.all_points();
        if pts.len() < 2 {
            return None;
        }
        let hull = convex_hull(&pts)?;
        let (a_pt, b_pt, width) = narrowest_edge(&hull)?;
        let a = b_pt.y - a_pt.y;
        let b = a_pt.x - b_pt.x;
        let c = a * a_pt.x + b * a_pt.y;
        let period = gcd(a, b);
        Some(DigitalStraightSegment {
            a,
            b,
            c,
            period,
            width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> LatticePoint {
        LatticePoint::new(x, y)
    }

    #[test]
    fn grows_flat_segment_without_rollback() {
        let mut b = DsbBuilder::new(50.0, p(0, 0));
        for x in 1..=5 {
            assert!(b.add_right(p(x * 100, 0)));
        }
        for x in 1..=5 {
            assert!(b.add_left(p(-x * 100, 0)));
        }
        assert_eq!(b.state(), DsbState::Flat);
        let dss = b.end_of_birth().unwrap();
        assert_eq!(dss.width, 0.0);
    }

    #[test]
    fn rolls_back_addition_exceeding_width() {
        let mut b = DsbBuilder::new(10.0, p(0, 0));
        assert!(b.add_right(p(100, 0)));
        assert!(b.add_right(p(200, 0)));
        // A point far off the line would exceed the width bound.
        assert!(!b.add_right(p(300, 1000)));
        assert_eq!(b.right_len(), 2);
    }

    #[test]
    fn pinching_tightens_width_and_can_reject_previously_ok_point() {
        let mut b = DsbBuilder::new(100.0, p(0, 0));
        assert!(b.add_right(p(100, 5)));
        assert!(b.add_right(p(200, 0)));
        b.set_max_width(1.0);
        assert!(!b.add_right(p(300, 50)));
    }
}
