//! Fixed-precision 1 mm lattice used by the digital-geometry core.
//!
//! Tracking-level code works in meters as `f32`; the digital-segment builder
//! and the primitives that call into it work on an integer lattice obtained
//! by multiplying by [`LATTICE_SCALE`] and rounding. All lattice arithmetic is
//! exact integer arithmetic; only areas, slopes and ratios derived from it are
//! floating point again.

use nalgebra::Vector2;

/// Millimeters per meter: the lattice resolution.
pub const LATTICE_SCALE: f64 = 1000.0;

/// One point on the integer lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticePoint {
    pub x: i64,
    pub y: i64,
}

impl LatticePoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Lifts a meter-space point onto the lattice, relative to `origin_y`
    /// (subtracted before scaling, to keep the resulting integers small).
    pub fn from_meters(x_m: f32, y_m: f32, origin_y_m: f32) -> Self {
        Self {
            x: (x_m as f64 * LATTICE_SCALE).round() as i64,
            y: ((y_m - origin_y_m) as f64 * LATTICE_SCALE).round() as i64,
        }
    }

    pub fn to_vector2(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

/// Squared Euclidean distance between two lattice points (exact, integer).
pub fn sq_dist(a: LatticePoint, b: LatticePoint) -> i64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Signed twice-area of the triangle `a, b, c` (positive = counter-clockwise).
pub fn cross(a: LatticePoint, b: LatticePoint, c: LatticePoint) -> i64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_meters_to_mm() {
        let p = LatticePoint::from_meters(1.2345, 100.001, 100.0);
        assert_eq!(p.x, 1235);
        assert_eq!(p.y, 1);
    }

    #[test]
    fn cross_sign_matches_orientation() {
        let a = LatticePoint::new(0, 0);
        let b = LatticePoint::new(10, 0);
        let c = LatticePoint::new(10, 10);
        assert!(cross(a, b, c) > 0);
        assert!(cross(a, c, b) < 0);
    }
}
