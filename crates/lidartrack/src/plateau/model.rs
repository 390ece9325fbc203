//! Plateau tunables as a single value object (§9 design note), replacing the
//! original's `static const` class members and getter/setter-with-bounds
//! pattern with one `PlateauModel` the tracker holds by reference.

/// All tunables controlling plateau detection and tracking, plus their
/// legal ranges. Every setter clamps to `[MIN_*, MAX_*]`, mirroring the
/// original `PlateauModel::set*` bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateauModel {
    thickness_tolerance: f32,
    slope_tolerance: f32,
    min_length: f32,
    max_length: f32,
    side_shift_tolerance: f32,
    width_move_tolerance: f32,
    bs_max_tilt: i32,
    tail_min_size: i32,

    min_count_of_points: usize,
    max_interruption: i32,
    bs_pinch_margin: f32,
    bound_accuracy: f32,
    opt_height_min_use: f32,
    plateau_search_distance: f32,

    deviation_prediction_on: bool,
    slope_prediction_on: bool,
}

impl PlateauModel {
    pub const MIN_THICKNESS_TOLERANCE: f32 = 0.05;
    pub const MAX_THICKNESS_TOLERANCE: f32 = 0.5;
    pub const MIN_SLOPE_TOLERANCE: f32 = 0.05;
    pub const MAX_SLOPE_TOLERANCE: f32 = 0.75;
    pub const MIN_MIN_LENGTH_TOLERANCE: f32 = 0.1;
    pub const MAX_MIN_LENGTH_TOLERANCE: f32 = 5.0;
    pub const MIN_MAX_LENGTH_TOLERANCE: f32 = 2.0;
    pub const MAX_MAX_LENGTH_TOLERANCE: f32 = 12.0;
    pub const MIN_SIDE_SHIFT_TOLERANCE: f32 = 0.05;
    pub const MAX_SIDE_SHIFT_TOLERANCE: f32 = 6.0;

    pub fn thickness_tolerance(&self) -> f32 {
        self.thickness_tolerance
    }

    pub fn inc_thickness_tolerance(&mut self, dir: i32) {
        self.set_thickness_tolerance(self.thickness_tolerance + dir.signum() as f32 * 0.01);
    }

    pub fn set_thickness_tolerance(&mut self, val: f32) {
        self.thickness_tolerance = val.clamp(
            Self::MIN_THICKNESS_TOLERANCE,
            Self::MAX_THICKNESS_TOLERANCE,
        );
    }

    pub fn slope_tolerance(&self) -> f32 {
        self.slope_tolerance
    }

    pub fn set_slope_tolerance(&mut self, val: f32) {
        self.slope_tolerance = val.clamp(Self::MIN_SLOPE_TOLERANCE, Self::MAX_SLOPE_TOLERANCE);
    }

    pub fn min_length(&self) -> f32 {
        self.min_length
    }

    pub fn set_min_length(&mut self, val: f32) {
        self.min_length = val.clamp(
            Self::MIN_MIN_LENGTH_TOLERANCE,
            Self::MAX_MIN_LENGTH_TOLERANCE,
        );
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    pub fn set_max_length(&mut self, val: f32) {
        self.max_length = val.clamp(
            Self::MIN_MAX_LENGTH_TOLERANCE,
            Self::MAX_MAX_LENGTH_TOLERANCE,
        );
    }

    pub fn side_shift_tolerance(&self) -> f32 {
        self.side_shift_tolerance
    }

    pub fn set_side_shift_tolerance(&mut self, val: f32) {
        self.side_shift_tolerance = val.clamp(
            Self::MIN_SIDE_SHIFT_TOLERANCE,
            Self::MAX_SIDE_SHIFT_TOLERANCE,
        );
    }

    pub fn width_move_tolerance(&self) -> f32 {
        self.width_move_tolerance
    }

    pub fn bs_max_tilt(&self) -> i32 {
        self.bs_max_tilt
    }

    pub fn set_bs_max_tilt(&mut self, val: i32) {
        self.bs_max_tilt = val.clamp(1, 100);
    }

    pub fn max_interruption(&self) -> i32 {
        self.max_interruption
    }

    pub fn bs_pinch_margin(&self) -> f32 {
        self.bs_pinch_margin
    }

    pub fn tail_min_size(&self) -> i32 {
        self.tail_min_size
    }

    pub fn set_tail_min_size(&mut self, val: i32) {
        self.tail_min_size = val.max(1);
    }

    pub fn min_count_of_points(&self) -> usize {
        self.min_count_of_points
    }

    pub fn bound_accuracy(&self) -> f32 {
        self.bound_accuracy
    }

    pub fn opt_height_min_use(&self) -> f32 {
        self.opt_height_min_use
    }

    pub fn plateau_search_distance(&self) -> f32 {
        self.plateau_search_distance
    }

    pub fn is_deviation_prediction_on(&self) -> bool {
        self.deviation_prediction_on
    }

    pub fn switch_deviation_prediction(&mut self) {
        self.deviation_prediction_on = !self.deviation_prediction_on;
    }

    pub fn is_slope_prediction_on(&self) -> bool {
        self.slope_prediction_on
    }

    pub fn switch_slope_prediction(&mut self) {
        self.slope_prediction_on = !self.slope_prediction_on;
    }
}

impl Default for PlateauModel {
    fn default() -> Self {
        Self {
            thickness_tolerance: 0.23,
            slope_tolerance: 0.15,
            min_length: 0.8,
            max_length: 6.0,
            side_shift_tolerance: 1.3,
            width_move_tolerance: 0.5,
            bs_max_tilt: 14,
            tail_min_size: 10,
            min_count_of_points: 6,
            max_interruption: 0,
            bs_pinch_margin: 0.1,
            bound_accuracy: 0.5,
            opt_height_min_use: 0.7,
            plateau_search_distance: 1.0,
            deviation_prediction_on: true,
            slope_prediction_on: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_to_bounds() {
        let mut m = PlateauModel::default();
        m.set_thickness_tolerance(100.0);
        assert_eq!(m.thickness_tolerance(), PlateauModel::MAX_THICKNESS_TOLERANCE);
        m.set_thickness_tolerance(-5.0);
        assert_eq!(m.thickness_tolerance(), PlateauModel::MIN_THICKNESS_TOLERANCE);
    }

    #[test]
    fn defaults_are_internally_consistent() {
        let m = PlateauModel::default();
        assert!(m.min_length() < m.max_length());
    }
}
