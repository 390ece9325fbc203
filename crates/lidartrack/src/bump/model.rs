//! Bump tunables as a single value object, mirroring [`crate::plateau::PlateauModel`].

/// Per-axis tolerance mode for the four-way tracking gate (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceMode {
    Off,
    Absolute,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpModel {
    min_count_of_points: usize,
    min_height: f32,
    hole_max_relative_length: f32,
    min_trend_size: usize,
    rel_pinch_length: f32,
    trend_min_pinch: f32,

    position_mode: ToleranceMode,
    altitude_mode: ToleranceMode,
    width_mode: ToleranceMode,
    height_mode: ToleranceMode,
    position_tolerance: f32,
    altitude_tolerance: f32,
    width_tolerance: f32,
    height_tolerance: f32,

    measure_translation_ratio: f32,
    measure_rotation_ratio: f32,

    mass_referenced: bool,
}

impl BumpModel {
    pub const MAX_LINE_TRANSLATION_RATIO: f32 = 0.8;
    pub const MAX_LINE_ROTATION_RATIO: f32 = 0.95;
    pub const MAX_JOINT_RATIO: f32 = 0.95;
    /// Lower bound, in meters, below which a trend's pinched thickness is
    /// never tightened further (§4.3 trend detection).
    pub const MIN_TREND_MIN_PINCH: f32 = 0.05;
    pub const MAX_TREND_MIN_PINCH: f32 = 1.0;

    pub fn min_count_of_points(&self) -> usize {
        self.min_count_of_points
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn hole_max_relative_length(&self) -> f32 {
        self.hole_max_relative_length
    }

    pub fn min_trend_size(&self) -> usize {
        self.min_trend_size
    }

    pub fn rel_pinch_length(&self) -> f32 {
        self.rel_pinch_length
    }

    pub fn trend_min_pinch(&self) -> f32 {
        self.trend_min_pinch
    }

    /// Sets the trend pinch floor, clamped to `[0.05, 1.0]` m.
    pub fn set_trend_min_pinch(&mut self, v: f32) {
        self.trend_min_pinch = v.clamp(Self::MIN_TREND_MIN_PINCH, Self::MAX_TREND_MIN_PINCH);
    }

    pub fn position_gate(&self) -> (ToleranceMode, f32) {
        (self.position_mode, self.position_tolerance)
    }

    pub fn altitude_gate(&self) -> (ToleranceMode, f32) {
        (self.altitude_mode, self.altitude_tolerance)
    }

    pub fn width_gate(&self) -> (ToleranceMode, f32) {
        (self.width_mode, self.width_tolerance)
    }

    pub fn height_gate(&self) -> (ToleranceMode, f32) {
        (self.height_mode, self.height_tolerance)
    }

    pub fn mass_referenced(&self) -> bool {
        self.mass_referenced
    }

    pub fn measure_translation_ratio(&self) -> f32 {
        self.measure_translation_ratio
    }

    pub fn measure_rotation_ratio(&self) -> f32 {
        self.measure_rotation_ratio
    }

    /// Sets the measure-line translation ratio, clamped to `[0, 0.8]`, and
    /// adjusts rotation down if needed to respect `|r + t| <= 0.95` (§11.4):
    /// translation is the primary control, rotation yields to it.
    pub fn set_measure_translation_ratio(&mut self, t: f32) {
        self.measure_translation_ratio = t.clamp(0.0, Self::MAX_LINE_TRANSLATION_RATIO);
        self.clamp_rotation_to_joint_bound();
    }

    /// Sets the measure-line rotation ratio, clamped to `[-0.95, 0.95]` and
    /// to the joint bound.
    pub fn set_measure_rotation_ratio(&mut self, r: f32) {
        self.measure_rotation_ratio = r.clamp(
            -Self::MAX_LINE_ROTATION_RATIO,
            Self::MAX_LINE_ROTATION_RATIO,
        );
        self.clamp_rotation_to_joint_bound();
    }

    fn clamp_rotation_to_joint_bound(&mut self) {
        let room = Self::MAX_JOINT_RATIO - self.measure_translation_ratio;
        self.measure_rotation_ratio = self.measure_rotation_ratio.clamp(-room, room);
    }
}

impl Default for BumpModel {
    fn default() -> Self {
        Self {
            min_count_of_points: 6,
            min_height: 0.4,
            hole_max_relative_length: 0.6,
            min_trend_size: 4,
            rel_pinch_length: 0.1,
            trend_min_pinch: 0.136,
            position_mode: ToleranceMode::Relative,
            altitude_mode: ToleranceMode::Relative,
            width_mode: ToleranceMode::Relative,
            height_mode: ToleranceMode::Relative,
            position_tolerance: 0.3,
            altitude_tolerance: 0.3,
            width_tolerance: 0.3,
            height_tolerance: 0.3,
            measure_translation_ratio: 0.0,
            measure_rotation_ratio: 0.0,
            mass_referenced: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_yields_to_translation_on_joint_bound() {
        let mut m = BumpModel::default();
        m.set_measure_rotation_ratio(0.9);
        m.set_measure_translation_ratio(0.5);
        assert!(m.measure_rotation_ratio().abs() <= BumpModel::MAX_JOINT_RATIO - 0.5 + 1e-6);
    }
}
