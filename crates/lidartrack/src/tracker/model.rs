//! Tracker-level tunables (§4.5, §9 design note): the structural gates that
//! sit above a single primitive's own model — lack tolerance, pruning
//! thresholds, realignment strategy — collected the same way
//! [`crate::plateau::PlateauModel`]/[`crate::bump::BumpModel`] collect
//! theirs.

/// Minimum accepted stroke length (§4.5 step 1): shorter strokes cannot
/// possibly span a track of plausible width.
pub const MAX_TRACK_WIDTH: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerModel {
    lack_tolerance: i32,
    no_bounds_tolerance: i32,
    max_shift_length: f32,
    min_density: f32,
    tail_min_size: i32,

    initial_probe_enabled: bool,
    probe_side_scans: i32,
    side_trials: i32,
}

impl TrackerModel {
    pub const MIN_LACK_TOLERANCE: i32 = 1;
    pub const MAX_LACK_TOLERANCE: i32 = 20;
    pub const MIN_MIN_DENSITY: f32 = 0.0;
    pub const MAX_MIN_DENSITY: f32 = 100.0;

    pub fn lack_tolerance(&self) -> i32 {
        self.lack_tolerance
    }

    pub fn set_lack_tolerance(&mut self, val: i32) {
        self.lack_tolerance = val.clamp(Self::MIN_LACK_TOLERANCE, Self::MAX_LACK_TOLERANCE);
    }

    pub fn no_bounds_tolerance(&self) -> i32 {
        self.no_bounds_tolerance
    }

    pub fn max_shift_length(&self) -> f32 {
        self.max_shift_length
    }

    pub fn min_density(&self) -> f32 {
        self.min_density
    }

    pub fn set_min_density(&mut self, val: f32) {
        self.min_density = val.clamp(Self::MIN_MIN_DENSITY, Self::MAX_MIN_DENSITY);
    }

    pub fn tail_min_size(&self) -> i32 {
        self.tail_min_size
    }

    pub fn initial_probe_enabled(&self) -> bool {
        self.initial_probe_enabled
    }

    pub fn switch_initial_probe(&mut self) {
        self.initial_probe_enabled = !self.initial_probe_enabled;
    }

    pub fn probe_side_scans(&self) -> i32 {
        self.probe_side_scans
    }

    /// Count of discrete lateral offsets tried by the no-probe realignment
    /// (§11.3).
    pub fn side_trials(&self) -> i32 {
        self.side_trials
    }
}

impl Default for TrackerModel {
    fn default() -> Self {
        Self {
            lack_tolerance: 11,
            no_bounds_tolerance: 2,
            max_shift_length: 1.65,
            min_density: 60.0,
            tail_min_size: 10,
            initial_probe_enabled: true,
            probe_side_scans: 6,
            side_trials: 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_to_bounds() {
        let mut m = TrackerModel::default();
        m.set_lack_tolerance(1000);
        assert_eq!(m.lack_tolerance(), TrackerModel::MAX_LACK_TOLERANCE);
        m.set_min_density(-5.0);
        assert_eq!(m.min_density(), TrackerModel::MIN_MIN_DENSITY);
    }
}
