//! Bump status codes (§4.3): the plateau taxonomy plus bump-specific kinds.

use crate::primitive::PrimitiveStatus;

/// Outcome of a [`super::Bump`] detection or tracking call.
///
/// Per spec.md §4.3, "status codes include those of plateau plus `TOO_LOW,
/// NO_BUMP_LINE, LINEAR, ANGULAR, HOLE_IN_INPUT_POINTS`" — `BumpStatus` is a
/// superset of [`PlateauStatus`](crate::plateau::PlateauStatus)'s variants.
/// The four tracking-gate variants at the bottom are bump-specific and kept
/// distinct from `Linear`/`Angular` (the trend-growth failures of
/// `narrow_by_trends`) so a caller can tell a geometric trend failure from a
/// reference-tolerance tracking failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpStatus {
    None,
    Ok,
    NotEnoughInputPoints,
    TooNarrow,
    NotEnoughSameAltitudePoints,
    NotEnoughConnectedPoints,
    NoBoundPosition,
    OptimalHeightUnderused,
    TooLargeNarrowing,
    TooLargeWidening,
    NoDss,
    TooTiltedDss,
    OutOfHeightReference,

    TooLow,
    NoBumpLine,
    Linear,
    Angular,
    HoleInInputPoints,

    /// Tracked position fell outside its configured tolerance of the
    /// reference (§4.3 "Tracking", the four-way gate's position axis).
    PositionOutOfTolerance,
    /// Tracked baseline altitude fell outside its configured tolerance.
    AltitudeOutOfTolerance,
    /// Tracked width fell outside its configured tolerance.
    WidthOutOfTolerance,
    /// Tracked height fell outside its configured tolerance.
    HeightOutOfTolerance,
}

impl BumpStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, BumpStatus::Ok)
    }

    /// A *sparse-point* failure does not count against the tracker's
    /// lack-tolerance counter (§7), mirroring [`PlateauStatus`](crate::plateau::PlateauStatus).
    pub fn is_sparse_point_failure(self) -> bool {
        matches!(
            self,
            BumpStatus::NotEnoughInputPoints | BumpStatus::NotEnoughSameAltitudePoints
        )
    }

    /// Near-miss failures a caller may choose to retry with a narrowed
    /// search (§4.5 step 4), same rationale as the plateau analogue.
    pub fn is_recoverable_near_miss(self) -> bool {
        matches!(self, BumpStatus::OptimalHeightUnderused)
    }
}

impl PrimitiveStatus for BumpStatus {
    fn is_ok(self) -> bool {
        self.is_ok()
    }

    fn is_sparse_point_failure(self) -> bool {
        self.is_sparse_point_failure()
    }

    fn is_recoverable_near_miss(self) -> bool {
        self.is_recoverable_near_miss()
    }
}
