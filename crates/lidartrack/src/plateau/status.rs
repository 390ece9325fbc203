//! Plateau status codes (§4.2).

use crate::primitive::PrimitiveStatus;

/// Outcome of a [`super::Plateau`] detection or tracking call.
///
/// Not an error type in the `std::error::Error` sense: per §7, a primitive
/// failure is an ordinary result value consulted by the tracker, never an
/// exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateauStatus {
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
}

impl PlateauStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, PlateauStatus::Ok)
    }

    /// A *sparse-point* failure (too few points overall, or too few at the
    /// chosen altitude) does not count against the tracker's lack-tolerance
    /// counter (§7): the scan was plausibly just empty terrain.
    pub fn is_sparse_point_failure(self) -> bool {
        matches!(
            self,
            PlateauStatus::NotEnoughInputPoints | PlateauStatus::NotEnoughSameAltitudePoints
        )
    }

    /// Near-miss failures a caller may choose to retry with a narrowed
    /// search (§4.5 step 4).
    pub fn is_recoverable_near_miss(self) -> bool {
        matches!(self, PlateauStatus::OptimalHeightUnderused)
    }
}

impl PrimitiveStatus for PlateauStatus {
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
