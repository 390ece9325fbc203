//! The shared contract between [`crate::plateau::Plateau`] and
//! [`crate::bump::Bump`] (§11.2): the original's two near-duplicate
//! detector classes (`CTrackDetector`/`RidgeDetector`) collapse into one
//! generic [`crate::tracker::StructureTracker`] driven entirely through this
//! trait.

use crate::scan::ScanPoint;

/// Status-code contract both [`crate::plateau::PlateauStatus`] and
/// [`crate::bump::BumpStatus`] satisfy, so the tracker can read the two
/// properties it actually branches on (§7) without knowing which primitive
/// kind produced them.
pub trait PrimitiveStatus: Copy + PartialEq {
    fn is_ok(self) -> bool;
    /// A sparse-point failure does not count against the lack-tolerance
    /// counter (§7).
    fn is_sparse_point_failure(self) -> bool;
    /// A near-miss the tracker may retry with a narrowed search (only
    /// `Plateau`'s `OptimalHeightUnderused` qualifies; §4.5 step 4).
    fn is_recoverable_near_miss(self) -> bool {
        false
    }
}

/// Parameters a primitive's `detect`/`track` needs beyond the scan points
/// themselves, unified across plateau and bump so the tracker can call
/// either through one signature.
///
/// `over` and `stroke_length` are bump-specific (ignored by `Plateau`);
/// `confidence_distance` is plateau-specific (ignored by `Bump`, which uses
/// `stroke_length` for its own hole-gap gate instead, per §4.2/§4.3).
#[derive(Debug, Clone, Copy)]
pub struct DetectContext {
    pub over: bool,
    pub stroke_length: f32,
    pub confidence_distance: f32,
}

impl DetectContext {
    pub fn new(over: bool, stroke_length: f32) -> Self {
        Self {
            over,
            stroke_length,
            confidence_distance: 1.0,
        }
    }

    pub fn with_confidence_distance(mut self, confidence_distance: f32) -> Self {
        self.confidence_distance = confidence_distance;
        self
    }
}

/// One cross-section fit: a [`crate::plateau::Plateau`] or a
/// [`crate::bump::Bump`], quantified and driven identically by the tracker.
pub trait Primitive: Sized + Clone {
    type Model;
    type Status: PrimitiveStatus;

    fn detect(points: &[ScanPoint], model: &Self::Model, ctx: DetectContext) -> Self;
    fn track(points: &[ScanPoint], reference: &Self, model: &Self::Model, ctx: DetectContext) -> Self;

    fn status(&self) -> Self::Status;
    fn accepted(&self) -> bool;
    fn accept(&mut self);

    fn reliable(&self) -> bool;
    fn possible(&self) -> bool;
    fn bounded(&self) -> bool;

    fn estimated_start(&self) -> f32;
    fn estimated_end(&self) -> f32;
    fn estimated_center(&self) -> f32 {
        (self.estimated_start() + self.estimated_end()) / 2.0
    }

    /// The scalar elevation-like quantity fed to the predictor's slope
    /// register (§4.4): `h_min` for a plateau, baseline altitude for a bump.
    fn altitude(&self) -> f32;

    /// `true` if `pos` lies strictly within this primitive's external band
    /// (§4.5 step 5, §4.6 reconstruction).
    fn contains(&self, pos: f32) -> bool;

    /// Comparator used by the no-initial-probe realignment (§11.3).
    fn less_tilted_than(&self, other: &Self) -> bool;

    fn set_scan_shift(&mut self, shift: f32);
    fn scan_shift(&self) -> f32;

    /// Retries detection excluding a previously-tried altitude band (§4.5
    /// step 4: only `Plateau`'s `OptimalHeightUnderused` near-miss uses
    /// this; the default no-op suits primitives with no such retry path).
    fn detect_excluding(
        points: &[ScanPoint],
        model: &Self::Model,
        ctx: DetectContext,
        _excluded: (f32, f32),
    ) -> Self {
        Self::detect(points, model, ctx)
    }
}
