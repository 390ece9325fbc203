//! Linear archaeomorphological structure tracking over airborne LiDAR DTMs.
//!
//! Given a short user stroke across a candidate carriage track or ridge/
//! hollow, [`tracker::StructureTracker`] fits a cross-section primitive
//! ([`plateau::Plateau`] or [`bump::Bump`]) to the central scan and walks it
//! outward, scan by scan, predicting, detecting, validating and pruning
//! until the structure is lost. Tile storage, DTM shading, the GUI and
//! persistence are external collaborators (§6 of the design notes); this
//! crate only implements the tracking engine itself.

pub mod bump;
pub mod dsb;
pub mod lattice;
pub mod plateau;
pub mod predictor;
pub mod primitive;
pub mod scan;
pub mod tracker;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for callers driving a tracking pass.
pub mod prelude {
    pub use crate::bump::{Bump, BumpModel, BumpStatus};
    pub use crate::plateau::{Plateau, PlateauModel, PlateauStatus};
    pub use crate::primitive::{DetectContext, Primitive, PrimitiveStatus};
    pub use crate::scan::{CellPoints, DirectionalScanner, ScanPoint, Stroke, TileSet};
    pub use crate::tracker::{CarriageTrack, Ridge, Structure, StructureStatus, StructureTracker, TrackerModel};
}
