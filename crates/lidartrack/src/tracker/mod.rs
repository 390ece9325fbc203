//! Structure tracker (§4.5) and assembled structure (§4.6): the driver loop
//! that walks a primitive outward along a stroke, plus the section/structure
//! bookkeeping that stores the result.

mod driver;
mod model;
mod section;
mod status;
mod structure;

pub use driver::StructureTracker;
pub use model::{TrackerModel, MAX_TRACK_WIDTH};
pub use section::Section;
pub use status::StructureStatus;
pub use structure::{Bounded, CarriageTrack, Ridge, Structure};
