//! Digital-segment builder: bounded-width blurred segment growth by
//! incremental convex-hull maintenance (§4.1).

mod hull;
mod proto;

pub use hull::{convex_hull, polygon_width};
pub use proto::{DigitalStraightSegment, DsbBuilder, DsbState};
