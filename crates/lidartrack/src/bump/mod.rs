//! Bump cross-section primitive (§4.3): baseline-relative humps or hollows,
//! detected standalone and tracked with a four-way tolerance gate.

mod area;
mod baseline;
mod bump;
mod measure;
mod model;
mod status;

pub use area::{AreaEstimate, BaselineFrame, UvPoint};
pub use baseline::Baseline;
pub use bump::Bump;
pub use measure::MeasureLine;
pub use model::{BumpModel, ToleranceMode};
pub use status::BumpStatus;
