mod bounds;
mod location;
mod region;

pub use bounds::AnalysisBounds;
pub use location::{Loc, Vertex};
pub use region::{RegionBounds, RegionError};
