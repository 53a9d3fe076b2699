mod filter;
mod models;

pub use filter::{out_of_region_moves, retain_region_moves};
pub use models::{AnalysisRequest, AnalysisResponse, MoveInfo, RootInfo};
