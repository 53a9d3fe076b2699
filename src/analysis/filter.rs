//! Region enforcement on analysis responses.
//!
//! The engine is asked to keep its search inside `regionBounds`, but the
//! wrapper still enforces the region on everything it hands back: candidate
//! moves, principal variations, and the root suggestion.

use crate::analysis::AnalysisResponse;
use crate::board::{RegionBounds, Vertex};
use compact_str::CompactString;

fn in_region(mv: &str, region: &RegionBounds, y_size: i32) -> bool {
    // A vertex that does not parse is never in-region.
    Vertex::parse(mv, y_size).is_some_and(|v| region.contains_vertex(v))
}

/// Every move in the response that falls outside the region, in encounter
/// order: top-level candidates first, then PV moves, then the root
/// suggestion.
pub fn out_of_region_moves(
    response: &AnalysisResponse,
    region: &RegionBounds,
    y_size: i32,
) -> Vec<CompactString> {
    let mut outside = Vec::new();

    for info in &response.move_infos {
        if !in_region(&info.mv, region, y_size) {
            outside.push(info.mv.clone());
        }
        for mv in &info.pv {
            if !in_region(mv, region, y_size) {
                outside.push(mv.clone());
            }
        }
    }

    if let Some(root) = &response.root_info {
        if let Some(mv) = &root.suggested_move {
            if !in_region(mv, region, y_size) {
                outside.push(mv.clone());
            }
        }
    }

    outside
}

/// Drops out-of-region candidates, truncates each surviving PV at its first
/// out-of-region move, and clears an out-of-region root suggestion.
pub fn retain_region_moves(response: &mut AnalysisResponse, region: &RegionBounds, y_size: i32) {
    response
        .move_infos
        .retain(|info| in_region(&info.mv, region, y_size));

    for info in &mut response.move_infos {
        if let Some(cut) = info.pv.iter().position(|mv| !in_region(mv, region, y_size)) {
            info.pv.truncate(cut);
        }
    }

    if let Some(root) = &mut response.root_info {
        if let Some(mv) = &root.suggested_move {
            if !in_region(mv, region, y_size) {
                root.suggested_move = None;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/filter.rs"]
mod tests;
