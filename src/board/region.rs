use super::{AnalysisBounds, Vertex};
use serde::{Deserialize, Serialize};

/// Rectangular analysis region as it appears on the wire (`regionBounds`).
///
/// Corners are board coordinates: `x` from the left edge, `y` from the top.
/// Both corners are included in the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    XInverted,
    YInverted,
    OutOfBoard { x_size: i32, y_size: i32 },
}

impl std::fmt::Display for RegionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionError::XInverted => write!(f, "x1 must be <= x2"),
            RegionError::YInverted => write!(f, "y1 must be <= y2"),
            RegionError::OutOfBoard { x_size, y_size } => {
                write!(f, "region bounds exceed the {}x{} board", x_size, y_size)
            }
        }
    }
}

impl std::error::Error for RegionError {}

impl RegionBounds {
    /// Rejects inverted or out-of-board regions before they reach the
    /// engine.
    pub fn validate(&self, x_size: i32, y_size: i32) -> Result<(), RegionError> {
        if self.x1 > self.x2 {
            return Err(RegionError::XInverted);
        }
        if self.y1 > self.y2 {
            return Err(RegionError::YInverted);
        }
        if self.x1 < 0 || self.y1 < 0 || self.x2 >= x_size || self.y2 >= y_size {
            return Err(RegionError::OutOfBoard { x_size, y_size });
        }
        Ok(())
    }

    /// Rows are `y`, columns are `x`.
    pub fn to_bounds(&self) -> AnalysisBounds {
        AnalysisBounds::new(self.y1, self.x1, self.y2, self.x2)
    }

    /// A pass is always in-region; points go through the bounds check.
    pub fn contains_vertex(&self, vertex: Vertex) -> bool {
        match vertex {
            Vertex::Pass => true,
            Vertex::Point { x, y } => self.to_bounds().contains(y, x),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/board/region.rs"]
mod tests;
