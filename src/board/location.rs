use compact_str::{format_compact, CompactString};

/// GTP column letters. `I` is skipped by convention.
const GTP_COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A board intersection packed into a single row-major index:
/// `loc = row * x_size + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc(pub i32);

impl Loc {
    pub const fn from_coords(row: i32, col: i32, x_size: i32) -> Self {
        Loc(row * x_size + col)
    }

    /// Decodes the row. `x_size` must be positive and match the width used
    /// to encode this location.
    pub const fn row(self, x_size: i32) -> i32 {
        self.0 / x_size
    }

    pub const fn col(self, x_size: i32) -> i32 {
        self.0 % x_size
    }
}

/// A move target in GTP vertex notation: either `pass` or a point.
///
/// `x` counts columns from the left (`A` = 0), `y` counts rows from the
/// top, so the GTP row number is `y_size - y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point { x: i32, y: i32 },
}

impl Vertex {
    /// Parses a GTP vertex like `"Q4"` or `"pass"` (case-insensitive).
    ///
    /// Returns `None` for malformed input or a row number outside
    /// `1..=y_size`. Column range against the board width is the caller's
    /// concern; GTP notation itself only bounds it to 25 letters.
    pub fn parse(s: &str, y_size: i32) -> Option<Vertex> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Some(Vertex::Pass);
        }

        let mut chars = s.chars();
        let col_char = chars.next()?.to_ascii_uppercase();
        if !col_char.is_ascii_uppercase() {
            return None;
        }
        let x = GTP_COLUMNS.iter().position(|&c| c == col_char as u8)? as i32;

        let row_number: i32 = chars.as_str().parse().ok()?;
        if row_number < 1 || row_number > y_size {
            return None;
        }

        Some(Vertex::Point {
            x,
            y: y_size - row_number,
        })
    }

    /// Formats back to GTP notation. `None` when `x` has no column letter.
    pub fn to_gtp(&self, y_size: i32) -> Option<CompactString> {
        match *self {
            Vertex::Pass => Some(CompactString::const_new("pass")),
            Vertex::Point { x, y } => {
                if x < 0 {
                    return None;
                }
                let col = *GTP_COLUMNS.get(x as usize)? as char;
                Some(format_compact!("{}{}", col, y_size - y))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/board/location.rs"]
mod tests;
