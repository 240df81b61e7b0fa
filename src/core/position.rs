//! Grid coordinates.
//!
//! `Position` is a plain value type used directly as a hash-set key by the
//! flood fill and the chain resolver.
//!
//! Row 0 is the bottom row: gravity pulls tiles toward it and refills
//! appear at the highest row indices.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta, returning `None` if the result falls
    /// outside a `rows × cols` grid.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
