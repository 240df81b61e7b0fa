//! Area shapes of the special tiles.

use crate::core::{Position, SpecialKind};

impl SpecialKind {
    /// Half-width of the square blast, for the square kinds.
    const fn radius(self) -> Option<isize> {
        match self {
            SpecialKind::AreaBomb => Some(1),
            SpecialKind::Dynamite => Some(2),
            SpecialKind::HorizontalClear | SpecialKind::VerticalClear => None,
        }
    }
}

/// Cells hit by a special tile of `kind` at `center`, clamped to the grid.
///
/// - `HorizontalClear`: the whole row
/// - `VerticalClear`: the whole column
/// - `AreaBomb`: the 3×3 block around `center`
/// - `Dynamite`: the 5×5 block around `center`
#[must_use]
pub fn area(center: Position, kind: SpecialKind, rows: usize, cols: usize) -> Vec<Position> {
    match kind {
        SpecialKind::HorizontalClear => (0..cols).map(|col| Position::new(center.row, col)).collect(),
        SpecialKind::VerticalClear => (0..rows).map(|row| Position::new(row, center.col)).collect(),
        SpecialKind::AreaBomb | SpecialKind::Dynamite => {
            let r = kind.radius().unwrap_or(0);
            let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
            for dr in -r..=r {
                for dc in -r..=r {
                    if let Some(pos) = center.offset(dr, dc, rows, cols) {
                        cells.push(pos);
                    }
                }
            }
            cells
        }
    }
}
