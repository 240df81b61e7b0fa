//! Gravity compaction and refill.
//!
//! After a removal, each column is compacted toward row 0 (stable: tiles
//! keep their relative order) and the vacated top cells are refilled with
//! random colors. The returned records let a view animate the change; the
//! grid itself is already authoritative when `collapse` returns.

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::core::{GameRng, Position, Tile, TileKind};

/// A tile that fell from `from` to `to` (same column, lower row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedTile {
    pub from: Position,
    pub to: Position,
}

/// A tile generated to fill a vacated cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTile {
    pub pos: Position,
    pub kind: TileKind,
}

/// Movement and creation records of one collapse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseResult {
    pub moved: Vec<MovedTile>,
    pub created: Vec<CreatedTile>,
}

impl CollapseResult {
    /// Check if the collapse changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.created.is_empty()
    }

    /// Columns touched by any record.
    #[must_use]
    pub fn touched_columns(&self) -> Vec<usize> {
        let mut cols: Vec<usize> = self
            .moved
            .iter()
            .map(|m| m.to.col)
            .chain(self.created.iter().map(|c| c.pos.col))
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }
}

impl Grid {
    /// Compact every column toward row 0 and refill the gaps.
    ///
    /// Refills draw from `0..color_count`; 0 is treated as one color.
    pub fn collapse(&mut self, color_count: u8, rng: &mut GameRng) -> CollapseResult {
        let mut result = CollapseResult::default();
        let cols = self.cols;

        for col in 0..cols {
            let mut write = 0;
            for row in 0..self.rows {
                let Some(mut tile) = self.cells[row * cols + col].take() else {
                    continue;
                };
                if row != write {
                    let to = Position::new(write, col);
                    result.moved.push(MovedTile { from: tile.pos, to });
                    tile.pos = to;
                }
                self.cells[write * cols + col] = Some(tile);
                write += 1;
            }

            for row in write..self.rows {
                let pos = Position::new(row, col);
                let kind = TileKind::random_color(rng, color_count);
                self.cells[row * cols + col] = Some(Tile::new(pos, kind));
                result.created.push(CreatedTile { pos, kind });
            }
        }

        result
    }
}
