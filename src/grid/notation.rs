//! Text notation for boards.
//!
//! One line per row, row 0 first. Digits are colors, `B` area bomb, `D`
//! dynamite, `H` horizontal clear, `V` vertical clear, `.` an empty cell.
//! Whitespace inside a line is ignored and blank lines are skipped.
//!
//! ```
//! use tile_blast::grid::Grid;
//!
//! let grid: Grid = "012\n3B4".parse().unwrap();
//! assert_eq!(grid.rows(), 2);
//! assert_eq!(grid.to_string(), "012\n3B4");
//! ```

use std::fmt;
use std::str::FromStr;

use super::Grid;
use crate::core::{EngineError, Position, Tile, TileKind};

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let symbol = self.cells[row * self.cols + col].map_or('.', |t| t.kind.symbol());
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidLayout("board is empty".to_string()));
        }

        let mut grid = Grid::empty(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(EngineError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.len(),
                    cols
                )));
            }
            for (col, &symbol) in line.iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let kind = TileKind::from_symbol(symbol).ok_or_else(|| {
                    EngineError::InvalidLayout(format!("unknown symbol '{}' at ({}, {})", symbol, row, col))
                })?;
                grid.cells[row * cols + col] = Some(Tile::new(Position::new(row, col), kind));
            }
        }
        Ok(grid)
    }
}
