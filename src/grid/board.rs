//! The tile grid.
//!
//! A fixed `rows × cols` array of cells, each holding one tile or nothing.
//! Cells are only empty between a removal and the following collapse.
//!
//! Storage is a flat row-major `Vec`, index `row * cols + col`. Row 0 is the
//! bottom row.
//!
//! Every accessor rejects out-of-bounds positions with `InvalidPosition`;
//! nothing is clamped. Every relocation (swap, collapse, reshuffle) moves
//! the tile and rewrites its `pos` in the same step.

use crate::core::{EngineError, EngineResult, GameRng, Position, Tile, TileKind};

/// The board: owns every tile in play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create a grid with every cell empty.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Create a grid filled with uniformly random colors.
    ///
    /// `color_count` is expected to be at least 1; 0 fills with color 0.
    pub fn random(rows: usize, cols: usize, color_count: u8, rng: &mut GameRng) -> Self {
        let mut grid = Self::empty(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new(row, col);
                let kind = TileKind::random_color(rng, color_count);
                grid.cells[row * cols + col] = Some(Tile::new(pos, kind));
            }
        }
        grid
    }

    /// Create a grid from row-major kinds, row 0 first.
    pub fn from_kinds(
        rows: usize,
        cols: usize,
        kinds: impl IntoIterator<Item = TileKind>,
    ) -> EngineResult<Self> {
        let mut grid = Self::empty(rows, cols);
        let mut count = 0;
        for kind in kinds {
            if count == rows * cols {
                return Err(EngineError::InvalidLayout(format!(
                    "more than {} tiles for a {}x{} grid",
                    rows * cols,
                    rows,
                    cols
                )));
            }
            let pos = Position::new(count / cols, count % cols);
            grid.cells[count] = Some(Tile::new(pos, kind));
            count += 1;
        }
        if count != rows * cols {
            return Err(EngineError::InvalidLayout(format!(
                "expected {} tiles, got {}",
                rows * cols,
                count
            )));
        }
        Ok(grid)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a position lies on the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> EngineResult<usize> {
        if self.contains(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(EngineError::out_of_bounds(pos))
        }
    }

    /// Get the tile at a position (`None` if the cell is empty).
    pub fn get(&self, pos: Position) -> EngineResult<Option<&Tile>> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Get the kind at a position (`None` if the cell is empty).
    pub fn kind_at(&self, pos: Position) -> EngineResult<Option<TileKind>> {
        Ok(self.get(pos)?.map(|t| t.kind))
    }

    /// Kind at an in-bounds position; `None` for empty or off-grid cells.
    ///
    /// For scans that already iterate within bounds.
    #[must_use]
    pub fn kind_or_none(&self, pos: Position) -> Option<TileKind> {
        self.get(pos).ok().flatten().map(|t| t.kind)
    }

    /// Change the kind of an occupied cell in place.
    pub fn set_kind(&mut self, pos: Position, kind: TileKind) -> EngineResult<()> {
        let idx = self.index(pos)?;
        let tile = self.cells[idx].as_mut().ok_or(EngineError::EmptyCell(pos))?;
        tile.kind = kind;
        Ok(())
    }

    /// Remove and return the tile at a position.
    pub fn remove(&mut self, pos: Position) -> EngineResult<Option<Tile>> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx].take())
    }

    /// Remove every position in a set.
    ///
    /// All positions are validated first; an out-of-bounds entry rejects the
    /// whole call without removing anything. Returns the number of tiles
    /// actually removed.
    pub fn remove_all(&mut self, positions: &[Position]) -> EngineResult<usize> {
        if let Some(bad) = positions.iter().find(|p| !self.contains(**p)) {
            return Err(EngineError::out_of_bounds(*bad));
        }
        let mut removed = 0;
        for &pos in positions {
            if self.cells[pos.row * self.cols + pos.col].take().is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Swap the tiles at two occupied positions, updating both tiles' `pos`.
    pub fn swap(&mut self, a: Position, b: Position) -> EngineResult<()> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        if self.cells[ia].is_none() {
            return Err(EngineError::EmptyCell(a));
        }
        if self.cells[ib].is_none() {
            return Err(EngineError::EmptyCell(b));
        }
        self.cells.swap(ia, ib);
        if let Some(tile) = self.cells[ia].as_mut() {
            tile.pos = a;
        }
        if let Some(tile) = self.cells[ib].as_mut() {
            tile.pos = b;
        }
        Ok(())
    }

    /// Randomly permute the existing tiles over their current positions.
    ///
    /// The multiset of kinds is preserved; only positions change. Returns,
    /// for each occupied slot in row-major order, the position its tile
    /// occupied before the shuffle.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> Vec<Position> {
        let slots: Vec<usize> = (0..self.cells.len()).filter(|&i| self.cells[i].is_some()).collect();
        let mut tiles: Vec<Tile> = slots.iter().filter_map(|&i| self.cells[i].take()).collect();

        rng.shuffle(&mut tiles);

        let mut prior = Vec::with_capacity(tiles.len());
        for (&slot, mut tile) in slots.iter().zip(tiles) {
            prior.push(tile.pos);
            tile.pos = Position::new(slot / self.cols, slot % self.cols);
            self.cells[slot] = Some(tile);
        }
        prior
    }

    /// Iterate over every tile, row-major from row 0.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Check that every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate over every position, row-major from row 0.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Position::new(i / cols, i % cols))
    }
}
