//! Tile kinds and tiles.
//!
//! A tile is either one of a small set of colors, which take part in
//! flood-fill matching, or one of four special kinds, which trigger an area
//! effect instead. The two ranges are disjoint: `TileKind::is_special` is
//! the single predicate callers use to tell them apart.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::rng::GameRng;

/// The four special tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    /// Clears the 3×3 block around the tile.
    AreaBomb,
    /// Clears the 5×5 block around the tile.
    Dynamite,
    /// Clears the tile's entire row.
    HorizontalClear,
    /// Clears the tile's entire column.
    VerticalClear,
}

impl SpecialKind {
    /// Board-notation symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            SpecialKind::AreaBomb => 'B',
            SpecialKind::Dynamite => 'D',
            SpecialKind::HorizontalClear => 'H',
            SpecialKind::VerticalClear => 'V',
        }
    }

    /// Parse a board-notation symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'B' => Some(SpecialKind::AreaBomb),
            'D' => Some(SpecialKind::Dynamite),
            'H' => Some(SpecialKind::HorizontalClear),
            'V' => Some(SpecialKind::VerticalClear),
            _ => None,
        }
    }
}

/// What occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// A color index in `0..color_count`.
    Color(u8),
    /// A special tile.
    Special(SpecialKind),
}

impl TileKind {
    /// Check if this is a special tile.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, TileKind::Special(_))
    }

    /// The color index, if this is a color tile.
    #[must_use]
    pub const fn color(self) -> Option<u8> {
        match self {
            TileKind::Color(c) => Some(c),
            TileKind::Special(_) => None,
        }
    }

    /// The special kind, if this is a special tile.
    #[must_use]
    pub const fn special(self) -> Option<SpecialKind> {
        match self {
            TileKind::Special(s) => Some(s),
            TileKind::Color(_) => None,
        }
    }

    /// A uniformly random color in `0..color_count`.
    ///
    /// A `color_count` of 0 yields color 0, as if one color were configured.
    pub fn random_color(rng: &mut GameRng, color_count: u8) -> Self {
        let colors = usize::from(color_count.max(1));
        TileKind::Color(rng.gen_range_usize(0..colors) as u8)
    }

    /// Board-notation symbol: a digit for colors, a letter for specials.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            TileKind::Color(c) => char::from_digit(u32::from(c), 10).unwrap_or('?'),
            TileKind::Special(s) => s.symbol(),
        }
    }

    /// Parse a board-notation symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        if let Some(d) = symbol.to_digit(10) {
            return Some(TileKind::Color(d as u8));
        }
        SpecialKind::from_symbol(symbol).map(TileKind::Special)
    }
}

impl From<SpecialKind> for TileKind {
    fn from(kind: SpecialKind) -> Self {
        TileKind::Special(kind)
    }
}

/// A tile on the grid.
///
/// `pos` always equals the slot holding the tile; the grid updates it on
/// every relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Position,
    pub kind: TileKind,
}

impl Tile {
    /// Create a new tile.
    #[must_use]
    pub const fn new(pos: Position, kind: TileKind) -> Self {
        Self { pos, kind }
    }

    /// Check if this tile is special.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.kind.is_special()
    }
}
