//! Color matching: flood fill, bonus upgrades and the playability check.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{BonusThresholds, EngineResult, Position, SpecialKind, TileKind};
use crate::grid::Grid;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Resolves same-color regions.
pub struct MatchResolver;

impl MatchResolver {
    /// Find the 4-connected region sharing the seed's color.
    ///
    /// Returns an empty set when the seed is empty or holds a special tile:
    /// special tiles never match by color. The seed is the first element.
    /// No minimum is applied here.
    pub fn find_match(grid: &Grid, seed: Position) -> EngineResult<Vec<Position>> {
        let color = match grid.kind_at(seed)? {
            Some(TileKind::Color(c)) => c,
            _ => return Ok(Vec::new()),
        };

        let mut region = Vec::new();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(seed);
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            region.push(current);

            for next in Self::neighbors(grid, current) {
                if grid.kind_or_none(next) == Some(TileKind::Color(color)) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Ok(region)
    }

    /// In-bounds 4-neighbors of a position.
    fn neighbors(grid: &Grid, pos: Position) -> SmallVec<[Position; 4]> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| pos.offset(dr, dc, grid.rows(), grid.cols()))
            .collect()
    }

    /// Special kind earned by a match of `size`, if any.
    ///
    /// Checked from the largest bonus down.
    #[must_use]
    pub fn bonus_for(size: usize, thresholds: &BonusThresholds) -> Option<SpecialKind> {
        if size >= thresholds.dynamite {
            Some(SpecialKind::Dynamite)
        } else if size == thresholds.rocket_vertical {
            Some(SpecialKind::VerticalClear)
        } else if size == thresholds.rocket_horizontal {
            Some(SpecialKind::HorizontalClear)
        } else if size == thresholds.area_bomb {
            Some(SpecialKind::AreaBomb)
        } else {
            None
        }
    }

    /// Cheap playability check.
    ///
    /// True if any special tile is on the board, or if any cell has an
    /// equal-color neighbor to its right or above. Not a solver.
    #[must_use]
    pub fn has_possible_matches(grid: &Grid) -> bool {
        for tile in grid.tiles() {
            let color = match tile.kind {
                TileKind::Special(_) => return true,
                TileKind::Color(c) => c,
            };
            let right = Position::new(tile.pos.row, tile.pos.col + 1);
            let above = Position::new(tile.pos.row + 1, tile.pos.col);
            if grid.kind_or_none(right) == Some(TileKind::Color(color))
                || grid.kind_or_none(above) == Some(TileKind::Color(color))
            {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;

    fn sorted(mut v: Vec<Position>) -> Vec<Position> {
        v.sort();
        v
    }

    #[test]
    fn test_find_match_region() {
        let grid: Grid = "\
            00123\n\
            10234\n\
            11340\n\
            22401"
            .parse()
            .unwrap();

        let region = MatchResolver::find_match(&grid, Position::new(0, 0)).unwrap();
        assert_eq!(region[0], Position::new(0, 0));
        assert_eq!(
            sorted(region),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );

        let ones = MatchResolver::find_match(&grid, Position::new(2, 1)).unwrap();
        assert_eq!(
            sorted(ones),
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(2, 1)]
        );
    }

    #[test]
    fn test_find_match_ignores_diagonals() {
        let grid: Grid = "01\n10".parse().unwrap();
        let region = MatchResolver::find_match(&grid, Position::new(0, 0)).unwrap();
        assert_eq!(region, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_find_match_special_or_empty_seed() {
        let grid: Grid = "B0\n.0".parse().unwrap();
        assert!(MatchResolver::find_match(&grid, Position::new(0, 0)).unwrap().is_empty());
        assert!(MatchResolver::find_match(&grid, Position::new(1, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_find_match_does_not_cross_specials() {
        let grid: Grid = "0B0".parse().unwrap();
        let region = MatchResolver::find_match(&grid, Position::new(0, 0)).unwrap();
        assert_eq!(region, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_find_match_out_of_bounds() {
        let grid: Grid = "00\n00".parse().unwrap();
        assert_eq!(
            MatchResolver::find_match(&grid, Position::new(2, 0)),
            Err(EngineError::InvalidPosition { row: 2, col: 0 })
        );
    }

    #[test]
    fn test_bonus_thresholds() {
        let t = BonusThresholds::default();
        assert_eq!(MatchResolver::bonus_for(3, &t), None);
        assert_eq!(MatchResolver::bonus_for(4, &t), None);
        assert_eq!(MatchResolver::bonus_for(5, &t), Some(SpecialKind::AreaBomb));
        assert_eq!(MatchResolver::bonus_for(6, &t), Some(SpecialKind::HorizontalClear));
        assert_eq!(MatchResolver::bonus_for(7, &t), Some(SpecialKind::VerticalClear));
        assert_eq!(MatchResolver::bonus_for(8, &t), Some(SpecialKind::Dynamite));
        assert_eq!(MatchResolver::bonus_for(20, &t), Some(SpecialKind::Dynamite));
    }

    #[test]
    fn test_bonus_dynamite_checked_first() {
        let t = BonusThresholds {
            area_bomb: 4,
            rocket_horizontal: 4,
            rocket_vertical: 4,
            dynamite: 4,
        };
        assert_eq!(MatchResolver::bonus_for(4, &t), Some(SpecialKind::Dynamite));
    }

    #[test]
    fn test_has_possible_matches() {
        let stuck: Grid = "012\n120\n201".parse().unwrap();
        assert!(!MatchResolver::has_possible_matches(&stuck));

        let horizontal: Grid = "012\n122\n201".parse().unwrap();
        assert!(MatchResolver::has_possible_matches(&horizontal));

        let vertical: Grid = "012\n102\n201".parse().unwrap();
        assert!(MatchResolver::has_possible_matches(&vertical));

        let special: Grid = "012\n1V0\n201".parse().unwrap();
        assert!(MatchResolver::has_possible_matches(&special));
    }
}
