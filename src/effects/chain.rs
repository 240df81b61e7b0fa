//! Chain reactions: expanding an area through every special tile it hits.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashSet;

use super::area::area;
use crate::core::{EngineError, EngineResult, Position, SpecialKind, TileKind};
use crate::grid::Grid;

/// Resolves special tile effects.
pub struct SpecialResolver;

impl SpecialResolver {
    /// Full area of effect of a special tile of `kind` triggered at `trigger`.
    ///
    /// Any special tile inside the area fires in turn with its own shape.
    /// Every position appears once; the trigger is always first. `kind` need
    /// not match the tile at `trigger`: the area bomb booster fires an
    /// `AreaBomb` shape on whatever tile was picked.
    pub fn chain_area(grid: &Grid, trigger: Position, kind: SpecialKind) -> EngineResult<Vec<Position>> {
        if !grid.contains(trigger) {
            return Err(EngineError::out_of_bounds(trigger));
        }

        let mut visited = FxHashSet::default();
        let mut result = vec![trigger];
        let mut queue = VecDeque::new();
        visited.insert(trigger);
        queue.push_back((trigger, kind));

        let mut fired = 0usize;
        while let Some((center, shape)) = queue.pop_front() {
            fired += 1;
            for pos in area(center, shape, grid.rows(), grid.cols()) {
                if !visited.insert(pos) {
                    continue;
                }
                result.push(pos);
                if let Some(TileKind::Special(next)) = grid.kind_or_none(pos) {
                    queue.push_back((pos, next));
                }
            }
        }

        debug!(
            "{:?} at {} fired {} special tile(s), {} cells hit",
            kind, trigger, fired, result.len()
        );
        Ok(result)
    }
}
