//! Game configuration.
//!
//! All tunables of a session live in `GameConfig`: board dimensions, color
//! count, match and bonus thresholds, scoring rates, the target score, the
//! starting counters, the reshuffle cap and the RNG seed.
//!
//! ```
//! use tile_blast::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_dimensions(5, 5)
//!     .with_target_score(300)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Match sizes that upgrade the clicked tile into a special tile.
///
/// Checked from the largest bonus down: dynamite uses `>=`, the others
/// require an exact size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusThresholds {
    pub area_bomb: usize,
    pub rocket_horizontal: usize,
    pub rocket_vertical: usize,
    pub dynamite: usize,
}

impl Default for BonusThresholds {
    fn default() -> Self {
        Self {
            area_bomb: 5,
            rocket_horizontal: 6,
            rocket_vertical: 7,
            dynamite: 8,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid height.
    pub rows: usize,

    /// Grid width.
    pub cols: usize,

    /// Number of tile colors (1-10).
    pub color_count: u8,

    /// Smallest connected region a click may remove.
    pub min_match: usize,

    /// Bonus upgrade thresholds.
    pub bonus: BonusThresholds,

    /// Points per tile removed by a plain color match.
    pub standard_score_rate: u32,

    /// Points per tile removed by a special tile or the area bomb booster.
    pub chain_score_rate: u32,

    /// Score that wins the session.
    pub target_score: u32,

    /// Starting moves.
    pub initial_moves: u32,

    /// Starting area bomb booster charges.
    pub area_bomb_charges: u32,

    /// Starting swap booster charges.
    pub swap_charges: u32,

    /// Starting reshuffle charges.
    pub reshuffle_charges: u32,

    /// Reshuffles allowed in a single end-condition evaluation.
    pub max_reshuffle_depth: u32,

    /// Seed for board fills, refills and reshuffles.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            color_count: 5,
            min_match: 3,
            bonus: BonusThresholds::default(),
            standard_score_rate: 10,
            chain_score_rate: 20,
            target_score: 1500,
            initial_moves: 30,
            area_bomb_charges: 3,
            swap_charges: 3,
            reshuffle_charges: 3,
            max_reshuffle_depth: 6,
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, color_count: u8) -> Self {
        self.color_count = color_count;
        self
    }

    #[must_use]
    pub fn with_min_match(mut self, min_match: usize) -> Self {
        self.min_match = min_match;
        self
    }

    #[must_use]
    pub fn with_bonus(mut self, bonus: BonusThresholds) -> Self {
        self.bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_score_rates(mut self, standard: u32, chain: u32) -> Self {
        self.standard_score_rate = standard;
        self.chain_score_rate = chain;
        self
    }

    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    #[must_use]
    pub fn with_moves(mut self, moves: u32) -> Self {
        self.initial_moves = moves;
        self
    }

    /// Set the starting area bomb, swap and reshuffle charges.
    #[must_use]
    pub fn with_charges(mut self, area_bomb: u32, swap: u32, reshuffle: u32) -> Self {
        self.area_bomb_charges = area_bomb;
        self.swap_charges = swap;
        self.reshuffle_charges = reshuffle;
        self
    }

    #[must_use]
    pub fn with_max_reshuffle_depth(mut self, depth: u32) -> Self {
        self.max_reshuffle_depth = depth;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidConfig("grid dimensions must be non-zero"));
        }
        if self.color_count == 0 || self.color_count > 10 {
            return Err(EngineError::InvalidConfig("color count must be between 1 and 10"));
        }
        if self.min_match == 0 {
            return Err(EngineError::InvalidConfig("minimum match must be at least 1"));
        }
        if self.max_reshuffle_depth == 0 {
            return Err(EngineError::InvalidConfig("reshuffle depth cap must be at least 1"));
        }
        Ok(())
    }
}
