//! Session state: score, moves, booster charges and game status.
//!
//! ## Counters
//!
//! Moves and the three charge counters only ever decrease, one unit per
//! action, and never below zero: spending an exhausted counter is rejected
//! with `InsufficientCharge` and changes nothing.
//!
//! ## Status
//!
//! `Playing` is the only non-terminal status. Once a session is `Won` or
//! `Lost` the status is fixed; score and counters may still be mutated but
//! the orchestrator stops accepting turns.

use log::info;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::error::{EngineError, EngineResult};

/// Game status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Check if the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// A spendable session counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Counter {
    Moves,
    AreaBomb,
    Swap,
    Reshuffle,
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Counter::Moves => "moves",
            Counter::AreaBomb => "area bomb charges",
            Counter::Swap => "swap charges",
            Counter::Reshuffle => "reshuffle charges",
        };
        f.write_str(name)
    }
}

/// Per-session score, counters and status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    score: u32,
    moves: u32,
    area_bomb_charges: u32,
    swap_charges: u32,
    reshuffle_charges: u32,
    status: GameStatus,
}

impl SessionState {
    /// Create a new session with explicit starting counters.
    #[must_use]
    pub fn new(moves: u32, area_bomb_charges: u32, swap_charges: u32, reshuffle_charges: u32) -> Self {
        Self {
            score: 0,
            moves,
            area_bomb_charges,
            swap_charges,
            reshuffle_charges,
            status: GameStatus::Playing,
        }
    }

    /// Create a session with the starting counters from a config.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.initial_moves,
            config.area_bomb_charges,
            config.swap_charges,
            config.reshuffle_charges,
        )
    }

    // === Accessors ===

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn area_bomb_charges(&self) -> u32 {
        self.area_bomb_charges
    }

    #[must_use]
    pub fn swap_charges(&self) -> u32 {
        self.swap_charges
    }

    #[must_use]
    pub fn reshuffle_charges(&self) -> u32 {
        self.reshuffle_charges
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Remaining units of a counter.
    #[must_use]
    pub fn remaining(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Moves => self.moves,
            Counter::AreaBomb => self.area_bomb_charges,
            Counter::Swap => self.swap_charges,
            Counter::Reshuffle => self.reshuffle_charges,
        }
    }

    /// Reject if a counter is exhausted, without spending it.
    pub fn require(&self, counter: Counter) -> EngineResult<()> {
        if self.remaining(counter) == 0 {
            Err(EngineError::InsufficientCharge(counter))
        } else {
            Ok(())
        }
    }

    // === Mutators ===

    /// Add points. Score saturates rather than wrapping.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn use_move(&mut self) -> EngineResult<()> {
        self.spend(Counter::Moves)
    }

    pub fn use_area_bomb(&mut self) -> EngineResult<()> {
        self.spend(Counter::AreaBomb)
    }

    pub fn use_swap(&mut self) -> EngineResult<()> {
        self.spend(Counter::Swap)
    }

    pub fn use_reshuffle(&mut self) -> EngineResult<()> {
        self.spend(Counter::Reshuffle)
    }

    /// Move out of `Playing`. Ignored once the status is terminal.
    pub fn set_status(&mut self, status: GameStatus) {
        if self.status.is_terminal() || status == self.status {
            return;
        }
        info!("session status {:?} -> {:?} (score {})", self.status, status, self.score);
        self.status = status;
    }

    fn spend(&mut self, counter: Counter) -> EngineResult<()> {
        let slot = match counter {
            Counter::Moves => &mut self.moves,
            Counter::AreaBomb => &mut self.area_bomb_charges,
            Counter::Swap => &mut self.swap_charges,
            Counter::Reshuffle => &mut self.reshuffle_charges,
        };
        *slot = slot
            .checked_sub(1)
            .ok_or(EngineError::InsufficientCharge(counter))?;
        Ok(())
    }
}
