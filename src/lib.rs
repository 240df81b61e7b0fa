//! # tile-blast
//!
//! Rules engine for a click-to-clear tile puzzle.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering and no input handling. A driver feeds
//!    clicks and reads back `TurnOutcome`s and `GameEvent`s.
//!
//! 2. **Deterministic**: Every random draw goes through one seeded
//!    `GameRng`. The same config and the same clicks give the same game.
//!
//! 3. **Plan, Then Commit**: A turn is computed in full before anything
//!    changes. Rejected input leaves grid and session untouched.
//!
//! ## Board Layout
//!
//! Row 0 is the bottom row. Gravity pulls tiles toward row 0 and refills
//! enter from the top.
//!
//! ## Modules
//!
//! - `core`: Positions, tiles, session state, RNG, configuration, errors
//! - `grid`: The board, gravity collapse and text notation
//! - `matching`: Connected-region flood fill and stuck-board detection
//! - `effects`: Special tile areas and chain reactions
//! - `boosters`: Area bomb and swap booster state machine
//! - `game`: The turn orchestrator and view events
//!
//! ## Example
//!
//! ```
//! use tile_blast::{Game, GameConfig, GameStatus};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(3)).unwrap();
//! assert_eq!(game.session().status(), GameStatus::Playing);
//!
//! // Accepted or rejected, the click is fully resolved on return
//! let _ = game.resolve_click(0, 0);
//! assert!(!game.is_processing());
//! ```

pub mod core;
pub mod grid;
pub mod matching;
pub mod effects;
pub mod boosters;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Position, SpecialKind, Tile, TileKind,
    GameRng,
    BonusThresholds, GameConfig,
    EngineError, EngineResult,
    Counter, GameStatus, SessionState,
};

pub use crate::grid::{Grid, CollapseResult, CreatedTile, MovedTile};

pub use crate::matching::MatchResolver;

pub use crate::effects::{area, SpecialResolver};

pub use crate::boosters::{BoosterAction, BoosterCoordinator, BoosterKind, BoosterState};

pub use crate::game::{
    Game, PendingTurn, TurnKind, TurnOutcome, BonusTile,
    EventSink, GameEvent, NullSink, RecordingSink,
};
