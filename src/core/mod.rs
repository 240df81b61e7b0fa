//! Core engine types: positions, tiles, session state, RNG, configuration,
//! errors.
//!
//! Everything else in the crate is built from these leaf types.

pub mod position;
pub mod tile;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use position::Position;
pub use tile::{SpecialKind, Tile, TileKind};
pub use rng::GameRng;
pub use config::{BonusThresholds, GameConfig};
pub use error::{EngineError, EngineResult};
pub use state::{Counter, GameStatus, SessionState};
