//! The orchestrator and its turn types.
//!
//! - `Game`: owns grid, session and boosters; sequences turns
//! - `PendingTurn` / `TurnOutcome`: a planned turn and what committing it did
//! - `EventSink`: one-way notifications for the view

mod engine;
mod events;
mod turn;

pub use engine::Game;
pub use events::{EventSink, GameEvent, NullSink, RecordingSink};
pub use turn::{BonusTile, PendingTurn, TurnKind, TurnOutcome};
