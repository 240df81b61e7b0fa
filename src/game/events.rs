//! One-way notifications to the view layer.
//!
//! The engine never calls back into game logic through these; a sink only
//! receives. Inject one at `Game` construction; tests use `RecordingSink`.

use serde::{Deserialize, Serialize};

use crate::core::{GameStatus, Position};

/// Something the view may want to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cell was picked as the first swap selection.
    Highlight(Position),
    /// A previously highlighted cell was released.
    Unhighlight(Position),
    /// The session ended.
    GameOver(GameStatus),
}

/// Receiver of `GameEvent`s.
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: GameEvent) {}
}

/// Keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
