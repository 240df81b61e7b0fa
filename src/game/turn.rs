//! Turn plans and turn outcomes.
//!
//! A turn is computed as an immutable `PendingTurn` and only then committed.
//! Between the two, the driver may read the plan (e.g. to animate the
//! removal) while the game rejects any other input.

use serde::{Deserialize, Serialize};

use crate::boosters::BoosterAction;
use crate::core::{GameStatus, Position, SpecialKind};
use crate::grid::CollapseResult;

/// What kind of turn was played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnKind {
    /// A color region was removed.
    Match,
    /// A special tile was clicked and fired.
    Special,
    /// The area bomb booster was fired.
    AreaBomb,
    /// First swap selection recorded.
    SwapFirstPick,
    /// Swap cancelled by re-selecting the first cell.
    SwapCancelled,
    /// Two tiles were swapped.
    Swap,
}

/// A special tile created in place by a large match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTile {
    pub pos: Position,
    pub kind: SpecialKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum TurnPlan {
    Match { removed: Vec<Position>, bonus: Option<BonusTile> },
    Special { removed: Vec<Position> },
    Booster(BoosterAction),
}

/// A read-only view of the turn awaiting `Game::commit`.
///
/// The game keeps its own copy of the plan and matches only the ticket.
/// Pass it to `Game::abandon` to drop the turn unapplied.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending turn blocks input until it is committed"]
pub struct PendingTurn {
    pub(super) ticket: u64,
    pub(super) plan: TurnPlan,
}

impl PendingTurn {
    #[must_use]
    pub fn kind(&self) -> TurnKind {
        match &self.plan {
            TurnPlan::Match { .. } => TurnKind::Match,
            TurnPlan::Special { .. } => TurnKind::Special,
            TurnPlan::Booster(BoosterAction::AreaBomb { .. }) => TurnKind::AreaBomb,
            TurnPlan::Booster(BoosterAction::SelectFirst(_)) => TurnKind::SwapFirstPick,
            TurnPlan::Booster(BoosterAction::Cancel(_)) => TurnKind::SwapCancelled,
            TurnPlan::Booster(BoosterAction::Swap(..)) => TurnKind::Swap,
        }
    }

    /// Cells the turn will remove (before central deduplication).
    #[must_use]
    pub fn removed(&self) -> &[Position] {
        match &self.plan {
            TurnPlan::Match { removed, .. }
            | TurnPlan::Special { removed }
            | TurnPlan::Booster(BoosterAction::AreaBomb { removed, .. }) => removed.as_slice(),
            TurnPlan::Booster(_) => &[],
        }
    }

    /// Special tile the turn will create, if any.
    #[must_use]
    pub fn bonus(&self) -> Option<BonusTile> {
        match &self.plan {
            TurnPlan::Match { bonus, .. } => *bonus,
            _ => None,
        }
    }

    /// Cells the turn will swap, if any.
    #[must_use]
    pub fn swap(&self) -> Option<(Position, Position)> {
        match &self.plan {
            TurnPlan::Booster(BoosterAction::Swap(a, b)) => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Everything a committed turn did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub kind: TurnKind,
    /// Unique removed positions.
    pub removed: Vec<Position>,
    pub score_delta: u32,
    pub move_spent: bool,
    pub bonus: Option<BonusTile>,
    pub swap: Option<(Position, Position)>,
    pub collapse: CollapseResult,
    /// Prior positions returned by each recovery reshuffle, in order.
    pub reshuffles: Vec<Vec<Position>>,
    /// Status after end conditions were evaluated.
    pub status: GameStatus,
}

impl TurnOutcome {
    pub(super) fn new(kind: TurnKind, status: GameStatus) -> Self {
        Self {
            kind,
            removed: Vec::new(),
            score_delta: 0,
            move_spent: false,
            bonus: None,
            swap: None,
            collapse: CollapseResult::default(),
            reshuffles: Vec::new(),
            status,
        }
    }
}
