//! Booster state machine.
//!
//! ```text
//! Idle ──arm(AreaBomb)──▶ AreaBombArmed ──select(p)──▶ Idle  (charge spent, area returned)
//! Idle ──arm(Swap)──────▶ SwapArmed{None} ──select(p)──▶ SwapArmed{Some(p)}
//!                         SwapArmed{Some(p)} ──select(p)──▶ Idle  (cancel, nothing spent)
//!                         SwapArmed{Some(p)} ──select(q)──▶ Idle  (charge spent, tiles swapped)
//! any armed ──cancel──▶ Idle
//! ```
//!
//! Selections are split into `plan_selection` (all checks, no mutation) and
//! `apply` (all mutation), so a rejected selection never leaves a half
//! applied booster behind.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Counter, EngineError, EngineResult, Position, SessionState, SpecialKind};
use crate::effects::SpecialResolver;
use crate::grid::Grid;

/// The two player-invoked boosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoosterKind {
    /// Clears a 3×3 area (chaining through special tiles).
    AreaBomb,
    /// Swaps two tiles.
    Swap,
}

impl BoosterKind {
    /// The session counter this booster spends.
    #[must_use]
    pub const fn counter(self) -> Counter {
        match self {
            BoosterKind::AreaBomb => Counter::AreaBomb,
            BoosterKind::Swap => Counter::Swap,
        }
    }
}

/// Booster interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoosterState {
    #[default]
    Idle,
    AreaBombArmed,
    SwapArmed { first: Option<Position> },
}

impl BoosterState {
    /// The booster currently armed, if any.
    #[must_use]
    pub const fn armed(self) -> Option<BoosterKind> {
        match self {
            BoosterState::Idle => None,
            BoosterState::AreaBombArmed => Some(BoosterKind::AreaBomb),
            BoosterState::SwapArmed { .. } => Some(BoosterKind::Swap),
        }
    }

    /// The held first swap selection, if any.
    #[must_use]
    pub const fn first_selection(self) -> Option<Position> {
        match self {
            BoosterState::SwapArmed { first } => first,
            _ => None,
        }
    }
}

/// What a booster selection does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoosterAction {
    /// Area bomb fired at `target`; `removed` is the chained area.
    AreaBomb { target: Position, removed: Vec<Position> },
    /// First swap selection recorded.
    SelectFirst(Position),
    /// Second selection repeated the first: swap cancelled.
    Cancel(Position),
    /// Tiles at the two positions swapped.
    Swap(Position, Position),
}

/// Tracks which booster is armed and drives its selections.
#[derive(Clone, Debug, Default)]
pub struct BoosterCoordinator {
    state: BoosterState,
}

impl BoosterCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> BoosterState {
        self.state
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state.armed().is_some()
    }

    /// Arm a booster.
    ///
    /// Rejected with `InsufficientCharge` (and no transition) when the
    /// booster has no charges left. Arming while another booster is armed
    /// cancels it first; the released first swap selection, if any, is
    /// returned so the view can unhighlight it.
    pub fn arm(&mut self, kind: BoosterKind, session: &SessionState) -> EngineResult<Option<Position>> {
        session.require(kind.counter())?;
        let released = self.cancel();
        self.state = match kind {
            BoosterKind::AreaBomb => BoosterState::AreaBombArmed,
            BoosterKind::Swap => BoosterState::SwapArmed { first: None },
        };
        debug!("booster armed: {:?}", kind);
        Ok(released)
    }

    /// Return to `Idle`, releasing any held first selection.
    pub fn cancel(&mut self) -> Option<Position> {
        let released = self.state.first_selection();
        if self.is_armed() {
            debug!("booster cancelled from {:?}", self.state);
        }
        self.state = BoosterState::Idle;
        released
    }

    /// Work out what selecting `pos` would do, without changing anything.
    ///
    /// Returns `None` when no booster is armed.
    pub fn plan_selection(
        &self,
        grid: &Grid,
        session: &SessionState,
        pos: Position,
    ) -> EngineResult<Option<BoosterAction>> {
        let action = match self.state {
            BoosterState::Idle => return Ok(None),
            BoosterState::AreaBombArmed => {
                session.require(Counter::AreaBomb)?;
                let removed = SpecialResolver::chain_area(grid, pos, SpecialKind::AreaBomb)?;
                BoosterAction::AreaBomb { target: pos, removed }
            }
            BoosterState::SwapArmed { first: None } => {
                grid.get(pos)?.ok_or(EngineError::EmptyCell(pos))?;
                BoosterAction::SelectFirst(pos)
            }
            BoosterState::SwapArmed { first: Some(first) } if first == pos => BoosterAction::Cancel(pos),
            BoosterState::SwapArmed { first: Some(first) } => {
                session.require(Counter::Swap)?;
                grid.get(pos)?.ok_or(EngineError::EmptyCell(pos))?;
                grid.get(first)?.ok_or(EngineError::EmptyCell(first))?;
                BoosterAction::Swap(first, pos)
            }
        };
        Ok(Some(action))
    }

    /// Commit a planned selection.
    ///
    /// Spends the booster charge (area bomb, swap) and performs the swap;
    /// removing the area bomb's cells is left to the caller.
    pub fn apply(
        &mut self,
        action: &BoosterAction,
        grid: &mut Grid,
        session: &mut SessionState,
    ) -> EngineResult<()> {
        match *action {
            BoosterAction::AreaBomb { target, .. } => {
                session.use_area_bomb()?;
                self.state = BoosterState::Idle;
                debug!("area bomb fired at {}", target);
            }
            BoosterAction::SelectFirst(pos) => {
                self.state = BoosterState::SwapArmed { first: Some(pos) };
                debug!("swap first selection {}", pos);
            }
            BoosterAction::Cancel(pos) => {
                self.state = BoosterState::Idle;
                debug!("swap cancelled at {}", pos);
            }
            BoosterAction::Swap(a, b) => {
                session.require(Counter::Swap)?;
                grid.swap(a, b)?;
                session.use_swap()?;
                self.state = BoosterState::Idle;
                debug!("swapped {} <-> {}", a, b);
            }
        }
        Ok(())
    }

    /// Plan and apply a selection in one step.
    pub fn select(
        &mut self,
        grid: &mut Grid,
        session: &mut SessionState,
        pos: Position,
    ) -> EngineResult<Option<BoosterAction>> {
        let Some(action) = self.plan_selection(grid, session, pos)? else {
            return Ok(None);
        };
        self.apply(&action, grid, session)?;
        Ok(Some(action))
    }
}
