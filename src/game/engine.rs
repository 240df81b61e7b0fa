//! The orchestrator: sequences turns over one grid and one session.
//!
//! ## Turn Flow
//!
//! 1. `begin_click` validates the click and plans the whole turn without
//!    touching grid or session. The game enters its processing state.
//! 2. `commit` applies the plan: spend, score, upgrade, remove, collapse,
//!    then re-evaluate end conditions. The processing state is cleared.
//!
//! `resolve_click` does both. While a turn is pending, every other input is
//! rejected with `AlreadyProcessing`. The plan itself stays inside the game;
//! the `PendingTurn` handed out is a view plus a ticket. Tickets are unique
//! across every `Game` in the process, so a handle from another game is
//! `StaleTurn`. A pending turn can be dropped with `abandon`, and `restart`
//! discards it along with the rest of the session.
//!
//! ## End Conditions
//!
//! Checked after every collapse or swap, in order: target score reached
//! (Won), no moves left (Lost), no playable option. A board with no
//! possible match and no area bomb charge is reshuffled while reshuffle
//! charges remain, at most `max_reshuffle_depth` times per evaluation;
//! with no reshuffle charge left the session is Lost.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use super::events::{EventSink, GameEvent, NullSink};
use super::turn::{BonusTile, PendingTurn, TurnKind, TurnOutcome, TurnPlan};
use crate::boosters::{BoosterAction, BoosterCoordinator, BoosterKind, BoosterState};
use crate::core::{
    Counter, EngineError, EngineResult, GameConfig, GameRng, GameStatus, Position, SessionState, TileKind,
};
use crate::effects::SpecialResolver;
use crate::grid::{CollapseResult, Grid};
use crate::matching::MatchResolver;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

fn next_ticket() -> u64 {
    NEXT_TICKET.fetch_add(1, Ordering::Relaxed)
}

/// The planned turn held while the guard is raised.
struct InFlight {
    ticket: u64,
    plan: TurnPlan,
}

/// One game session: grid, session state, boosters, RNG and event sink.
pub struct Game<S: EventSink = NullSink> {
    config: GameConfig,
    grid: Grid,
    session: SessionState,
    boosters: BoosterCoordinator,
    rng: GameRng,
    sink: S,
    in_flight: Option<InFlight>,
}

impl Game<NullSink> {
    /// Start a session with a random board and no event sink.
    pub fn new(config: GameConfig) -> EngineResult<Self> {
        Self::with_sink(config, NullSink)
    }
}

impl<S: EventSink> Game<S> {
    /// Start a session with a random board seeded from `config.seed`.
    pub fn with_sink(config: GameConfig, sink: S) -> EngineResult<Self> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let grid = Grid::random(config.rows, config.cols, config.color_count, &mut rng);
        Ok(Self::assemble(config, grid, rng, sink))
    }

    /// Start a session on a prepared board.
    ///
    /// The board must match the configured dimensions, be full, and only use
    /// colors below `config.color_count`.
    pub fn from_grid(config: GameConfig, grid: Grid, sink: S) -> EngineResult<Self> {
        config.validate()?;
        if grid.rows() != config.rows || grid.cols() != config.cols {
            return Err(EngineError::InvalidConfig("grid dimensions do not match configuration"));
        }
        if !grid.is_full() {
            return Err(EngineError::InvalidLayout("starting board has empty cells".to_string()));
        }
        if let Some(tile) = grid
            .tiles()
            .find(|t| t.kind.color().is_some_and(|c| c >= config.color_count))
        {
            return Err(EngineError::InvalidLayout(format!(
                "color {} at {} is outside the {} configured colors",
                tile.kind.symbol(),
                tile.pos,
                config.color_count
            )));
        }
        let rng = GameRng::new(config.seed);
        Ok(Self::assemble(config, grid, rng, sink))
    }

    fn assemble(config: GameConfig, grid: Grid, rng: GameRng, sink: S) -> Self {
        info!(
            "new session: {}x{} board, {} colors, target {}, {} moves",
            config.rows, config.cols, config.color_count, config.target_score, config.initial_moves
        );
        Self {
            session: SessionState::from_config(&config),
            boosters: BoosterCoordinator::new(),
            config,
            grid,
            rng,
            sink,
            in_flight: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn booster_state(&self) -> BoosterState {
        self.boosters.state()
    }

    /// Check if a turn is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // === Boosters ===

    /// Arm a booster, cancelling any other armed booster first.
    pub fn arm_booster(&mut self, kind: BoosterKind) -> EngineResult<()> {
        self.accept_input()?;
        if let Some(released) = self.boosters.arm(kind, &self.session)? {
            self.sink.notify(GameEvent::Unhighlight(released));
        }
        Ok(())
    }

    /// Cancel the armed booster, if any.
    pub fn cancel_booster(&mut self) -> EngineResult<()> {
        self.accept_input()?;
        if let Some(released) = self.boosters.cancel() {
            self.sink.notify(GameEvent::Unhighlight(released));
        }
        Ok(())
    }

    /// Arm `kind`, or cancel it if it is already armed.
    pub fn toggle_booster(&mut self, kind: BoosterKind) -> EngineResult<BoosterState> {
        if self.boosters.state().armed() == Some(kind) {
            self.cancel_booster()?;
        } else {
            self.arm_booster(kind)?;
        }
        Ok(self.boosters.state())
    }

    // === Turns ===

    /// Plan a click and raise the processing guard.
    ///
    /// Nothing in grid, session or boosters changes until `commit`.
    pub fn begin_click(&mut self, row: usize, col: usize) -> EngineResult<PendingTurn> {
        self.accept_input()?;
        let plan = self.plan(Position::new(row, col))?;

        let ticket = next_ticket();
        self.in_flight = Some(InFlight { ticket, plan: plan.clone() });
        debug!("turn {} planned at ({}, {})", ticket, row, col);
        Ok(PendingTurn { ticket, plan })
    }

    /// Apply the planned turn and clear the processing guard.
    ///
    /// The plan is re-checked against the current grid and session first;
    /// a rejected commit changes nothing except lowering the guard.
    pub fn commit(&mut self, pending: PendingTurn) -> EngineResult<TurnOutcome> {
        let plan = self.take_in_flight(&pending)?;
        self.check_plan(&plan)?;

        let outcome = self.apply(plan)?;
        info!(
            "{:?}: removed {}, +{} points, score {}, moves {}, status {:?}",
            outcome.kind,
            outcome.removed.len(),
            outcome.score_delta,
            self.session.score(),
            self.session.moves(),
            outcome.status
        );
        Ok(outcome)
    }

    /// Drop a planned turn without applying it and clear the processing guard.
    pub fn abandon(&mut self, pending: PendingTurn) -> EngineResult<()> {
        self.take_in_flight(&pending)?;
        debug!("turn {} abandoned", pending.ticket);
        Ok(())
    }

    fn take_in_flight(&mut self, pending: &PendingTurn) -> EngineResult<TurnPlan> {
        match self.in_flight.take() {
            Some(flight) if flight.ticket == pending.ticket => Ok(flight.plan),
            other => {
                self.in_flight = other;
                Err(EngineError::StaleTurn)
            }
        }
    }

    /// Plan and commit a click in one step.
    pub fn resolve_click(&mut self, row: usize, col: usize) -> EngineResult<TurnOutcome> {
        let pending = self.begin_click(row, col)?;
        self.commit(pending)
    }

    /// Run the end-condition evaluation outside a turn.
    ///
    /// Returns the prior positions of any recovery reshuffles.
    pub fn reevaluate(&mut self) -> EngineResult<Vec<Vec<Position>>> {
        self.accept_input()?;
        Ok(self.finish_turn())
    }

    /// Discard the session and start a new one from the same config.
    ///
    /// The new board comes from a forked RNG stream, so restarts are
    /// reproducible. Allowed after the game has ended; a pending turn is
    /// discarded and an armed booster is cancelled.
    pub fn restart(&mut self) -> EngineResult<()> {
        if let Some(flight) = self.in_flight.take() {
            debug!("turn {} discarded by restart", flight.ticket);
        }
        if let Some(released) = self.boosters.cancel() {
            self.sink.notify(GameEvent::Unhighlight(released));
        }
        self.rng = self.rng.fork();
        self.grid = Grid::random(self.config.rows, self.config.cols, self.config.color_count, &mut self.rng);
        self.session = SessionState::from_config(&self.config);
        self.boosters = BoosterCoordinator::new();
        info!("session restarted (seed {})", self.rng.seed());
        Ok(())
    }

    fn accept_input(&self) -> EngineResult<()> {
        if self.in_flight.is_some() {
            return Err(EngineError::AlreadyProcessing);
        }
        let status = self.session.status();
        if status.is_terminal() {
            return Err(EngineError::GameFinished(status));
        }
        Ok(())
    }

    fn plan(&self, pos: Position) -> EngineResult<TurnPlan> {
        if let Some(action) = self.boosters.plan_selection(&self.grid, &self.session, pos)? {
            if matches!(action, BoosterAction::Swap(..)) {
                self.session.require(Counter::Moves)?;
            }
            return Ok(TurnPlan::Booster(action));
        }

        match self.grid.kind_at(pos)? {
            None => Err(EngineError::EmptyCell(pos)),
            Some(TileKind::Special(kind)) => {
                self.session.require(Counter::Moves)?;
                let removed = SpecialResolver::chain_area(&self.grid, pos, kind)?;
                Ok(TurnPlan::Special { removed })
            }
            Some(TileKind::Color(_)) => {
                let region = MatchResolver::find_match(&self.grid, pos)?;
                if region.len() < self.config.min_match {
                    return Err(EngineError::NoLegalMatch {
                        size: region.len(),
                        min: self.config.min_match,
                    });
                }
                self.session.require(Counter::Moves)?;

                let bonus = MatchResolver::bonus_for(region.len(), &self.config.bonus)
                    .map(|kind| BonusTile { pos, kind });
                let removed = match bonus {
                    Some(_) => region.into_iter().filter(|&p| p != pos).collect(),
                    None => region,
                };
                Ok(TurnPlan::Match { removed, bonus })
            }
        }
    }

    /// Everything `apply` can fail on, checked before anything is mutated.
    fn check_plan(&self, plan: &TurnPlan) -> EngineResult<()> {
        let in_bounds = |cells: &[Position]| -> EngineResult<()> {
            match cells.iter().find(|p| !self.grid.contains(**p)) {
                Some(bad) => Err(EngineError::out_of_bounds(*bad)),
                None => Ok(()),
            }
        };
        let occupied = |pos: Position| -> EngineResult<()> {
            self.grid.get(pos)?.map(|_| ()).ok_or(EngineError::EmptyCell(pos))
        };

        match plan {
            TurnPlan::Match { removed, bonus } => {
                self.session.require(Counter::Moves)?;
                if let Some(b) = bonus {
                    occupied(b.pos)?;
                }
                in_bounds(removed)
            }
            TurnPlan::Special { removed } => {
                self.session.require(Counter::Moves)?;
                in_bounds(removed)
            }
            TurnPlan::Booster(BoosterAction::AreaBomb { removed, .. }) => {
                self.session.require(Counter::AreaBomb)?;
                in_bounds(removed)
            }
            TurnPlan::Booster(BoosterAction::Swap(a, b)) => {
                self.session.require(Counter::Moves)?;
                self.session.require(Counter::Swap)?;
                occupied(*a)?;
                occupied(*b)
            }
            TurnPlan::Booster(BoosterAction::SelectFirst(pos) | BoosterAction::Cancel(pos)) => occupied(*pos),
        }
    }

    fn apply(&mut self, plan: TurnPlan) -> EngineResult<TurnOutcome> {
        let status = self.session.status();
        let outcome = match plan {
            TurnPlan::Match { removed, bonus } => {
                self.session.use_move()?;
                if let Some(b) = bonus {
                    self.grid.set_kind(b.pos, b.kind.into())?;
                    debug!("bonus {:?} created at {}", b.kind, b.pos);
                }
                let mut outcome = TurnOutcome::new(TurnKind::Match, status);
                outcome.move_spent = true;
                outcome.bonus = bonus;
                self.clear_cells(removed, self.config.standard_score_rate, outcome)?
            }
            TurnPlan::Special { removed } => {
                self.session.use_move()?;
                let mut outcome = TurnOutcome::new(TurnKind::Special, status);
                outcome.move_spent = true;
                self.clear_cells(removed, self.config.chain_score_rate, outcome)?
            }
            TurnPlan::Booster(action) => {
                self.boosters.apply(&action, &mut self.grid, &mut self.session)?;
                match action {
                    BoosterAction::AreaBomb { removed, .. } => {
                        let outcome = TurnOutcome::new(TurnKind::AreaBomb, status);
                        self.clear_cells(removed, self.config.chain_score_rate, outcome)?
                    }
                    BoosterAction::SelectFirst(pos) => {
                        self.sink.notify(GameEvent::Highlight(pos));
                        return Ok(TurnOutcome::new(TurnKind::SwapFirstPick, status));
                    }
                    BoosterAction::Cancel(pos) => {
                        self.sink.notify(GameEvent::Unhighlight(pos));
                        return Ok(TurnOutcome::new(TurnKind::SwapCancelled, status));
                    }
                    BoosterAction::Swap(a, b) => {
                        self.session.use_move()?;
                        self.sink.notify(GameEvent::Unhighlight(a));
                        let mut outcome = TurnOutcome::new(TurnKind::Swap, status);
                        outcome.move_spent = true;
                        outcome.swap = Some((a, b));
                        outcome
                    }
                }
            }
        };
        Ok(self.close_turn(outcome))
    }

    /// Deduplicate, score, remove and collapse.
    fn clear_cells(
        &mut self,
        cells: Vec<Position>,
        rate: u32,
        mut outcome: TurnOutcome,
    ) -> EngineResult<TurnOutcome> {
        let mut seen = FxHashSet::default();
        let unique: Vec<Position> = cells.into_iter().filter(|p| seen.insert(*p)).collect();

        self.grid.remove_all(&unique)?;
        let score_delta = u32::try_from(unique.len()).unwrap_or(u32::MAX).saturating_mul(rate);
        self.session.add_score(score_delta);
        let collapse: CollapseResult = self.grid.collapse(self.config.color_count, &mut self.rng);

        outcome.removed = unique;
        outcome.score_delta = score_delta;
        outcome.collapse = collapse;
        Ok(outcome)
    }

    fn close_turn(&mut self, mut outcome: TurnOutcome) -> TurnOutcome {
        outcome.reshuffles = self.finish_turn();
        outcome.status = self.session.status();
        outcome
    }

    /// Evaluate end conditions and announce a session end.
    fn finish_turn(&mut self) -> Vec<Vec<Position>> {
        let before = self.session.status();
        let reshuffles = self.evaluate_end_conditions();
        let after = self.session.status();
        if after != before && after.is_terminal() {
            if let Some(released) = self.boosters.cancel() {
                self.sink.notify(GameEvent::Unhighlight(released));
            }
            self.sink.notify(GameEvent::GameOver(after));
        }
        reshuffles
    }

    fn evaluate_end_conditions(&mut self) -> Vec<Vec<Position>> {
        let mut reshuffles = Vec::new();
        loop {
            if self.session.score() >= self.config.target_score {
                self.session.set_status(GameStatus::Won);
                break;
            }
            if self.session.moves() == 0 {
                self.session.set_status(GameStatus::Lost);
                break;
            }
            if MatchResolver::has_possible_matches(&self.grid) || self.session.area_bomb_charges() > 0 {
                break;
            }
            if reshuffles.len() >= self.config.max_reshuffle_depth as usize {
                warn!("board still stuck after {} reshuffles", reshuffles.len());
                break;
            }
            if self.session.use_reshuffle().is_err() {
                self.session.set_status(GameStatus::Lost);
                break;
            }
            reshuffles.push(self.grid.reshuffle(&mut self.rng));
            info!(
                "no moves available, reshuffled ({} reshuffles left)",
                self.session.reshuffle_charges()
            );
            debug!("board after reshuffle:\n{}", self.grid);
        }
        reshuffles
    }
}
