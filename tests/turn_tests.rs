//! Turn-level integration tests driving `Game` through its public API.

use tile_blast::{
    BoosterKind, BoosterState, EngineError, Game, GameConfig, GameEvent, GameStatus, Grid, Position,
    RecordingSink, SpecialKind, TileKind, TurnKind,
};

/// 5×5 board with a vertical run of color 0 at column 2, rows 0-2.
const COLUMN_RUN: &str = "\
    12034\n\
    34012\n\
    12034\n\
    34123\n\
    21341";

/// No two orthogonal neighbors share a color.
const STUCK: &str = "\
    0101\n\
    1010\n\
    0101\n\
    1010";

fn game_on(board: &str, config: GameConfig) -> Game<RecordingSink> {
    let grid: Grid = board.parse().expect("valid board");
    let config = config.with_dimensions(grid.rows(), grid.cols());
    Game::from_grid(config, grid, RecordingSink::new()).expect("valid game")
}

fn sorted(mut positions: Vec<Position>) -> Vec<Position> {
    positions.sort();
    positions
}

// =============================================================================
// Normal Clicks
// =============================================================================

#[test]
fn test_column_run_click() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    let outcome = game.resolve_click(1, 2).unwrap();

    assert_eq!(outcome.kind, TurnKind::Match);
    assert_eq!(
        sorted(outcome.removed.clone()),
        vec![Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)]
    );
    assert_eq!(outcome.score_delta, 30);
    assert!(outcome.move_spent);
    assert_eq!(outcome.bonus, None);
    assert_eq!(outcome.collapse.touched_columns(), vec![2]);
    assert_eq!(outcome.collapse.moved.len(), 2);
    assert_eq!(outcome.collapse.created.len(), 3);
    assert_eq!(outcome.status, GameStatus::Playing);

    assert_eq!(game.session().score(), 30);
    assert_eq!(game.session().moves(), 29);
    assert!(game.grid().is_full());
    // Tiles above the run fell to the bottom
    assert_eq!(game.grid().kind_at(Position::new(0, 2)).unwrap(), Some(TileKind::Color(1)));
    assert_eq!(game.grid().kind_at(Position::new(1, 2)).unwrap(), Some(TileKind::Color(3)));
}

#[test]
fn test_lone_tile_click_is_rejected() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());
    let before = game.grid().clone();

    let result = game.resolve_click(4, 0);

    assert_eq!(result.err(), Some(EngineError::NoLegalMatch { size: 1, min: 3 }));
    assert_eq!(game.grid(), &before);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.session().score(), 0);
}

#[test]
fn test_out_of_bounds_click() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    assert_eq!(
        game.resolve_click(5, 0).err(),
        Some(EngineError::InvalidPosition { row: 5, col: 0 })
    );
    assert!(!game.is_processing());
}

#[test]
fn test_min_match_is_configurable() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default().with_min_match(4));

    assert_eq!(
        game.resolve_click(1, 2).err(),
        Some(EngineError::NoLegalMatch { size: 3, min: 4 })
    );
}

#[test]
fn test_rocket_bonus_from_six_match() {
    let board = "\
        000000\n\
        123412\n\
        234123\n\
        341234";
    let mut game = game_on(board, GameConfig::default());

    let outcome = game.resolve_click(0, 3).unwrap();

    let bonus = outcome.bonus.expect("six-match earns a bonus");
    assert_eq!(bonus.pos, Position::new(0, 3));
    assert_eq!(bonus.kind, SpecialKind::HorizontalClear);
    assert_eq!(outcome.removed.len(), 5);
    assert_eq!(outcome.score_delta, 50);
}

#[test]
fn test_chain_reaction_scores_at_chain_rate() {
    // The horizontal rocket reaches the bomb at (1,3)
    let board = "\
        1234\n\
        H12B\n\
        3412\n\
        1234";
    let mut game = game_on(board, GameConfig::default());

    let outcome = game.resolve_click(1, 0).unwrap();

    assert_eq!(outcome.kind, TurnKind::Special);
    // Row 1 plus the bomb's 3×3 block around (1,3)
    let expected = vec![
        Position::new(0, 2),
        Position::new(0, 3),
        Position::new(1, 0),
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(1, 3),
        Position::new(2, 2),
        Position::new(2, 3),
    ];
    assert_eq!(sorted(outcome.removed.clone()), expected);
    assert_eq!(outcome.score_delta, 8 * 20);
    assert_eq!(game.session().moves(), 29);
    assert!(game.grid().is_full());
}

// =============================================================================
// Boosters
// =============================================================================

#[test]
fn test_area_bomb_booster() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    game.arm_booster(BoosterKind::AreaBomb).unwrap();
    let outcome = game.resolve_click(2, 2).unwrap();

    assert_eq!(outcome.kind, TurnKind::AreaBomb);
    let mut expected = Vec::new();
    for row in 1..=3 {
        for col in 1..=3 {
            expected.push(Position::new(row, col));
        }
    }
    assert_eq!(sorted(outcome.removed.clone()), expected);
    assert!(!outcome.move_spent);
    assert_eq!(outcome.score_delta, 9 * 20);
    assert_eq!(game.session().area_bomb_charges(), 2);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.booster_state(), BoosterState::Idle);
    assert!(game.grid().is_full());
}

#[test]
fn test_area_bomb_at_corner_is_clamped() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    game.arm_booster(BoosterKind::AreaBomb).unwrap();
    let outcome = game.resolve_click(0, 0).unwrap();

    assert_eq!(
        sorted(outcome.removed),
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
    );
}

#[test]
fn test_swap_same_cell_twice_cancels() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());
    let before = game.grid().clone();

    game.arm_booster(BoosterKind::Swap).unwrap();
    game.resolve_click(0, 0).unwrap();
    let outcome = game.resolve_click(0, 0).unwrap();

    assert_eq!(outcome.kind, TurnKind::SwapCancelled);
    assert_eq!(game.booster_state(), BoosterState::Idle);
    assert_eq!(game.session().swap_charges(), 3);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.grid(), &before);
    assert_eq!(
        game.sink().events(),
        &[GameEvent::Highlight(Position::new(0, 0)), GameEvent::Unhighlight(Position::new(0, 0))]
    );
}

#[test]
fn test_swap_exchanges_tiles() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    game.arm_booster(BoosterKind::Swap).unwrap();
    game.resolve_click(0, 0).unwrap();
    let outcome = game.resolve_click(4, 0).unwrap();

    assert_eq!(outcome.swap, Some((Position::new(0, 0), Position::new(4, 0))));
    assert!(outcome.removed.is_empty());
    assert!(outcome.collapse.is_empty());
    assert_eq!(game.grid().kind_at(Position::new(0, 0)).unwrap(), Some(TileKind::Color(2)));
    assert_eq!(game.grid().kind_at(Position::new(4, 0)).unwrap(), Some(TileKind::Color(1)));
    assert_eq!(game.session().swap_charges(), 2);
    assert_eq!(game.session().moves(), 29);
}

#[test]
fn test_arming_without_charge_is_rejected() {
    let config = GameConfig::default().with_charges(0, 0, 3);
    let mut game = game_on(COLUMN_RUN, config);

    assert!(game.arm_booster(BoosterKind::AreaBomb).is_err());
    assert!(game.arm_booster(BoosterKind::Swap).is_err());
    assert_eq!(game.booster_state(), BoosterState::Idle);
}

#[test]
fn test_switching_booster_releases_highlight() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    game.arm_booster(BoosterKind::Swap).unwrap();
    game.resolve_click(3, 3).unwrap();
    game.arm_booster(BoosterKind::AreaBomb).unwrap();

    assert_eq!(game.booster_state(), BoosterState::AreaBombArmed);
    assert_eq!(
        game.sink().events(),
        &[GameEvent::Highlight(Position::new(3, 3)), GameEvent::Unhighlight(Position::new(3, 3))]
    );
}

// =============================================================================
// End Conditions
// =============================================================================

#[test]
fn test_stuck_board_without_charges_is_lost() {
    let config = GameConfig::default().with_charges(0, 3, 0);
    let mut game = game_on(STUCK, config);

    let reshuffles = game.reevaluate().unwrap();

    assert!(reshuffles.is_empty());
    assert_eq!(game.session().status(), GameStatus::Lost);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.sink().events(), &[GameEvent::GameOver(GameStatus::Lost)]);
}

#[test]
fn test_stuck_board_with_area_bomb_keeps_playing() {
    let config = GameConfig::default().with_charges(1, 0, 0);
    let mut game = game_on(STUCK, config);

    assert!(game.reevaluate().unwrap().is_empty());
    assert_eq!(game.session().status(), GameStatus::Playing);
}

#[test]
fn test_reshuffle_is_bounded() {
    // Two distinct tiles can never form a pair
    let config = GameConfig::default().with_charges(0, 0, 10).with_max_reshuffle_depth(4);
    let mut game = game_on("01", config);

    let reshuffles = game.reevaluate().unwrap();

    assert_eq!(reshuffles.len(), 4);
    assert_eq!(game.session().reshuffle_charges(), 6);
    assert_eq!(game.session().status(), GameStatus::Playing);
    assert_eq!(game.grid().tile_count(), 2);
}

#[test]
fn test_reshuffle_exhausts_into_loss() {
    let config = GameConfig::default().with_charges(0, 0, 2);
    let mut game = game_on("01", config);

    let reshuffles = game.reevaluate().unwrap();

    assert_eq!(reshuffles.len(), 2);
    assert_eq!(game.session().reshuffle_charges(), 0);
    assert_eq!(game.session().status(), GameStatus::Lost);
}

#[test]
fn test_last_move_loses() {
    let config = GameConfig::default().with_moves(1);
    let mut game = game_on(COLUMN_RUN, config);

    let outcome = game.resolve_click(1, 2).unwrap();

    assert_eq!(outcome.status, GameStatus::Lost);
    assert_eq!(game.session().moves(), 0);
    assert_eq!(
        game.resolve_click(0, 0).err(),
        Some(EngineError::GameFinished(GameStatus::Lost))
    );
    assert_eq!(
        game.arm_booster(BoosterKind::AreaBomb).err(),
        Some(EngineError::GameFinished(GameStatus::Lost))
    );
}

#[test]
fn test_win_beats_last_move() {
    let config = GameConfig::default().with_moves(1).with_target_score(30);
    let mut game = game_on(COLUMN_RUN, config);

    let outcome = game.resolve_click(1, 2).unwrap();

    assert_eq!(outcome.status, GameStatus::Won);
    assert_eq!(game.sink().events(), &[GameEvent::GameOver(GameStatus::Won)]);
}

// =============================================================================
// Processing Guard
// =============================================================================

#[test]
fn test_pending_turn_is_exclusive() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    let pending = game.begin_click(1, 2).unwrap();
    assert_eq!(pending.kind(), TurnKind::Match);
    assert_eq!(pending.removed().len(), 3);

    assert_eq!(game.begin_click(1, 2).err(), Some(EngineError::AlreadyProcessing));
    assert_eq!(game.grid().tile_count(), 25);
    assert_eq!(game.session().moves(), 30);

    game.commit(pending).unwrap();
    assert!(!game.is_processing());
    assert_eq!(game.session().moves(), 29);
}

#[test]
fn test_committing_twice_is_impossible() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    let first = game.begin_click(1, 2).unwrap();
    game.commit(first).unwrap();

    // A fresh plan is needed for the next turn
    assert!(!game.is_processing());
    let mut other = game_on(COLUMN_RUN, GameConfig::default());
    let foreign = other.begin_click(1, 2).unwrap();
    assert_eq!(game.commit(foreign).err(), Some(EngineError::StaleTurn));
}

#[test]
fn test_turn_planned_on_other_board_is_rejected() {
    let mut small = game_on(COLUMN_RUN, GameConfig::default());
    let mut large = game_on(
        "\
        012340\n\
        123401\n\
        234012\n\
        340123\n\
        401234\n\
        012000",
        GameConfig::default(),
    );

    let own = small.begin_click(1, 2).unwrap();
    let foreign = large.begin_click(5, 5).unwrap();
    small.abandon(own).unwrap();
    let own = small.begin_click(1, 2).unwrap();

    assert_eq!(small.commit(foreign).err(), Some(EngineError::StaleTurn));
    assert_eq!(small.session().moves(), 30);
    assert_eq!(small.session().score(), 0);
    assert_eq!(small.grid().tile_count(), 25);

    small.commit(own).unwrap();
    assert_eq!(small.session().moves(), 29);
    assert_eq!(small.session().score(), 30);
}

#[test]
fn test_dropped_turn_is_recoverable() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());

    let pending = game.begin_click(1, 2).unwrap();
    drop(pending);
    assert_eq!(game.resolve_click(1, 2).err(), Some(EngineError::AlreadyProcessing));
    assert_eq!(game.arm_booster(BoosterKind::AreaBomb).err(), Some(EngineError::AlreadyProcessing));

    game.restart().unwrap();

    assert!(!game.is_processing());
    assert_eq!(game.session().moves(), 30);
    assert!(game.arm_booster(BoosterKind::AreaBomb).is_ok());
}

#[test]
fn test_abandoned_turn_changes_nothing() {
    let mut game = game_on(COLUMN_RUN, GameConfig::default());
    let before = game.grid().clone();

    let pending = game.begin_click(1, 2).unwrap();
    game.abandon(pending).unwrap();

    assert!(!game.is_processing());
    assert_eq!(game.grid(), &before);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.resolve_click(1, 2).unwrap().score_delta, 30);
}

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_restart_after_loss() {
    let config = GameConfig::default().with_charges(0, 3, 0);
    let mut game = game_on(STUCK, config);
    game.reevaluate().unwrap();
    assert_eq!(game.session().status(), GameStatus::Lost);

    game.restart().unwrap();

    assert_eq!(game.session().status(), GameStatus::Playing);
    assert_eq!(game.session().moves(), 30);
    assert_eq!(game.session().score(), 0);
    assert!(game.grid().is_full());
    assert_eq!(game.booster_state(), BoosterState::Idle);
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_seed(2024);
    let mut a = Game::new(config.clone()).unwrap();
    let mut b = Game::new(config).unwrap();
    assert_eq!(a.grid(), b.grid());

    for cell in 0..81 {
        let (row, col) = (cell / 9, cell % 9);
        let ra = a.resolve_click(row, col);
        let rb = b.resolve_click(row, col);
        assert_eq!(ra, rb);
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.session(), b.session());
}
