use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_blast::{Game, GameConfig, GameRng, Grid, MatchResolver, Position, SpecialKind, SpecialResolver};

fn bench_find_match(c: &mut Criterion) {
    let mut rng = GameRng::new(12345);
    let grid = Grid::random(9, 9, 2, &mut rng);

    c.bench_function("find_match_2_colors", |b| {
        b.iter(|| MatchResolver::find_match(black_box(&grid), Position::new(4, 4)))
    });
}

fn bench_possible_matches(c: &mut Criterion) {
    let mut rng = GameRng::new(12345);
    let grid = Grid::random(9, 9, 5, &mut rng);

    c.bench_function("has_possible_matches", |b| {
        b.iter(|| MatchResolver::has_possible_matches(black_box(&grid)))
    });
}

fn bench_chain(c: &mut Criterion) {
    // Rockets on every row and column of the diagonal
    let grid: Grid = "\
        H1234012\n\
        1V340123\n\
        12H40123\n\
        123V0123\n\
        1234H123\n\
        12340V23\n\
        123401H3\n\
        1234012V"
        .parse()
        .unwrap_or_else(|_| Grid::empty(8, 8));

    c.bench_function("chain_rockets_8x8", |b| {
        b.iter(|| SpecialResolver::chain_area(black_box(&grid), Position::new(0, 0), SpecialKind::HorizontalClear))
    });
}

fn bench_collapse(c: &mut Criterion) {
    let mut rng = GameRng::new(12345);
    let full = Grid::random(9, 9, 5, &mut rng);
    let cleared: Vec<Position> = (0..9).map(|col| Position::new(4, col)).collect();

    c.bench_function("collapse_one_row", |b| {
        b.iter(|| {
            let mut grid = full.clone();
            let _ = grid.remove_all(&cleared);
            grid.collapse(5, &mut rng)
        })
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("play_until_done", |b| {
        b.iter(|| {
            let config = GameConfig::default().with_seed(black_box(7));
            let Ok(mut game) = Game::new(config) else { return };
            let (rows, cols) = (game.config().rows, game.config().cols);
            let mut cell = 0;
            while !game.session().status().is_terminal() && cell < rows * cols * 4 {
                let _ = game.resolve_click((cell / cols) % rows, cell % cols);
                cell += 1;
            }
        })
    });
}

criterion_group!(
    benches,
    bench_find_match,
    bench_possible_matches,
    bench_chain,
    bench_collapse,
    bench_full_game
);
criterion_main!(benches);
