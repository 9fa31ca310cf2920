use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

/// Largest grid with a single corner mine, so one click floods nearly everything.
fn open_board() -> GameEngine {
    let grid = Grid::from_mine_coords((255, 255), &[(254, 254)]).unwrap();
    GameEngine::from_grid(grid, RandomMinePlacer::new(0)).unwrap()
}

fn bench_flood_fill(c: &mut Criterion) {
    c.bench_function("flood_fill_255x255", |b| {
        b.iter_batched(
            open_board,
            |mut engine| black_box(engine.activate_primary((0, 0)).unwrap()),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("new_session_16x30_99", |b| {
        let config = GameConfig::new(16, 30, 99).unwrap();
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(GameEngine::new(config, RandomMinePlacer::new(seed)))
        })
    });

    c.bench_function("new_session_255x255_65000", |b| {
        let config = GameConfig::new(255, 255, 65_000).unwrap();
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(GameEngine::new(config, RandomMinePlacer::new(seed)))
        })
    });
}

criterion_group!(benches, bench_flood_fill);
criterion_main!(benches);
