use criterion::{criterion_group, criterion_main, Criterion};
use maze_runner::{
    generators,
    grid::Grid,
    grid_traits::MazeGrid,
    levels::{LevelConfig, LevelController},
    units::{ColumnsCount, RowsCount},
    wall_grid::WallGrid,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_recursive_backtracker_cells_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_cells_32", move |b| {
        b.iter(|| {
            let mut g = Grid::new(ColumnsCount(32), RowsCount(32)).unwrap();
            generators::recursive_backtracker(&mut g, &mut rng).unwrap();
            g
        })
    });
}

fn bench_recursive_backtracker_wall_grid_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_wall_grid_32", move |b| {
        b.iter(|| WallGrid::generate(ColumnsCount(32), RowsCount(32), &mut rng).unwrap())
    });
}

fn bench_level_up_from_20(c: &mut Criterion) {
    c.bench_function("level_up_from_20", |b| {
        b.iter(|| {
            let mut levels: LevelController = LevelController::new(LevelConfig {
                seed: Some(20),
                ..LevelConfig::default()
            }).unwrap();
            levels.on_goal_reached().unwrap();
            levels.score()
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_cells_32,
    bench_recursive_backtracker_wall_grid_32,
    bench_level_up_from_20
);
criterion_main!(benches);
