//! Benchmark configuration-space inflation, field generation and both planners.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use vastu_plan::field::{FieldConfig, PotentialField};
use vastu_plan::planner::{DescentConfig, GradientDescentPlanner};
use vastu_plan::rl::{QLearningTrainer, TrainingConfig, TrainingMap};
use vastu_plan::{ConfigurationSpace, Grid, MapDefinition, Pose, RobotGeometry};

/// Square room with a row of interior wall stubs every 8 cells.
fn room_map(size: usize) -> MapDefinition {
    let mut grid = Grid::new(size, size);
    let last = size as i32 - 1;
    grid.fill_rect(Pose::new(0, 0), Pose::new(0, last));
    grid.fill_rect(Pose::new(last, 0), Pose::new(last, last));
    grid.fill_rect(Pose::new(0, 0), Pose::new(last, 0));
    grid.fill_rect(Pose::new(0, last), Pose::new(last, last));

    let mut col = 8;
    while col < last - 4 {
        grid.fill_rect(Pose::new(1, col), Pose::new(size as i32 / 2, col));
        col += 8;
    }

    MapDefinition::new(
        format!("room{}", size),
        grid,
        Pose::new(last - 3, 3),
        Pose::new(3, last - 3),
    )
}

fn bench_inflation(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflation");
    let map = room_map(64);

    for extent in [1usize, 2, 3, 5] {
        let geometry = RobotGeometry::new(extent, extent);
        group.bench_with_input(BenchmarkId::new("robot", extent), &geometry, |b, g| {
            b.iter(|| ConfigurationSpace::inflate(black_box(&map.grid), *g))
        });
    }

    group.finish();
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("potential_field");

    for size in [32usize, 64, 128] {
        let map = room_map(size);
        let space = ConfigurationSpace::inflate(&map.grid, RobotGeometry::default()).unwrap();
        let config = FieldConfig::default();
        group.bench_with_input(BenchmarkId::new("size", size), &size, |b, _| {
            b.iter(|| PotentialField::compute(black_box(&space), map.goal, &config))
        });
    }

    group.finish();
}

fn bench_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("descent");
    let planner = GradientDescentPlanner::new(DescentConfig::default()).unwrap();

    for size in [32usize, 64] {
        let map = room_map(size);
        let space = ConfigurationSpace::inflate(&map.grid, RobotGeometry::default()).unwrap();
        let field = PotentialField::compute(&space, map.goal, &FieldConfig::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("size", size), &size, |b, _| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                planner.plan(&space, &field, black_box(map.start), &mut rng)
            })
        });
    }

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("q_learning");
    group.sample_size(10);

    let maps: Vec<TrainingMap> = [16usize, 24]
        .iter()
        .map(|&size| TrainingMap::from_map(&room_map(size), RobotGeometry::point()).unwrap())
        .collect();
    let trainer = QLearningTrainer::new(TrainingConfig {
        episodes_per_map: 200,
        ..Default::default()
    })
    .unwrap();

    group.bench_function("400_episodes", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(11);
            trainer.train(black_box(&maps), &mut rng)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inflation,
    bench_field,
    bench_descent,
    bench_training
);
criterion_main!(benches);
