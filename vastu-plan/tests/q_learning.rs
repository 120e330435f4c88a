//! Grid-world environment and multi-map Q-learning integration tests.

mod common;

use vastu_plan::io::parse_map;
use vastu_plan::rl::{
    Action, Episode, EpisodeStatus, EpsilonSchedule, GOAL_REWARD, GridWorld, INVALID_MOVE_REWARD,
    MapSampling, QLearningTrainer, QTablePlanner, STEP_REWARD, StartMode, TrainingConfig,
    TrainingMap,
};
use vastu_plan::{PlanError, PlanStatus, Pose, QTable, RobotGeometry};

fn fast_config(episodes_per_map: usize) -> TrainingConfig {
    TrainingConfig {
        episodes_per_map,
        learning_rate: 0.5,
        discount: 0.9,
        epsilon: EpsilonSchedule::Linear {
            start: 1.0,
            floor: 0.1,
            episodes: episodes_per_map,
        },
        start_mode: StartMode::Random,
        ..Default::default()
    }
}

#[test]
fn test_reward_accounting() {
    let map = parse_map("tiny", "2 0 3\n0 1 0").unwrap();
    let world = GridWorld::from_map(&map, RobotGeometry::point()).unwrap();

    // Off the grid: stay, -10
    let t = world.step(Pose::new(0, 0), Action::Up);
    assert_eq!(t.next, Pose::new(0, 0));
    assert_eq!(t.reward, INVALID_MOVE_REWARD);
    assert!(!t.terminal);

    // Into the wall: stay, -10
    let t = world.step(Pose::new(1, 0), Action::Right);
    assert_eq!(t.next, Pose::new(1, 0));
    assert_eq!(t.reward, INVALID_MOVE_REWARD);

    // Plain move: -1
    let t = world.step(Pose::new(0, 0), Action::Down);
    assert_eq!(t.next, Pose::new(1, 0));
    assert_eq!(t.reward, STEP_REWARD);
    assert!(!t.terminal);

    // Onto the goal: +1000, terminal
    let t = world.step(Pose::new(0, 1), Action::Right);
    assert_eq!(t.next, Pose::new(0, 2));
    assert_eq!(t.reward, GOAL_REWARD);
    assert!(t.terminal);

    let mut episode = Episode::new(map.start, 10);
    episode.apply(&world, Action::Left);
    episode.apply(&world, Action::Right);
    episode.apply(&world, Action::Right);
    assert_eq!(episode.status(), EpisodeStatus::Succeeded);
    assert_eq!(episode.steps(), 3);
    assert_eq!(episode.total_reward(), -10.0 - 1.0 + 1000.0);
}

#[test]
fn test_episode_truncation_is_not_success() {
    let map = parse_map("tiny", "2 0 3\n0 1 0").unwrap();
    let world = GridWorld::from_map(&map, RobotGeometry::point()).unwrap();

    let mut episode = Episode::new(map.start, 2);
    episode.apply(&world, Action::Up);
    assert!(episode.is_running());
    episode.apply(&world, Action::Left);
    assert_eq!(episode.status(), EpisodeStatus::Truncated);
}

#[test]
fn test_converges_on_open_3x3() {
    let map = parse_map("open3", "2 0 0\n0 0 0\n0 0 3").unwrap();
    let training_map = TrainingMap::from_map(&map, RobotGeometry::point()).unwrap();
    let trainer = QLearningTrainer::new(fast_config(3000)).unwrap();

    let (table, report) = trainer
        .train(std::slice::from_ref(&training_map), &mut common::rng(2024))
        .unwrap();
    assert_eq!(report.episodes, 3000);
    assert_eq!(report.window_rewards.len(), 6);

    let planner = QTablePlanner::new(&table);
    for start in common::free_cells(&map) {
        if start == map.goal {
            continue;
        }
        let outcome = planner.plan(training_map.world(), start).unwrap();
        assert_eq!(outcome.status, PlanStatus::Success, "from {}", start);
        assert_eq!(
            outcome.step_count,
            start.manhattan_distance(&map.goal) as usize,
            "from {}",
            start
        );
    }
}

#[test]
fn test_one_table_serves_several_maps() {
    let maps = vec![
        parse_map("detour", "2 0 0 0\n1 1 0 1\n0 0 0 0\n3 1 0 0").unwrap(),
        parse_map("ring", "0 0 2\n0 1 0\n3 0 0").unwrap(),
    ];
    let training: Vec<TrainingMap> = maps
        .iter()
        .map(|m| TrainingMap::from_map(m, RobotGeometry::point()).unwrap())
        .collect();

    let config = TrainingConfig {
        sampling: MapSampling::RoundRobin,
        ..fast_config(3000)
    };
    let (table, report) = QLearningTrainer::new(config)
        .unwrap()
        .train(&training, &mut common::rng(7))
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(report.episodes, 6000);
    assert!(report.success_rate() > 0.5);

    let planner = QTablePlanner::new(&table);
    for map in &maps {
        let outcome = planner.plan_map(map, RobotGeometry::point()).unwrap();
        assert!(outcome.is_success(), "{} failed", map.id);
        assert_eq!(
            Some(outcome.step_count),
            common::bfs_distance(map, map.start, map.goal),
            "{} is not shortest",
            map.id
        );
        assert_eq!(outcome.recovery_engagements, 0);
    }
}

#[test]
fn test_training_is_reproducible() {
    let map = common::cluttered_map();
    let training = vec![TrainingMap::from_map(&map, RobotGeometry::point()).unwrap()];
    let trainer = QLearningTrainer::new(fast_config(200)).unwrap();

    let (a, report_a) = trainer.train(&training, &mut common::rng(5)).unwrap();
    let (b, report_b) = trainer.train(&training, &mut common::rng(5)).unwrap();
    assert_eq!(a, b);
    assert_eq!(report_a, report_b);
}

#[test]
fn test_unknown_map_is_rejected() {
    let trained = parse_map("trained", "2 0 3").unwrap();
    let other = parse_map("other", "2 0 3").unwrap();
    let training = vec![TrainingMap::from_map(&trained, RobotGeometry::point()).unwrap()];
    let (table, _) = QLearningTrainer::new(fast_config(50))
        .unwrap()
        .train(&training, &mut common::rng(0))
        .unwrap();

    let result = QTablePlanner::new(&table).plan_map(&other, RobotGeometry::point());
    assert!(matches!(result, Err(PlanError::UnknownMap(_))));
}

#[test]
fn test_untrained_table_reports_step_limit() {
    let map = parse_map("walled", "2 1 3\n0 1 0\n0 0 0").unwrap();
    let world = GridWorld::from_map(&map, RobotGeometry::point()).unwrap();
    let mut table = QTable::new();
    table.ensure_map(world.id(), world.rows(), world.cols());

    // All-zero values: greedy always tries Up from the start and never moves
    let outcome = QTablePlanner::new(&table).plan(&world, map.start).unwrap();
    assert_eq!(outcome.status, PlanStatus::Failure);
    assert_eq!(outcome.step_count, world.rollout_step_cap());
    assert_eq!(outcome.path, vec![map.start]);
}

#[test]
fn test_invalid_hyperparameters_rejected() {
    let config = TrainingConfig {
        discount: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        QLearningTrainer::new(config),
        Err(PlanError::InvalidConfig(_))
    ));
}
