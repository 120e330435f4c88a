//! VastuPlan command-line interface.
//!
//! Usage:
//!   vastu-plan descend --map maps/scenario1.txt --svg output/scenario1.svg
//!   vastu-plan train --maps maps --model models/universal.vqtab
//!   vastu-plan run --map maps/scenario1.txt
//!   vastu-plan bench --maps maps --planner both
//!   vastu-plan upscale --maps maps --factor 4

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use vastu_plan::evaluation::{BenchmarkReport, benchmark_descent, benchmark_q_table};
use vastu_plan::io::{SvgConfig, SvgRenderer, load_map, load_map_dir, load_model, save_model, upscale_dir};
use vastu_plan::rl::{QLearningTrainer, QTablePlanner, TrainingMap};
use vastu_plan::{PlannerConfig, PlanningSession, RobotGeometry};

type CliResult<T> = std::result::Result<T, Box<dyn Error>>;

/// Grid path planning with potential fields and Q-learning
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults apply when missing)
    #[arg(short, long, default_value = "configs/planner.yaml")]
    config: PathBuf,

    /// Robot width in cells (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Robot height in cells (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan one map with potential-field descent
    Descend {
        /// Map file
        #[arg(short, long)]
        map: PathBuf,

        /// Write an SVG of the field and path
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Train a universal Q-table on every map in a directory
    Train {
        /// Map directory (overrides config)
        #[arg(long)]
        maps: Option<PathBuf>,

        /// Output model path (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Episodes per map (overrides config)
        #[arg(long)]
        episodes: Option<usize>,
    },

    /// Greedy rollout of a trained model on one map
    Run {
        /// Map file
        #[arg(short, long)]
        map: PathBuf,

        /// Model path (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Write an SVG of the path
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Benchmark planners over a map directory
    Bench {
        /// Map directory (overrides config)
        #[arg(long)]
        maps: Option<PathBuf>,

        /// Planner(s) to benchmark
        #[arg(long, value_enum, default_value_t = BenchPlanner::Descent)]
        planner: BenchPlanner,

        /// Model path for the Q-table benchmark (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Write `<name>_highres.txt` copies of every map
    Upscale {
        /// Map directory (overrides config)
        #[arg(long)]
        maps: Option<PathBuf>,

        /// Cells per source cell along each axis (overrides config)
        #[arg(long)]
        factor: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BenchPlanner {
    Descent,
    QTable,
    Both,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> CliResult<()> {
    let config = load_config(&args)?;
    let geometry = config.robot_geometry();

    match args.command {
        Command::Descend { map, svg } => descend(&config, geometry, &map, svg.as_deref()),
        Command::Train {
            maps,
            model,
            episodes,
        } => {
            let maps = maps.unwrap_or_else(|| config.persistence.map_dir());
            let model = model.unwrap_or_else(|| config.persistence.model_path());
            train(&config, geometry, &maps, &model, episodes)
        }
        Command::Run { map, model, svg } => {
            let model = model.unwrap_or_else(|| config.persistence.model_path());
            run_model(geometry, &map, &model, svg.as_deref())
        }
        Command::Bench {
            maps,
            planner,
            model,
        } => {
            let maps = maps.unwrap_or_else(|| config.persistence.map_dir());
            let model = model.unwrap_or_else(|| config.persistence.model_path());
            bench(&config, geometry, &maps, planner, &model)
        }
        Command::Upscale { maps, factor } => {
            let maps = maps.unwrap_or_else(|| config.persistence.map_dir());
            let factor = factor.unwrap_or(config.persistence.upscale_factor);
            let written = upscale_dir(&maps, factor)?;
            info!("Wrote {} upscaled maps (x{})", written.len(), factor);
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> CliResult<PlannerConfig> {
    let mut config = if args.config.exists() {
        PlannerConfig::load(&args.config)?
    } else {
        warn!("Config {} not found, using defaults", args.config.display());
        PlannerConfig::default()
    };
    if let Some(width) = args.width {
        config.robot.width = width;
    }
    if let Some(height) = args.height {
        config.robot.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn descend(
    config: &PlannerConfig,
    geometry: RobotGeometry,
    map_path: &Path,
    svg: Option<&Path>,
) -> CliResult<()> {
    let map = load_map(map_path)?;
    let field_config = config.to_field_config();
    let mut session = PlanningSession::new(map.clone());
    let mut rng = make_rng(config.seed);

    let outcome =
        session.plan_descent(geometry, &field_config, &config.to_descent_config(), &mut rng)?;
    println!(
        "{} {}: {} in {} steps, path length {:.2}, {} recoveries",
        map.id,
        geometry,
        outcome.status.as_str(),
        outcome.step_count,
        outcome.path_length(),
        outcome.recovery_engagements
    );
    if let Some(reason) = outcome.failure_reason {
        println!("  reason: {:?}", reason);
    }

    if let Some(svg) = svg {
        let field = session.field(geometry, map.goal, &field_config)?;
        SvgRenderer::new(&map.grid, SvgConfig::default().fit_width(map.cols(), 800.0))
            .with_title(format!("{} descent ({})", map.id, outcome.status.as_str()))
            .with_field(field)
            .with_path(&outcome.path)
            .with_endpoints(map.start, map.goal)
            .save(svg)?;
        info!("SVG written to {}", svg.display());
    }
    Ok(())
}

fn train(
    config: &PlannerConfig,
    geometry: RobotGeometry,
    map_dir: &Path,
    model: &Path,
    episodes: Option<usize>,
) -> CliResult<()> {
    let maps = load_map_dir(map_dir)?;
    if maps.is_empty() {
        return Err(format!("no maps found in {}", map_dir.display()).into());
    }
    let training_maps = maps
        .iter()
        .map(|m| TrainingMap::from_map(m, geometry))
        .collect::<vastu_plan::Result<Vec<_>>>()?;

    let mut training = config.to_training_config();
    if let Some(episodes) = episodes {
        training.episodes_per_map = episodes;
    }

    let mut rng = make_rng(config.seed);
    let (table, report) = QLearningTrainer::new(training)?.train(&training_maps, &mut rng)?;
    println!(
        "Trained on {} maps: {} episodes, success rate {:.1}%, final epsilon {:.3}",
        maps.len(),
        report.episodes,
        report.success_rate() * 100.0,
        report.final_epsilon
    );
    if let Some(divergence) = report.divergence {
        println!(
            "  warning: last window mean reward {:.1} is below best window #{} ({:.1})",
            divergence.last_mean_reward, divergence.best_window, divergence.best_mean_reward
        );
    }

    if let Some(parent) = model.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_model(&table, model)?;
    info!("Model written to {}", model.display());
    Ok(())
}

fn run_model(geometry: RobotGeometry, map_path: &Path, model: &Path, svg: Option<&Path>) -> CliResult<()> {
    let map = load_map(map_path)?;
    let table = load_model(model)?;
    let outcome = QTablePlanner::new(&table).plan_map(&map, geometry)?;
    println!(
        "{} {}: {} in {} steps, path length {:.2}",
        map.id,
        geometry,
        outcome.status.as_str(),
        outcome.step_count,
        outcome.path_length()
    );

    if let Some(svg) = svg {
        SvgRenderer::new(&map.grid, SvgConfig::default().fit_width(map.cols(), 800.0))
            .with_title(format!("{} q-table ({})", map.id, outcome.status.as_str()))
            .with_path(&outcome.path)
            .with_endpoints(map.start, map.goal)
            .save(svg)?;
        info!("SVG written to {}", svg.display());
    }
    Ok(())
}

fn bench(
    config: &PlannerConfig,
    geometry: RobotGeometry,
    map_dir: &Path,
    planner: BenchPlanner,
    model: &Path,
) -> CliResult<()> {
    let maps = load_map_dir(map_dir)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut report = BenchmarkReport::default();

    if planner != BenchPlanner::QTable {
        report.extend(benchmark_descent(
            &maps,
            geometry,
            &config.to_field_config(),
            &config.to_descent_config(),
            seed,
        ));
    }
    if planner != BenchPlanner::Descent {
        let table = load_model(model)?;
        report.extend(benchmark_q_table(&table, &maps, geometry));
    }

    println!("Benchmark: {} maps, robot {}, seed {}", maps.len(), geometry, seed);
    print!("{}", report.table());
    Ok(())
}
