//! Scenario benchmarks for both planners.
//!
//! Every map is one scenario. Each scenario runs in isolation: the descent
//! planner gets a fresh RNG seeded from `base_seed + index`, so a rerun with
//! the same seed reproduces every path exactly.
//!
//! Invalid scenarios (start inside an inflated obstacle, untrained map) are
//! recorded as failures with the error text; they do not abort the run.

use std::fmt::Write;
use std::time::Instant;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::{PlanOutcome, PlanStatus};
use crate::error::Result;
use crate::field::FieldConfig;
use crate::grid::{MapDefinition, RobotGeometry};
use crate::planner::{self, DescentConfig};
use crate::rl::{QTable, QTablePlanner};

use super::performance::OperationTiming;

/// Which planner produced a result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannerKind {
    /// Potential field with random-walk recovery
    Descent,
    /// Greedy rollout of a trained Q-table
    QTable,
}

impl PlannerKind {
    /// Label used in reports
    pub fn name(&self) -> &'static str {
        match self {
            PlannerKind::Descent => "descent",
            PlannerKind::QTable => "q-table",
        }
    }
}

/// Result of one benchmark scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Map id
    pub name: String,
    /// Planner used
    pub planner: PlannerKind,
    /// Terminal status
    pub status: PlanStatus,
    /// Wall-clock time of the `plan` call (milliseconds)
    pub elapsed_ms: f64,
    /// Euclidean length of the path in cells
    pub path_length: f64,
    /// Moves executed
    pub step_count: usize,
    /// Recovery engagements (descent only)
    pub recovery_engagements: usize,
    /// Failure reason or validation error
    pub note: Option<String>,
}

impl ScenarioResult {
    fn from_outcome(name: &str, planner: PlannerKind, elapsed_ms: f64, outcome: PlanOutcome) -> Self {
        Self {
            name: name.to_string(),
            planner,
            status: outcome.status,
            elapsed_ms,
            path_length: outcome.path_length(),
            step_count: outcome.step_count,
            recovery_engagements: outcome.recovery_engagements,
            note: outcome.failure_reason.map(|r| format!("{:?}", r)),
        }
    }

    fn rejected(name: &str, planner: PlannerKind, elapsed_ms: f64, error: String) -> Self {
        Self {
            name: name.to_string(),
            planner,
            status: PlanStatus::Failure,
            elapsed_ms,
            path_length: 0.0,
            step_count: 0,
            recovery_engagements: 0,
            note: Some(error),
        }
    }

    fn record(name: &str, planner: PlannerKind, start: Instant, result: Result<PlanOutcome>) -> Self {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let scenario = match result {
            Ok(outcome) => Self::from_outcome(name, planner, elapsed_ms, outcome),
            Err(e) => Self::rejected(name, planner, elapsed_ms, e.to_string()),
        };
        debug!(
            "[Bench] {} {}: {} in {:.2} ms ({} steps)",
            planner.name(),
            name,
            scenario.status.as_str(),
            elapsed_ms,
            scenario.step_count
        );
        scenario
    }

    /// True when the goal was reached
    pub fn is_success(&self) -> bool {
        self.status == PlanStatus::Success
    }
}

/// Aggregated benchmark results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Per-scenario results in run order
    pub scenarios: Vec<ScenarioResult>,
}

impl BenchmarkReport {
    /// Wrap a list of results
    pub fn new(scenarios: Vec<ScenarioResult>) -> Self {
        Self { scenarios }
    }

    /// Append another report's scenarios.
    pub fn extend(&mut self, other: BenchmarkReport) {
        self.scenarios.extend(other.scenarios);
    }

    /// Number of scenarios
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True when no scenario was run
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Number of scenarios that reached the goal
    pub fn successes(&self) -> usize {
        self.scenarios.iter().filter(|s| s.is_success()).count()
    }

    /// Fraction of scenarios that reached the goal (0 for an empty report).
    pub fn success_rate(&self) -> f64 {
        if self.scenarios.is_empty() {
            0.0
        } else {
            self.successes() as f64 / self.scenarios.len() as f64
        }
    }

    /// Timing statistics over all scenarios.
    pub fn timing(&self) -> OperationTiming {
        let samples: Vec<f64> = self.scenarios.iter().map(|s| s.elapsed_ms).collect();
        OperationTiming::from_millis("plan", &samples)
    }

    /// Fixed-width table of every scenario followed by a summary.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<24} {:<8} {:<8} {:>10} {:>10} {:>7} {:>5}",
            "scenario", "planner", "status", "time_ms", "length", "steps", "rec"
        );
        let _ = writeln!(out, "{}", "-".repeat(78));
        for s in &self.scenarios {
            let _ = writeln!(
                out,
                "{:<24} {:<8} {:<8} {:>10.2} {:>10.2} {:>7} {:>5}",
                s.name,
                s.planner.name(),
                s.status.as_str(),
                s.elapsed_ms,
                s.path_length,
                s.step_count,
                s.recovery_engagements
            );
        }
        let _ = writeln!(out, "{}", "-".repeat(78));

        let timing = self.timing();
        let _ = writeln!(
            out,
            "success {}/{} ({:.1}%)",
            self.successes(),
            self.len(),
            self.success_rate() * 100.0
        );
        let _ = writeln!(
            out,
            "time ms: mean {:.2}  median {:.2}  min {:.2}  max {:.2}",
            timing.mean_ms, timing.median_ms, timing.min_ms, timing.max_ms
        );
        out
    }
}

/// Run the descent planner on every map.
pub fn benchmark_descent(
    maps: &[MapDefinition],
    geometry: RobotGeometry,
    field: &FieldConfig,
    descent: &DescentConfig,
    base_seed: u64,
) -> BenchmarkReport {
    info!(
        "[Bench] Descent over {} maps, robot {}, seed {}",
        maps.len(),
        geometry,
        base_seed
    );
    let scenarios = maps
        .iter()
        .enumerate()
        .map(|(i, map)| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let start = Instant::now();
            let result = planner::plan(
                &map.grid, map.start, map.goal, geometry, field, descent, &mut rng,
            );
            ScenarioResult::record(map.id.as_str(), PlannerKind::Descent, start, result)
        })
        .collect();
    BenchmarkReport::new(scenarios)
}

/// Greedy-roll a trained table on every map.
pub fn benchmark_q_table(
    table: &QTable,
    maps: &[MapDefinition],
    geometry: RobotGeometry,
) -> BenchmarkReport {
    info!("[Bench] Q-table over {} maps, robot {}", maps.len(), geometry);
    let planner = QTablePlanner::new(table);
    let scenarios = maps
        .iter()
        .map(|map| {
            let start = Instant::now();
            let result = planner.plan_map(map, geometry);
            ScenarioResult::record(map.id.as_str(), PlannerKind::QTable, start, result)
        })
        .collect();
    BenchmarkReport::new(scenarios)
}
