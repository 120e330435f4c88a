//! Benchmark harness for the planners.
//!
//! Runs a planner over a corpus of maps and reports per-scenario status,
//! timing and path length.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_plan::evaluation::benchmark_descent;
//!
//! let report = benchmark_descent(&maps, geometry, &field, &descent, 42);
//! print!("{}", report.table());
//! // scenario                 planner  status      time_ms     length   steps   rec
//! // ------------------------------------------------------------------------------
//! // scenario1                descent  SUCCESS       0.41      27.90      24     0
//! ```

mod benchmark;
mod performance;

pub use benchmark::{
    BenchmarkReport, PlannerKind, ScenarioResult, benchmark_descent, benchmark_q_table,
};
pub use performance::OperationTiming;
