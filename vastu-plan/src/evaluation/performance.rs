//! Timing statistics for benchmark runs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing statistics over a set of samples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationTiming {
    /// Operation name.
    pub name: String,

    /// Mean duration (milliseconds).
    pub mean_ms: f64,

    /// Standard deviation (milliseconds).
    pub std_ms: f64,

    /// Minimum duration (milliseconds).
    pub min_ms: f64,

    /// Maximum duration (milliseconds).
    pub max_ms: f64,

    /// Median duration (milliseconds).
    pub median_ms: f64,

    /// Total number of samples.
    pub count: usize,

    /// Total time spent (milliseconds).
    pub total_ms: f64,
}

impl OperationTiming {
    /// Create from a list of durations.
    pub fn from_durations(name: &str, durations: &[Duration]) -> Self {
        let ms_values: Vec<f64> = durations.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        Self::from_millis(name, &ms_values)
    }

    /// Create from samples already in milliseconds.
    pub fn from_millis(name: &str, ms_values: &[f64]) -> Self {
        if ms_values.is_empty() {
            return Self {
                name: name.to_string(),
                ..Default::default()
            };
        }

        let n = ms_values.len() as f64;
        let total_ms = ms_values.iter().sum::<f64>();
        let mean_ms = total_ms / n;

        let variance = ms_values.iter().map(|v| (v - mean_ms).powi(2)).sum::<f64>() / n;
        let std_ms = variance.sqrt();

        let min_ms = ms_values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_ms = ms_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = ms_values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median_ms = if sorted.len().is_multiple_of(2) {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
        } else {
            sorted[sorted.len() / 2]
        };

        Self {
            name: name.to_string(),
            mean_ms,
            std_ms,
            min_ms,
            max_ms,
            median_ms,
            count: ms_values.len(),
            total_ms,
        }
    }

    /// Check if the operation exceeds a threshold (for regression testing).
    pub fn exceeds_threshold(&self, threshold_ms: f64) -> bool {
        self.mean_ms > threshold_ms
    }

    /// Format as a single line.
    pub fn summary(&self) -> String {
        format!(
            "{}: {:.2} ± {:.2} ms (median: {:.2}, min: {:.2}, max: {:.2}, n={})",
            self.name,
            self.mean_ms,
            self.std_ms,
            self.median_ms,
            self.min_ms,
            self.max_ms,
            self.count
        )
    }
}
