//! Default value functions for serde deserialization.
//!
//! Shared by the runtime config structs and the YAML sections so a partial
//! file and `Default::default()` always agree.

// Robot

pub fn robot_extent() -> usize {
    2
}

// Potential field

pub fn attract_gain() -> f64 {
    3.0
}

pub fn repulse_gain() -> f64 {
    20.0
}

pub fn influence_radius() -> f64 {
    1.5
}

// Descent planner

pub fn allow_diagonal() -> bool {
    true
}

pub fn history_len() -> usize {
    16
}

pub fn recovery_steps() -> usize {
    100
}

pub fn max_recovery_cycles() -> usize {
    50
}

pub fn max_steps() -> usize {
    5000
}

// Q-learning

pub fn episodes_per_map() -> usize {
    15_000
}

pub fn learning_rate() -> f64 {
    0.1
}

pub fn discount() -> f64 {
    0.99
}

pub fn report_window() -> usize {
    500
}

pub fn divergence_tolerance() -> f64 {
    0.25
}

// Persistence

pub fn map_dir() -> String {
    "maps".to_string()
}

pub fn model_path() -> String {
    "models/universal.vqtab".to_string()
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn upscale_factor() -> usize {
    4
}
