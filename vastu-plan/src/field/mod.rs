//! Potential field generation.
//!
//! Turns a [`ConfigurationSpace`](crate::grid::ConfigurationSpace) and a goal
//! into a scalar field the descent planner rolls down:
//!
//! - Attractive term: `attract_gain × euclidean(cell, goal)`
//! - Repulsive term: `repulse_gain × exp(-d)` summed over occupied cells with
//!   `d <= influence_radius` (Euclidean, in cells)
//! - Occupied cells: `+∞`
//!
//! A field is a value: a new goal or geometry produces a new field.

mod config;
mod potential;

pub use config::FieldConfig;
pub use potential::PotentialField;
