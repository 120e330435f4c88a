//! Universal Q-table.
//!
//! One dense value block per map, addressed by [`MapId`]:
//!
//! ```text
//! QTable
//! ├── "scenario1" → rows × cols × 4 values
//! ├── "scenario2" → rows × cols × 4 values
//! └── ...
//! ```
//!
//! Index of `(row, col, action)` inside a block: `(row * cols + col) * 4 + action`.

use std::collections::BTreeMap;

use crate::core::Pose;
use crate::error::{PlanError, Result};
use crate::grid::MapId;

use super::action::Action;

/// Action values for every state of one map.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionValues {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ActionValues {
    /// Zero-initialised block.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols * Action::COUNT],
        }
    }

    /// Block from raw values (`rows * cols * 4` of them).
    pub fn from_raw(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == rows * cols * Action::COUNT).then_some(Self { rows, cols, values })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw values in storage order.
    pub fn raw(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    fn offset(&self, pose: Pose) -> usize {
        debug_assert!(
            pose.row >= 0
                && pose.col >= 0
                && (pose.row as usize) < self.rows
                && (pose.col as usize) < self.cols
        );
        (pose.row as usize * self.cols + pose.col as usize) * Action::COUNT
    }

    /// The four values of a state, in action order.
    #[inline]
    pub fn state_values(&self, pose: Pose) -> &[f64] {
        let offset = self.offset(pose);
        &self.values[offset..offset + Action::COUNT]
    }

    /// Q(s, a)
    #[inline]
    pub fn get(&self, pose: Pose, action: Action) -> f64 {
        self.values[self.offset(pose) + action.index()]
    }

    /// Overwrite Q(s, a)
    #[inline]
    pub fn set(&mut self, pose: Pose, action: Action, value: f64) {
        let offset = self.offset(pose);
        self.values[offset + action.index()] = value;
    }

    /// `max_a Q(s, a)`
    #[inline]
    pub fn max_value(&self, pose: Pose) -> f64 {
        self.state_values(pose)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// `argmax_a Q(s, a)`; the earliest action in priority order wins ties.
    #[inline]
    pub fn best_action(&self, pose: Pose) -> Action {
        let values = self.state_values(pose);
        let mut best = 0;
        for (i, &v) in values.iter().enumerate().skip(1) {
            if v > values[best] {
                best = i;
            }
        }
        Action::ALL[best]
    }

    /// Move Q(s, a) towards `target` by `learning_rate`.
    #[inline]
    pub fn update(&mut self, pose: Pose, action: Action, target: f64, learning_rate: f64) {
        let offset = self.offset(pose) + action.index();
        let current = self.values[offset];
        self.values[offset] = current + learning_rate * (target - current);
    }
}

/// Q-table shared across all trained maps.
///
/// Created empty, filled during training, then used read-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QTable {
    maps: BTreeMap<MapId, ActionValues>,
}

impl QTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map, zero-initialised. An existing block with the same
    /// dimensions is kept; a block with different dimensions is replaced.
    pub fn ensure_map(&mut self, id: &MapId, rows: usize, cols: usize) -> &mut ActionValues {
        let block = self
            .maps
            .entry(id.clone())
            .or_insert_with(|| ActionValues::zeros(rows, cols));
        if block.rows != rows || block.cols != cols {
            *block = ActionValues::zeros(rows, cols);
        }
        block
    }

    /// Insert a complete block (used when loading a model).
    pub fn insert_map(&mut self, id: MapId, values: ActionValues) {
        self.maps.insert(id, values);
    }

    /// Values for a map.
    pub fn map(&self, id: &MapId) -> Result<&ActionValues> {
        self.maps
            .get(id)
            .ok_or_else(|| PlanError::UnknownMap(id.to_string()))
    }

    /// Mutable values for a map.
    pub fn map_mut(&mut self, id: &MapId) -> Result<&mut ActionValues> {
        self.maps
            .get_mut(id)
            .ok_or_else(|| PlanError::UnknownMap(id.to_string()))
    }

    /// Q(map, s, a)
    pub fn get(&self, id: &MapId, pose: Pose, action: Action) -> Result<f64> {
        Ok(self.map(id)?.get(pose, action))
    }

    /// Was this map trained?
    pub fn contains(&self, id: &MapId) -> bool {
        self.maps.contains_key(id)
    }

    /// Trained map ids in sorted order.
    pub fn map_ids(&self) -> impl Iterator<Item = &MapId> {
        self.maps.keys()
    }

    /// `(id, values)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapId, &ActionValues)> {
        self.maps.iter()
    }

    /// Number of maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// No maps?
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_action_tie_break() {
        let mut values = ActionValues::zeros(2, 2);
        let s = Pose::new(1, 0);
        assert_eq!(values.best_action(s), Action::Up);

        values.set(s, Action::Left, 5.0);
        values.set(s, Action::Right, 5.0);
        assert_eq!(values.best_action(s), Action::Left);
        assert_eq!(values.max_value(s), 5.0);
    }

    #[test]
    fn test_update() {
        let mut values = ActionValues::zeros(1, 1);
        let s = Pose::new(0, 0);
        values.update(s, Action::Down, 10.0, 0.5);
        assert_eq!(values.get(s, Action::Down), 5.0);
        values.update(s, Action::Down, 10.0, 0.5);
        assert_eq!(values.get(s, Action::Down), 7.5);
    }

    #[test]
    fn test_maps_do_not_collide() {
        let mut table = QTable::new();
        let a = MapId::from("a");
        let b = MapId::from("b");
        table.ensure_map(&a, 2, 2).set(Pose::new(0, 0), Action::Up, 1.0);
        table.ensure_map(&b, 2, 2);

        assert_eq!(table.get(&a, Pose::new(0, 0), Action::Up).unwrap(), 1.0);
        assert_eq!(table.get(&b, Pose::new(0, 0), Action::Up).unwrap(), 0.0);
        assert_eq!(table.len(), 2);

        // Same dimensions: values survive
        table.ensure_map(&a, 2, 2);
        assert_eq!(table.get(&a, Pose::new(0, 0), Action::Up).unwrap(), 1.0);

        assert!(matches!(
            table.get(&MapId::from("c"), Pose::new(0, 0), Action::Up),
            Err(PlanError::UnknownMap(_))
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ActionValues::from_raw(2, 2, vec![0.0; 16]).is_some());
        assert!(ActionValues::from_raw(2, 2, vec![0.0; 15]).is_none());
    }
}
