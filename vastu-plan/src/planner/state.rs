//! Descent planner state machine.

use std::collections::VecDeque;

use crate::core::Pose;

/// Planner mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerMode {
    /// Steepest descent over the potential field
    Descend,

    /// Random walk out of a local trap
    Recovery {
        /// Random moves left in this engagement
        remaining: usize,
    },
}

impl PlannerMode {
    /// Mode name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlannerMode::Descend => "Descend",
            PlannerMode::Recovery { .. } => "Recovery",
        }
    }
}

/// Bounded window of the most recent poses.
#[derive(Clone, Debug)]
pub struct StallHistory {
    recent: VecDeque<Pose>,
    capacity: usize,
}

impl StallHistory {
    /// Window holding at most `capacity` poses.
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a pose, evicting the oldest when full.
    pub fn push(&mut self, pose: Pose) {
        self.recent.push_back(pose);
        if self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
    }

    /// Is `pose` anywhere in the window?
    pub fn contains(&self, pose: Pose) -> bool {
        self.recent.contains(&pose)
    }

    /// Does the newest pose appear earlier in the window?
    pub fn newest_repeats(&self) -> bool {
        match self.recent.back() {
            Some(&newest) => self
                .recent
                .iter()
                .rev()
                .skip(1)
                .any(|&pose| pose == newest),
            None => false,
        }
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.recent.clear();
    }

    /// Poses in the window.
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Is the window empty?
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

/// Mutable state of one descent run.
#[derive(Clone, Debug)]
pub struct PlannerState {
    /// Current pose
    pub current: Pose,
    /// Stall/oscillation window
    pub history: StallHistory,
    /// Current mode
    pub mode: PlannerMode,
    /// Every pose occupied so far, starting with the start pose
    pub path: Vec<Pose>,
    /// Moves executed
    pub steps: usize,
    /// Times RECOVERY was entered
    pub recovery_engagements: usize,
}

impl PlannerState {
    /// Fresh state at `start` in DESCEND mode.
    pub fn new(start: Pose, history_len: usize) -> Self {
        let mut history = StallHistory::new(history_len);
        history.push(start);
        Self {
            current: start,
            history,
            mode: PlannerMode::Descend,
            path: vec![start],
            steps: 0,
            recovery_engagements: 0,
        }
    }

    /// Move to `next`, recording it in the path and the window.
    pub fn advance(&mut self, next: Pose) {
        self.current = next;
        self.path.push(next);
        self.history.push(next);
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut history = StallHistory::new(3);
        for col in 0..5 {
            history.push(Pose::new(0, col));
        }
        assert_eq!(history.len(), 3);
        assert!(!history.contains(Pose::new(0, 1)));
        assert!(history.contains(Pose::new(0, 4)));
        assert!(!history.newest_repeats());
    }

    #[test]
    fn test_oscillation_detected() {
        let mut history = StallHistory::new(4);
        history.push(Pose::new(0, 0));
        history.push(Pose::new(0, 1));
        assert!(!history.newest_repeats());
        history.push(Pose::new(0, 0));
        assert!(history.newest_repeats());

        history.clear();
        assert!(history.is_empty());
        assert!(!history.newest_repeats());
    }

    #[test]
    fn test_state_advance() {
        let mut state = PlannerState::new(Pose::new(1, 1), 8);
        assert_eq!(state.mode.name(), "Descend");
        state.advance(Pose::new(1, 2));
        assert_eq!(state.steps, 1);
        assert_eq!(state.path, vec![Pose::new(1, 1), Pose::new(1, 2)]);
        assert!(state.history.contains(Pose::new(1, 1)));
        assert_eq!(state.mode, PlannerMode::Descend);
    }
}
