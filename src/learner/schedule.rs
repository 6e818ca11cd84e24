// src/learner/schedule.rs

use crate::circuits::CircuitBank;
use crate::core::QrlError;
use crate::grover::GroverBank;

/// Scheduling of amplification operators per (state, action) pair.
///
/// The schedule owns two `S x A` matrices: the step *target* computed from
/// the latest transition, and the saturation flags. The target is recomputed
/// on every visit, not accumulated; the cap bounds each visit's append, not
/// the cumulative append count. Once any action in a state saturates, that
/// state's circuit is frozen forever — amplifying past the optimum would
/// rotate the register away from the target again.
#[derive(Debug, Clone)]
pub struct AmplificationSchedule {
    /// Latest scheduled iteration count per (state, action); may be negative.
    targets: Vec<i64>,
    /// Saturation flags per (state, action). One-shot: a state with any flag
    /// set never receives another operator, for any action.
    saturated: Vec<bool>,
    action_count: usize,
    /// Theoretical optimal iteration count; constant for the learner's life.
    max_steps: i64,
}

impl AmplificationSchedule {
    pub(crate) fn new(state_count: usize, action_count: usize, max_steps: i64) -> Self {
        Self {
            targets: vec![0; state_count * action_count],
            saturated: vec![false; state_count * action_count],
            action_count,
            max_steps,
        }
    }

    fn index(&self, state: usize, action: usize) -> usize {
        state * self.action_count + action
    }

    /// The iteration cap (the theoretical Grover optimum).
    pub fn max_steps(&self) -> i64 {
        self.max_steps
    }

    /// Computes the step target for a transition: `floor(k * (reward +
    /// next_value))`, capped at the optimum. The result is deliberately not
    /// clamped below zero — appending treats negative counts as zero.
    pub fn steps_for(&self, k: f64, reward: f64, next_value: f64) -> i64 {
        let raw = (k * (reward + next_value)).floor() as i64;
        raw.min(self.max_steps)
    }

    /// Records the freshly computed target for `(state, action)`,
    /// overwriting the previous visit's target.
    pub fn set_target(&mut self, state: usize, action: usize, steps: i64) {
        let idx = self.index(state, action);
        self.targets[idx] = steps;
    }

    /// Latest recorded target for `(state, action)`.
    pub fn target(&self, state: usize, action: usize) -> i64 {
        self.targets[self.index(state, action)]
    }

    /// Whether `(state, action)` has reached saturation.
    pub fn is_saturated(&self, state: usize, action: usize) -> bool {
        self.saturated[self.index(state, action)]
    }

    /// Whether `state`'s circuit is frozen (any action saturated).
    pub fn is_frozen(&self, state: usize) -> bool {
        let base = state * self.action_count;
        self.saturated[base..base + self.action_count]
            .iter()
            .any(|flag| *flag)
    }

    /// Applies the current target for `(state, action)` to the state's
    /// circuit: appends that many copies of the action's operator unless the
    /// state is frozen, then raises the saturation flag if the target reached
    /// the cap on an unfrozen state.
    pub fn apply(
        &mut self,
        state: usize,
        action: usize,
        operators: &GroverBank,
        circuits: &mut CircuitBank,
    ) -> Result<(), QrlError> {
        let frozen = self.is_frozen(state);
        let steps = self.target(state, action);
        if !frozen {
            circuits.append(state, operators.get(action)?, steps)?;
        }
        if steps >= self.max_steps && !frozen {
            let idx = self.index(state, action);
            self.saturated[idx] = true;
        }
        Ok(())
    }
}
