// src/learner/value.rs

use std::fmt;

/// Tabular state-value estimates, one scalar per state.
///
/// This is a state-value (not state-action-value) formulation: the update
/// bootstraps from the successor state's current estimate regardless of which
/// action produced the transition. The table is created once at learner
/// construction and persists across epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// Creates a table of `state_count` zeros.
    pub fn new(state_count: usize) -> Self {
        Self {
            values: vec![0.0; state_count],
        }
    }

    /// One-step temporal-difference update:
    /// `v[s] += alpha * (reward + gamma * v[s'] - v[s])`.
    pub fn update(&mut self, state: usize, reward: f64, next_state: usize, alpha: f64, gamma: f64) {
        let bootstrap = reward + gamma * self.values[next_state] - self.values[state];
        self.values[state] += alpha * bootstrap;
    }

    /// Current estimate for `state`.
    pub fn get(&self, state: usize) -> f64 {
        self.values[state]
    }

    /// All estimates in state order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for an empty state space (never the case in a
    /// constructed learner).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ValueTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Values[")?;
        for (i, v) in self.values.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, v)?;
        }
        write!(f, "]")
    }
}
