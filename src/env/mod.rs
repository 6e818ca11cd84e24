// src/env/mod.rs

//! The discrete-environment capability interface the learner trains against.
//!
//! The learner is generic over anything that can reset, step, and declare its
//! space sizes; the environment's own dynamics are external collaborators.
//! [`grid::GridMaze`] is the bundled deterministic grid used by tests and
//! documentation examples.

pub mod grid;

/// The outcome of one environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State index the environment moved to, in `[0, observation_space_size)`.
    pub next_state: usize,
    /// Unshaped reward emitted by the environment.
    pub reward: f64,
    /// The episode reached a terminal state.
    pub terminated: bool,
    /// The episode was cut off by the environment (distinct from the
    /// learner's own step budget; currently observed but unused by training).
    pub truncated: bool,
}

/// A discrete-state, discrete-action environment.
///
/// Contract: state indices are integers in `[0, observation_space_size)`,
/// action indices in `[0, action_space_size)`, and the goal state is the
/// highest-indexed observation. Both sizes are fixed for the lifetime of the
/// environment. A violation of the state-index contract aborts training.
pub trait Environment {
    /// Resets the environment for a new episode and returns the initial state.
    fn reset(&mut self) -> usize;

    /// Applies `action` and returns the resulting transition.
    fn step(&mut self, action: usize) -> Transition;

    /// Number of distinct states.
    fn observation_space_size(&self) -> usize;

    /// Number of distinct actions.
    fn action_space_size(&self) -> usize;

    /// Optional rendering hook, driven by the `graphics` hyperparameter.
    /// The default does nothing; learning semantics never depend on it.
    fn render(&self) {}
}
