// src/lib.rs

//! `qrl` - Grover-enhanced tabular reinforcement learning
//!
//! This library couples a classical temporal-difference state-value learner
//! with a quantum measurement-based policy: every discrete state owns a small
//! quantum register whose single-shot measurement selects an action, and
//! Grover amplitude amplification progressively biases each register toward
//! the actions that produced the best-looking transitions.
//!
//! The crate is organised as a core learner plus narrow collaborator seams:
//! any type implementing [`env::Environment`] supplies transitions, and any
//! type implementing [`simulation::ActionSampler`] supplies measurements
//! (the bundled [`StatevectorSampler`] simulates the registers exactly).

pub mod core;
pub mod grover;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod env;
pub mod learner;

// Re-export the most common types for easier top-level use
pub use core::{QrlError, RegisterState};
pub use grover::{GroverBank, GroverOperator};
pub use circuits::{ActionCircuit, CircuitBank};
pub use simulation::{ActionSampler, StatevectorSampler};
pub use env::{Environment, Transition};
pub use learner::{GroverLearner, Hyperparameters, TrainingReport};

// Example: train a learner on the canonical 4x4 frozen-lake grid with a
// seeded sampler, then read back the learning artifacts.
/// ```
/// use qrl::{GroverLearner, Hyperparameters, StatevectorSampler, QrlError};
/// use qrl::env::grid::GridMaze;
///
/// let env = GridMaze::frozen_lake_4x4();
/// let sampler = StatevectorSampler::from_seed(7);
/// let mut learner = GroverLearner::with_sampler(env, sampler)?;
///
/// learner.set_hyperparams(Hyperparameters {
///     k: 0.1,
///     alpha: 0.1,
///     gamma: 0.99,
///     max_epochs: 5,
///     max_steps: 15,
///     ..Hyperparameters::default()
/// })?;
///
/// let report = learner.train()?;
/// assert_eq!(report.len(), 5);
/// // Every trajectory starts at the reset state.
/// assert!(report.trajectories().iter().all(|t| t[0] == 0));
/// // The learning artifacts stay readable after training.
/// assert_eq!(learner.values().len(), 16);
/// assert_eq!(learner.register_width(), 2);
/// # Ok::<(), QrlError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
