// src/learner/mod.rs

//! The Grover-enhanced reinforcement learner.
//!
//! [`GroverLearner`] ties the pieces together: per-state action circuits are
//! measured to select actions, the environment supplies transitions, a
//! temporal-difference rule updates the state-value table, and the
//! amplification schedule appends Grover operators so that well-rewarded
//! actions become more probable on the next visit. Value table, schedule,
//! and circuits all persist across epochs; only the episode cursor and the
//! trajectory reset.

mod hyperparams;
mod schedule;
mod value;

pub use hyperparams::Hyperparameters;
pub use schedule::AmplificationSchedule;
pub use value::ValueTable;

use crate::circuits::CircuitBank;
use crate::core::QrlError;
use crate::env::Environment;
use crate::grover::{GroverBank, optimal_iterations};
use crate::simulation::{ActionSampler, StatevectorSampler};
use log::{debug, info};
use std::fmt;

/// Reward shaping constants applied on top of the environment's own reward.
const STALL_PENALTY: f64 = 10.0;
const GOAL_BONUS: f64 = 99.0;
const STEP_COST: f64 = 1.0;

/// Per-epoch trajectories produced by [`GroverLearner::train`].
///
/// Epochs are dense indices, so trajectories are stored in epoch order; each
/// trajectory is the ordered sequence of visited states, starting at the
/// reset state. Purely observational — nothing feeds back into learning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingReport {
    trajectories: Vec<Vec<usize>>,
}

impl TrainingReport {
    /// The trajectory recorded for `epoch`, if that epoch ran.
    pub fn trajectory(&self, epoch: usize) -> Option<&[usize]> {
        self.trajectories.get(epoch).map(Vec::as_slice)
    }

    /// All trajectories in epoch order.
    pub fn trajectories(&self) -> &[Vec<usize>] {
        &self.trajectories
    }

    /// Number of epochs trained.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Returns `true` if no epochs were trained.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training Report ({} epochs)", self.len())?;
        for (epoch, traj) in self.trajectories.iter().enumerate() {
            writeln!(f, "  epoch_{}: {:?}", epoch, traj)?;
        }
        Ok(())
    }
}

/// Tabular reinforcement learner with a quantum measurement-based policy.
///
/// Generic over the environment and over the sampling collaborator so tests
/// can script both. All mutable learning state (value table, step targets,
/// saturation flags, circuits) is owned by the learner instance; the design
/// assumes a single sequential training loop with no concurrent callers.
pub struct GroverLearner<E: Environment, S: ActionSampler> {
    env: E,
    sampler: S,
    obs_dim: usize,
    acts_dim: usize,
    register_width: usize,
    hyperparams: Hyperparameters,
    values: ValueTable,
    schedule: AmplificationSchedule,
    operators: GroverBank,
    circuits: CircuitBank,
    /// Current-episode cursors, reset each epoch.
    state: usize,
    action: usize,
}

impl<E: Environment> GroverLearner<E, StatevectorSampler> {
    /// Creates a learner over `env` with an entropy-seeded statevector
    /// sampler.
    pub fn new(env: E) -> Result<Self, QrlError> {
        Self::with_sampler(env, StatevectorSampler::new())
    }
}

impl<E: Environment, S: ActionSampler> GroverLearner<E, S> {
    /// Creates a learner over `env` using `sampler` for action selection.
    ///
    /// Builds the full Grover operator bank and one uniform-superposition
    /// circuit per state up front; neither is ever rebuilt.
    ///
    /// # Errors
    /// Returns `QrlError::Configuration` if the observation space is empty or
    /// the action space has fewer than two actions (a zero-qubit register
    /// cannot be amplified).
    pub fn with_sampler(env: E, sampler: S) -> Result<Self, QrlError> {
        let obs_dim = env.observation_space_size();
        let acts_dim = env.action_space_size();
        if obs_dim == 0 {
            return Err(QrlError::Configuration {
                message: "Observation space must contain at least one state".to_string(),
            });
        }
        if acts_dim < 2 {
            return Err(QrlError::Configuration {
                message: format!(
                    "Action space must contain at least two actions for amplification, got {}",
                    acts_dim
                ),
            });
        }

        // Qubits needed to address every action as a basis state.
        let register_width = acts_dim.next_power_of_two().trailing_zeros() as usize;
        let max_steps = optimal_iterations(register_width);

        Ok(Self {
            env,
            sampler,
            obs_dim,
            acts_dim,
            register_width,
            hyperparams: Hyperparameters::default(),
            values: ValueTable::new(obs_dim),
            schedule: AmplificationSchedule::new(obs_dim, acts_dim, max_steps),
            operators: GroverBank::build(acts_dim, register_width)?,
            circuits: CircuitBank::new(obs_dim, register_width),
            state: 0,
            action: 0,
        })
    }

    /// Replaces the configuration after validating it.
    pub fn set_hyperparams(&mut self, hyperparams: Hyperparameters) -> Result<(), QrlError> {
        hyperparams.validate()?;
        self.hyperparams = hyperparams;
        Ok(())
    }

    /// Runs the full training schedule and returns the per-epoch
    /// trajectories. The learner's value table, schedule, and circuits
    /// remain readable afterwards through the accessors.
    pub fn train(&mut self) -> Result<TrainingReport, QrlError> {
        let hp = self.hyperparams.clone();
        let mut trajectories = Vec::with_capacity(hp.max_epochs);
        // Shared across epochs: shrinks permanently once the goal is reached
        // in fewer steps.
        let mut optimal_steps = hp.max_steps;

        for epoch in 0..hp.max_epochs {
            if epoch % 100 == 0 {
                info!("processing epoch {}/{}", epoch, hp.max_epochs);
            }

            let initial_state = self.env.reset();
            self.state = self.checked_state(initial_state)?;
            let mut trajectory = vec![self.state];

            for step in 0..optimal_steps {
                self.action = self.select_action()?;
                let transition = self.env.step(self.action);
                let next_state = self.checked_state(transition.next_state)?;

                // Reward shaping: stalling is punished and ends the episode,
                // reaching the goal pays a bonus and tightens the budget for
                // every remaining epoch, any other non-terminal move costs a
                // step.
                let mut reward = transition.reward;
                let mut terminated = transition.terminated;
                if next_state == self.state {
                    reward -= STALL_PENALTY;
                    terminated = true;
                } else if next_state == self.obs_dim - 1 {
                    reward += GOAL_BONUS;
                    optimal_steps = step + 1;
                } else if !terminated {
                    reward -= STEP_COST;
                }

                self.values
                    .update(self.state, reward, next_state, hp.alpha, hp.gamma);
                let steps = self
                    .schedule
                    .steps_for(hp.k, reward, self.values.get(next_state));
                self.schedule.set_target(self.state, self.action, steps);
                self.schedule
                    .apply(self.state, self.action, &self.operators, &mut self.circuits)?;

                debug!(
                    "epoch {} step {}: s={} a={} -> s'={} r={:.2} grover_steps={}",
                    epoch, step, self.state, self.action, next_state, reward, steps
                );
                if hp.graphics {
                    self.env.render();
                }

                trajectory.push(next_state);
                if terminated {
                    break;
                }
                self.state = next_state;
            }

            trajectories.push(trajectory);
        }

        Ok(TrainingReport { trajectories })
    }

    /// Measures the current state's circuit and interprets the observed
    /// basis state as an action index.
    fn select_action(&mut self) -> Result<usize, QrlError> {
        let action = self.sampler.sample(self.circuits.get(self.state)?)?;
        if action >= self.acts_dim {
            // Possible when 2^width > A: the register collapsed onto a
            // padding basis state no action corresponds to.
            return Err(QrlError::ContractViolation {
                message: format!(
                    "Measured basis state {} has no action (action space size {}, register width {})",
                    action, self.acts_dim, self.register_width
                ),
            });
        }
        Ok(action)
    }

    fn checked_state(&self, state: usize) -> Result<usize, QrlError> {
        if state >= self.obs_dim {
            return Err(QrlError::ContractViolation {
                message: format!(
                    "Environment produced state {} outside the observation space [0, {})",
                    state, self.obs_dim
                ),
            });
        }
        Ok(state)
    }

    /// The state-value table.
    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Step targets and saturation flags.
    pub fn schedule(&self) -> &AmplificationSchedule {
        &self.schedule
    }

    /// The per-state action circuits.
    pub fn circuits(&self) -> &CircuitBank {
        &self.circuits
    }

    /// The immutable Grover operator bank.
    pub fn operators(&self) -> &GroverBank {
        &self.operators
    }

    /// The active configuration.
    pub fn hyperparams(&self) -> &Hyperparameters {
        &self.hyperparams
    }

    /// Width of every action register in qubits (`ceil(log2(A))`).
    pub fn register_width(&self) -> usize {
        self.register_width
    }

    /// The per-visit amplification cap (the theoretical Grover optimum for
    /// this register width).
    pub fn max_amplification_steps(&self) -> i64 {
        self.schedule.max_steps()
    }

    /// Borrows the environment collaborator.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Consumes the learner and returns the environment.
    pub fn into_env(self) -> E {
        self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Transition;

    /// Minimal two-state environment: action 0 reaches the goal, action 1
    /// stays put.
    struct TwoState {
        state: usize,
    }

    impl Environment for TwoState {
        fn reset(&mut self) -> usize {
            self.state = 0;
            0
        }
        fn step(&mut self, action: usize) -> Transition {
            let next_state = if action == 0 { 1 } else { self.state };
            let terminated = next_state == 1;
            self.state = next_state;
            Transition {
                next_state,
                reward: 0.0,
                terminated,
                truncated: false,
            }
        }
        fn observation_space_size(&self) -> usize {
            2
        }
        fn action_space_size(&self) -> usize {
            2
        }
    }

    #[test]
    fn register_width_is_minimal() -> Result<(), QrlError> {
        // For all A >= 2: 2^w >= A and 2^(w-1) < A.
        struct Sized(usize);
        impl Environment for Sized {
            fn reset(&mut self) -> usize {
                0
            }
            fn step(&mut self, _action: usize) -> Transition {
                Transition {
                    next_state: 0,
                    reward: 0.0,
                    terminated: true,
                    truncated: false,
                }
            }
            fn observation_space_size(&self) -> usize {
                1
            }
            fn action_space_size(&self) -> usize {
                self.0
            }
        }

        for a in 2..=64 {
            let learner = GroverLearner::with_sampler(Sized(a), StatevectorSampler::from_seed(0))?;
            let w = learner.register_width();
            assert!(1usize << w >= a, "A={} w={}", a, w);
            assert!(1usize << (w - 1) < a, "A={} w={} not minimal", a, w);
        }
        Ok(())
    }

    #[test]
    fn max_steps_depends_only_on_register_width() -> Result<(), QrlError> {
        let a = GroverLearner::with_sampler(TwoState { state: 0 }, StatevectorSampler::from_seed(1))?;
        let b = GroverLearner::with_sampler(TwoState { state: 0 }, StatevectorSampler::from_seed(2))?;
        assert_eq!(a.max_amplification_steps(), b.max_amplification_steps());
        Ok(())
    }

    #[test]
    fn single_action_space_is_rejected() {
        struct OneAction;
        impl Environment for OneAction {
            fn reset(&mut self) -> usize {
                0
            }
            fn step(&mut self, _action: usize) -> Transition {
                Transition {
                    next_state: 0,
                    reward: 0.0,
                    terminated: true,
                    truncated: false,
                }
            }
            fn observation_space_size(&self) -> usize {
                1
            }
            fn action_space_size(&self) -> usize {
                1
            }
        }
        let err = GroverLearner::with_sampler(OneAction, StatevectorSampler::from_seed(0))
            .err()
            .unwrap();
        assert!(matches!(err, QrlError::Configuration { .. }));
    }

    #[test]
    fn invalid_hyperparameters_are_rejected_before_training() -> Result<(), QrlError> {
        let mut learner =
            GroverLearner::with_sampler(TwoState { state: 0 }, StatevectorSampler::from_seed(0))?;
        let result = learner.set_hyperparams(Hyperparameters {
            alpha: 2.0,
            ..Hyperparameters::default()
        });
        assert!(matches!(
            result,
            Err(QrlError::InvalidHyperparameter { name: "alpha", .. })
        ));
        // The previous (default) configuration is still in force.
        assert_eq!(learner.hyperparams().alpha, 0.05);
        Ok(())
    }
}
