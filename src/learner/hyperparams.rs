// src/learner/hyperparams.rs

use crate::core::QrlError;

/// The learner's configuration knobs.
///
/// Defaults match a conservative maze-learning setup; callers usually
/// override a few fields with struct-update syntax. Every field is validated
/// when handed to the learner, never during training.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperparameters {
    /// Amplification gain: signed scalar multiplying the one-step quality
    /// signal `reward + v(next_state)` when scheduling Grover iterations.
    pub k: f64,
    /// Learning rate for the temporal-difference update, in `(0, 1]`.
    pub alpha: f64,
    /// Discount factor, in `[0, 1]`.
    pub gamma: f64,
    /// Reserved exploration threshold. Accepted and kept for forward
    /// compatibility; no scheduling logic reads it yet.
    pub eps: f64,
    /// Number of training epochs (episodes).
    pub max_epochs: usize,
    /// Per-episode step budget. Shrinks for the rest of the run once the
    /// goal is reached in fewer steps.
    pub max_steps: usize,
    /// Render the environment after each step. No effect on learning.
    pub graphics: bool,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            k: -1.0,
            alpha: 0.05,
            gamma: 0.99,
            eps: 0.01,
            max_epochs: 1000,
            max_steps: 100,
            graphics: false,
        }
    }
}

impl Hyperparameters {
    /// Checks every knob against its documented range.
    pub fn validate(&self) -> Result<(), QrlError> {
        if !self.k.is_finite() {
            return Err(QrlError::InvalidHyperparameter {
                name: "k",
                message: format!("amplification gain must be finite, got {}", self.k),
            });
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(QrlError::InvalidHyperparameter {
                name: "alpha",
                message: format!("learning rate must lie in (0, 1], got {}", self.alpha),
            });
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(QrlError::InvalidHyperparameter {
                name: "gamma",
                message: format!("discount factor must lie in [0, 1], got {}", self.gamma),
            });
        }
        if !self.eps.is_finite() {
            return Err(QrlError::InvalidHyperparameter {
                name: "eps",
                message: format!("exploration threshold must be finite, got {}", self.eps),
            });
        }
        if self.max_epochs == 0 {
            return Err(QrlError::InvalidHyperparameter {
                name: "max_epochs",
                message: "epoch budget must be positive".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(QrlError::InvalidHyperparameter {
                name: "max_steps",
                message: "per-episode step budget must be positive".to_string(),
            });
        }
        Ok(())
    }
}
