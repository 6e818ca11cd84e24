//! Error handling logic

use std::fmt;

/// Error types covering every way a training run can fail.
///
/// All variants are unrecoverable for the current run: the learner has no
/// retry semantics, since each step is deterministic given its inputs apart
/// from the inherent randomness of measurement, which is expected and never
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum QrlError {
    /// The learner cannot be constructed from the given spaces.
    /// Raised for empty state/action spaces and for single-action spaces,
    /// where the action register would have zero qubits and amplitude
    /// amplification is undefined.
    Configuration {
        /// Configuration failure message
        message: String,
    },

    /// A hyperparameter lies outside its documented range.
    /// Reported when the configuration is set, not deferred to training.
    InvalidHyperparameter {
        /// Name of the offending knob
        name: &'static str,
        /// InvalidHyperparameter failure message
        message: String,
    },

    /// A collaborator broke its interface contract, e.g. the environment
    /// returned a state index outside the declared observation space, or a
    /// register measurement collapsed onto a padding basis state with no
    /// corresponding action. Propagated, never clamped.
    ContractViolation {
        /// ContractViolation failure message
        message: String,
    },

    /// General error encountered while simulating a register, such as an
    /// operator/register width mismatch or normalization drift.
    Simulation {
        /// Simulation failure message
        message: String,
    },
}

impl fmt::Display for QrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrlError::Configuration { message } => write!(f, "Configuration Error: {}", message),
            QrlError::InvalidHyperparameter { name, message } => {
                write!(f, "Invalid Hyperparameter '{}': {}", name, message)
            }
            QrlError::ContractViolation { message } => {
                write!(f, "Contract Violation: {}", message)
            }
            QrlError::Simulation { message } => write!(f, "Simulation Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for QrlError {}
