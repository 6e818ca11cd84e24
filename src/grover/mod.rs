// src/grover/mod.rs

//! Grover amplitude-amplification operators for action registers.
//!
//! Each discrete action index is encoded as one computational basis state of
//! the action register. [`GroverOperator`] is the canonical two-reflection
//! Grover iterate for a single marked basis state: an oracle that phase-flips
//! the target, followed by the diffusion reflection about the mean. Applied
//! repeatedly it rotates the register toward the target, which is why the
//! number of applications must be capped at [`optimal_iterations`] — past
//! that point the rotation carries the register away from the target again.

use crate::core::{QrlError, RegisterState};
use std::f64::consts::PI;
use std::fmt;

/// The theoretical optimal number of Grover iterations for a single marked
/// state in a `width`-qubit register: `round(π / (4·asin(2^(−width/2))) − ½)`.
///
/// Pure in `width`; the learner computes it once and never per state. For a
/// 1-qubit register the expression is exactly ½ in real arithmetic but lands
/// just above it in f64, so the result is 1 — a single iterate on 2 basis
/// states leaves the distribution uniform, and the schedule saturates on the
/// first visit.
pub fn optimal_iterations(width: usize) -> i64 {
    let dim = (1u64 << width) as f64;
    (PI / (4.0 * (1.0 / dim.sqrt()).asin()) - 0.5).round_ties_even() as i64
}

/// An immutable single-target amplitude-amplification operator.
///
/// Built once per action at learner initialization from the action's
/// zero-padded, most-significant-bit-first binary label, and shared read-only
/// across all states and epochs. Appending copies of it to an action circuit
/// is the only way a policy ever changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroverOperator {
    /// Marked basis state; equals the action index it amplifies.
    target: usize,
    /// Register width the operator acts on.
    width: usize,
    /// Binary label of the target, MSB first, e.g. `"01"` for action 1 on a
    /// 2-qubit register.
    label: String,
}

impl GroverOperator {
    /// Builds the iterate marking `target` on a `width`-qubit register.
    ///
    /// # Errors
    /// Returns `QrlError::Configuration` if `target` is not addressable by
    /// `width` qubits.
    pub fn new(target: usize, width: usize) -> Result<Self, QrlError> {
        if width == 0 {
            return Err(QrlError::Configuration {
                message: "Grover operator requires a register of at least one qubit".to_string(),
            });
        }
        let dim = 1usize << width;
        if target >= dim {
            return Err(QrlError::Configuration {
                message: format!(
                    "Target basis state {} is not addressable by a {}-qubit register (dim {})",
                    target, width, dim
                ),
            });
        }
        let label = format!("{:0width$b}", target, width = width);
        Ok(Self {
            target,
            width,
            label,
        })
    }

    /// The marked basis state (the action index this operator favours).
    pub fn target(&self) -> usize {
        self.target
    }

    /// Register width this operator acts on.
    pub fn width(&self) -> usize {
        self.width
    }

    /// MSB-first binary label of the marked state.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Applies one oracle + diffusion pass to `register` in place.
    ///
    /// # Errors
    /// Returns `QrlError::Simulation` if the register width does not match
    /// the operator's.
    pub fn apply_to(&self, register: &mut RegisterState) -> Result<(), QrlError> {
        if register.width() != self.width {
            return Err(QrlError::Simulation {
                message: format!(
                    "Operator G(|{}>) acts on {} qubits but register has {}",
                    self.label,
                    self.width,
                    register.width()
                ),
            });
        }
        register.phase_flip(self.target);
        register.invert_about_mean();
        Ok(())
    }
}

impl fmt::Display for GroverOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G(|{}>)", self.label)
    }
}

/// The operator bank: one [`GroverOperator`] per possible action, built once
/// at learner initialization and never rebuilt.
#[derive(Debug, Clone)]
pub struct GroverBank {
    operators: Vec<GroverOperator>,
}

impl GroverBank {
    /// Builds operators for every action index in `[0, action_count)`.
    pub fn build(action_count: usize, width: usize) -> Result<Self, QrlError> {
        let mut operators = Vec::with_capacity(action_count);
        for action in 0..action_count {
            operators.push(GroverOperator::new(action, width)?);
        }
        Ok(Self { operators })
    }

    /// Borrows the operator for `action`.
    ///
    /// # Errors
    /// Returns `QrlError::ContractViolation` if `action` is outside the bank,
    /// which indicates a caller bug rather than a learner state.
    pub fn get(&self, action: usize) -> Result<&GroverOperator, QrlError> {
        self.operators.get(action).ok_or_else(|| QrlError::ContractViolation {
            message: format!(
                "Action {} has no Grover operator (action space size {})",
                action,
                self.operators.len()
            ),
        })
    }

    /// Number of operators in the bank (the action-space size).
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns `true` if the bank holds no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_iterations_matches_known_widths() {
        // Width 1 is ½ in real arithmetic but a hair above it in f64.
        assert_eq!(optimal_iterations(1), 1);
        assert_eq!(optimal_iterations(2), 1);
        assert_eq!(optimal_iterations(3), 2);
        assert_eq!(optimal_iterations(4), 3);
    }

    #[test]
    fn labels_are_zero_padded_msb_first() -> Result<(), QrlError> {
        let op = GroverOperator::new(1, 3)?;
        assert_eq!(op.label(), "001");
        assert_eq!(format!("{}", op), "G(|001>)");
        Ok(())
    }

    #[test]
    fn rejects_target_outside_register() {
        let err = GroverOperator::new(4, 2).unwrap_err();
        assert!(matches!(err, QrlError::Configuration { .. }));
    }

    #[test]
    fn width_mismatch_is_a_simulation_error() -> Result<(), QrlError> {
        let op = GroverOperator::new(0, 2)?;
        let mut reg = RegisterState::uniform(3);
        let err = op.apply_to(&mut reg).unwrap_err();
        assert!(matches!(err, QrlError::Simulation { .. }));
        Ok(())
    }

    #[test]
    fn bank_holds_one_operator_per_action() -> Result<(), QrlError> {
        let bank = GroverBank::build(3, 2)?;
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.get(2)?.target(), 2);
        assert!(matches!(
            bank.get(3),
            Err(QrlError::ContractViolation { .. })
        ));
        Ok(())
    }
}
