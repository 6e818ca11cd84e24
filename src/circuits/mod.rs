// src/circuits/mod.rs

//! Per-state action-selection circuits.
//!
//! Every discrete state owns one [`ActionCircuit`]: a `width`-qubit register
//! prepared in uniform superposition plus an append-only history of Grover
//! operators. The circuit *is* the policy for its state — measuring it yields
//! an action — and training sharpens it purely by appending amplification
//! operators. There is no rollback; over-amplification is prevented entirely
//! at the scheduling layer, never here.

use crate::core::QrlError;
use crate::grover::GroverOperator;
use std::fmt;

/// One state's action-selection circuit.
///
/// Analogy: a `qiskit.QuantumCircuit` holding an initial layer of Hadamards
/// followed by appended `GroverOperator` instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCircuit {
    /// Register width in qubits.
    width: usize,
    /// Identifying name, `|as_{state}>`.
    name: String,
    /// Appended amplification operators, in application order. The uniform
    /// superposition preparation is implicit and always first.
    ops: Vec<GroverOperator>,
}

impl ActionCircuit {
    pub(crate) fn new(state: usize, width: usize) -> Self {
        Self {
            width,
            name: format!("|as_{}>", state),
            ops: Vec::new(),
        }
    }

    /// Register width in qubits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Identifying name of this circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The appended operator history, in application order.
    pub fn operations(&self) -> &[GroverOperator] {
        &self.ops
    }

    /// Number of appended amplification operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if no operators have been appended yet (the circuit is
    /// still the bare uniform superposition).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn append(&mut self, op: &GroverOperator, times: i64) -> Result<(), QrlError> {
        if op.width() != self.width {
            return Err(QrlError::Simulation {
                message: format!(
                    "Cannot append {}: operator width {} does not match circuit {} width {}",
                    op,
                    op.width(),
                    self.name,
                    self.width
                ),
            });
        }
        // A non-positive count appends nothing; the scheduler produces
        // negative targets when the quality signal is negative.
        for _ in 0..times {
            self.ops.push(op.clone());
        }
        Ok(())
    }
}

impl fmt::Display for ActionCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: H⊗{}", self.name, self.width)?;
        // Collapse runs of the same operator into a power for readability.
        let mut i = 0;
        while i < self.ops.len() {
            let op = &self.ops[i];
            let mut run = 1;
            while i + run < self.ops.len() && self.ops[i + run] == *op {
                run += 1;
            }
            if run == 1 {
                write!(f, " · {}", op)?;
            } else {
                write!(f, " · {}^{}", op, run)?;
            }
            i += run;
        }
        Ok(())
    }
}

/// The circuit bank: exclusive owner of one mutable [`ActionCircuit`] per
/// state, created at learner construction and alive for the whole run.
#[derive(Debug, Clone)]
pub struct CircuitBank {
    circuits: Vec<ActionCircuit>,
}

impl CircuitBank {
    /// Creates `state_count` circuits, each a `width`-qubit register in
    /// uniform superposition.
    pub fn new(state_count: usize, width: usize) -> Self {
        let circuits = (0..state_count)
            .map(|state| ActionCircuit::new(state, width))
            .collect();
        Self { circuits }
    }

    /// Borrows the circuit for `state`.
    pub fn get(&self, state: usize) -> Result<&ActionCircuit, QrlError> {
        self.circuits.get(state).ok_or_else(|| QrlError::ContractViolation {
            message: format!(
                "State {} has no action circuit (state space size {})",
                state,
                self.circuits.len()
            ),
        })
    }

    /// Appends `times` copies of `op` onto the circuit for `state`.
    /// A no-op when `times <= 0`.
    pub fn append(&mut self, state: usize, op: &GroverOperator, times: i64) -> Result<(), QrlError> {
        let len = self.circuits.len();
        let circuit = self
            .circuits
            .get_mut(state)
            .ok_or_else(|| QrlError::ContractViolation {
                message: format!(
                    "State {} has no action circuit (state space size {})",
                    state, len
                ),
            })?;
        circuit.append(op, times)
    }

    /// Number of circuits (the state-space size).
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Returns `true` if the bank holds no circuits.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Iterates over the circuits in state order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionCircuit> {
        self.circuits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grover::GroverOperator;

    #[test]
    fn bank_starts_with_bare_circuits() -> Result<(), QrlError> {
        let bank = CircuitBank::new(4, 2);
        assert_eq!(bank.len(), 4);
        for state in 0..4 {
            let circ = bank.get(state)?;
            assert!(circ.is_empty());
            assert_eq!(circ.width(), 2);
        }
        assert_eq!(bank.get(0)?.name(), "|as_0>");
        Ok(())
    }

    #[test]
    fn append_extends_history_in_order() -> Result<(), QrlError> {
        let mut bank = CircuitBank::new(2, 2);
        let g1 = GroverOperator::new(1, 2)?;
        let g3 = GroverOperator::new(3, 2)?;
        bank.append(0, &g1, 2)?;
        bank.append(0, &g3, 1)?;
        let circ = bank.get(0)?;
        assert_eq!(circ.len(), 3);
        assert_eq!(circ.operations()[0].target(), 1);
        assert_eq!(circ.operations()[2].target(), 3);
        // The other state's circuit is untouched.
        assert!(bank.get(1)?.is_empty());
        Ok(())
    }

    #[test]
    fn non_positive_counts_append_nothing() -> Result<(), QrlError> {
        let mut bank = CircuitBank::new(1, 2);
        let g0 = GroverOperator::new(0, 2)?;
        bank.append(0, &g0, 0)?;
        bank.append(0, &g0, -5)?;
        assert!(bank.get(0)?.is_empty());
        Ok(())
    }

    #[test]
    fn display_collapses_repeated_operators() -> Result<(), QrlError> {
        let mut bank = CircuitBank::new(1, 2);
        let g2 = GroverOperator::new(2, 2)?;
        bank.append(0, &g2, 3)?;
        assert_eq!(format!("{}", bank.get(0)?), "|as_0>: H⊗2 · G(|10>)^3");
        Ok(())
    }

    #[test]
    fn width_mismatch_is_rejected() -> Result<(), QrlError> {
        let mut bank = CircuitBank::new(1, 3);
        let g0 = GroverOperator::new(0, 2)?;
        assert!(matches!(
            bank.append(0, &g0, 1),
            Err(QrlError::Simulation { .. })
        ));
        Ok(())
    }
}
