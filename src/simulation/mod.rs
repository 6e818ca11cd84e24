// src/simulation/mod.rs

//! Shot-based sampling of action circuits.
//!
//! Action selection is a single-shot measurement of a state's circuit. The
//! [`ActionSampler`] trait is the seam between the learner and the quantum
//! simulation so that tests can substitute a deterministic stub; the bundled
//! [`StatevectorSampler`] replays a circuit's transform history on a fresh
//! register and measures it exactly.

use crate::circuits::ActionCircuit;
use crate::core::{QrlError, RegisterState};
use crate::validation::check_normalization;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Samples one action from a state's circuit.
///
/// Implementations measure all qubits of the circuit's register once and
/// return the observed basis state interpreted as an unsigned action index.
pub trait ActionSampler {
    /// Performs a single-shot measurement of `circuit`.
    fn sample(&mut self, circuit: &ActionCircuit) -> Result<usize, QrlError>;
}

/// Exact statevector simulation of an action circuit.
///
/// Each call prepares a uniform superposition, applies the circuit's appended
/// Grover operators in order, and draws one basis state from the resulting
/// Born-rule distribution. The register itself is rebuilt per shot, so
/// sampling never mutates the circuit.
#[derive(Debug)]
pub struct StatevectorSampler {
    rng: StdRng,
}

impl StatevectorSampler {
    /// Creates a sampler seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::from_seed(rand::rng().random::<u64>())
    }

    /// Creates a sampler with a fixed seed for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replays `circuit` on a fresh register, without measuring.
    /// Useful for inspecting the policy distribution a circuit encodes.
    pub fn statevector(circuit: &ActionCircuit) -> Result<RegisterState, QrlError> {
        let mut register = RegisterState::uniform(circuit.width());
        for op in circuit.operations() {
            op.apply_to(&mut register)?;
        }
        Ok(register)
    }
}

impl Default for StatevectorSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSampler for StatevectorSampler {
    fn sample(&mut self, circuit: &ActionCircuit) -> Result<usize, QrlError> {
        let register = Self::statevector(circuit)?;
        check_normalization(&register, None)?;

        // Born-rule draw over the basis states.
        let p_sample: f64 = self.rng.random::<f64>();
        let mut cumulative = 0.0;
        for k in 0..register.dim() {
            cumulative += register.probability(k);
            if p_sample < cumulative {
                return Ok(k);
            }
        }
        // Floating-point slack can leave the cumulative sum a hair under 1.
        Ok(register.dim() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBank;
    use crate::grover::{GroverBank, optimal_iterations};

    #[test]
    fn bare_circuit_samples_every_action() -> Result<(), QrlError> {
        // A uniform 2-qubit register should produce all four actions over
        // enough shots.
        let bank = CircuitBank::new(1, 2);
        let mut sampler = StatevectorSampler::from_seed(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let action = sampler.sample(bank.get(0)?)?;
            assert!(action < 4);
            seen[action] = true;
        }
        assert!(seen.iter().all(|s| *s), "all basis states should occur");
        Ok(())
    }

    #[test]
    fn amplified_circuit_always_yields_target() -> Result<(), QrlError> {
        // One optimal iterate on a 2-qubit register is a certainty rotation:
        // the target action is measured regardless of the seed.
        let grovers = GroverBank::build(4, 2)?;
        let mut bank = CircuitBank::new(1, 2);
        bank.append(0, grovers.get(2)?, optimal_iterations(2))?;

        for seed in 0..20 {
            let mut sampler = StatevectorSampler::from_seed(seed);
            assert_eq!(sampler.sample(bank.get(0)?)?, 2);
        }
        Ok(())
    }

    #[test]
    fn seeded_samplers_are_reproducible() -> Result<(), QrlError> {
        let bank = CircuitBank::new(1, 3);
        let mut a = StatevectorSampler::from_seed(123);
        let mut b = StatevectorSampler::from_seed(123);
        for _ in 0..50 {
            assert_eq!(a.sample(bank.get(0)?)?, b.sample(bank.get(0)?)?);
        }
        Ok(())
    }

    #[test]
    fn statevector_reflects_appended_history() -> Result<(), QrlError> {
        let grovers = GroverBank::build(8, 3)?;
        let mut bank = CircuitBank::new(1, 3);
        bank.append(0, grovers.get(5)?, optimal_iterations(3))?;
        let register = StatevectorSampler::statevector(bank.get(0)?)?;
        // Two iterates on 3 qubits push the marked state close to certainty.
        assert!(register.probability(5) > 0.9);
        Ok(())
    }
}
