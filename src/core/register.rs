// src/core/register.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The state vector of one action-selection register *before* measurement.
///
/// A register of `width` qubits spans `2^width` computational basis states;
/// each basis state doubles as the binary label of one action index. The
/// amplitudes are `Complex<f64>` even though every transform used here keeps
/// them real, so the representation stays faithful to the underlying quantum
/// model and extensions with phased operators remain possible.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct RegisterState {
    /// Amplitudes over the computational basis, index = basis label.
    amplitudes: Vec<Complex<f64>>,
    /// Number of qubits in the register.
    width: usize,
}

impl RegisterState {
    /// Prepares a `width`-qubit register in uniform superposition, the
    /// Hadamard-on-every-qubit state every action circuit starts from.
    pub fn uniform(width: usize) -> Self {
        let dim = 1usize << width;
        let amp = Complex::new(1.0 / (dim as f64).sqrt(), 0.0);
        Self {
            amplitudes: vec![amp; dim],
            width,
        }
    }

    /// Provides read-only access to the amplitude vector.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of qubits in the register.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Dimension of the basis (`2^width`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Measurement probability of basis state `k`.
    pub fn probability(&self, k: usize) -> f64 {
        self.amplitudes[k].norm_sqr()
    }

    /// Oracle reflection: negates the amplitude of the marked basis state.
    pub(crate) fn phase_flip(&mut self, target: usize) {
        self.amplitudes[target] = -self.amplitudes[target];
    }

    /// Diffusion reflection: reflects every amplitude about the mean
    /// amplitude (`a -> 2*mean - a`).
    pub(crate) fn invert_about_mean(&mut self) {
        let dim = self.amplitudes.len();
        let mean = self
            .amplitudes
            .iter()
            .fold(Complex::zero(), |acc: Complex<f64>, a| acc + a)
            / (dim as f64);
        for a in self.amplitudes.iter_mut() {
            *a = 2.0 * mean - *a;
        }
    }
}

impl fmt::Display for RegisterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[")?;
        for (i, a) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, a)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    #[test]
    fn uniform_register_is_normalized() {
        for width in 1..=5 {
            let reg = RegisterState::uniform(width);
            assert_eq!(reg.dim(), 1 << width);
            let norm_sq: f64 = reg.amplitudes().iter().map(|a| a.norm_sqr()).sum();
            assert!(
                (norm_sq - 1.0).abs() < TEST_TOLERANCE,
                "width {} norm {}",
                width,
                norm_sq
            );
        }
    }

    #[test]
    fn reflections_preserve_norm() {
        let mut reg = RegisterState::uniform(3);
        reg.phase_flip(5);
        reg.invert_about_mean();
        let norm_sq: f64 = reg.amplitudes().iter().map(|a| a.norm_sqr()).sum();
        assert!((norm_sq - 1.0).abs() < TEST_TOLERANCE);
    }

    #[test]
    fn two_qubit_iterate_concentrates_on_target() {
        // One oracle + diffusion pass on a 2-qubit uniform register puts all
        // probability on the marked state.
        let mut reg = RegisterState::uniform(2);
        reg.phase_flip(3);
        reg.invert_about_mean();
        assert!((reg.probability(3) - 1.0).abs() < TEST_TOLERANCE);
        assert!(reg.probability(0) < TEST_TOLERANCE);
    }
}
