// src/validation/mod.rs

//! Sanity checks on register states.

use crate::core::{QrlError, RegisterState};

/// Default allowed deviation of the squared norm from 1.0.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the register is normalized (sum of squared amplitudes ≈ 1.0).
///
/// Every transform the crate applies is a reflection, so a failure here means
/// the simulation itself has drifted and any measurement drawn from the state
/// would be meaningless.
///
/// # Arguments
/// * `register` - The `RegisterState` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to [`DEFAULT_NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QrlError::Simulation)` if normalization fails.
pub fn check_normalization(register: &RegisterState, tolerance: Option<f64>) -> Result<(), QrlError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = register.amplitudes().iter().map(|a| a.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QrlError::Simulation {
            message: format!(
                "Register normalization failed. Sum(|a_i|^2) = {} (deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_registers_pass() {
        for width in 1..=4 {
            assert!(check_normalization(&RegisterState::uniform(width), None).is_ok());
        }
    }

    #[test]
    fn loose_tolerance_is_respected() {
        let reg = RegisterState::uniform(2);
        assert!(check_normalization(&reg, Some(1e-3)).is_ok());
    }
}
