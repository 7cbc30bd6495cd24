//! Dilation factor math for the relativistic clock model
//!
//! Pure, stateless functions over scalar inputs:
//! - `kinematic_factor` – special-relativistic Lorentz factor
//! - `gravitational_factor` – weak-field Schwarzschild-style factor
//! - `combined_factor` – multiplicative composition across all sources
//!
//! Invalid physical input is rejected with [`DomainError`] instead of
//! letting NaN/Infinity leak into accumulated clock state

use crate::simulation::error::DomainError;

/// Lorentz factor `1 / sqrt(1 - (v/c)^2)` for a scalar speed
///
/// Always >= 1 on the valid range and strictly increasing in `|v|`.
/// Fails with [`DomainError::SuperluminalSpeed`] when `|v| >= c`
pub fn kinematic_factor(velocity: f64, c: f64) -> Result<f64, DomainError> {
    // A non-finite speed or a degenerate c can never be sub-luminal
    if !velocity.is_finite() || !(c > 0.0) || velocity.abs() >= c {
        return Err(DomainError::SuperluminalSpeed { speed: velocity, c });
    }

    let beta = velocity / c;
    Ok(1.0 / (1.0 - beta * beta).sqrt())
}

/// Weak-field gravitational factor `sqrt(1 - 2*G*m/(r*c^2))` in (0, 1]
///
/// The square-root argument is floored at 0 and the result at that floor is
/// defined as exactly 1: a source close enough to put the observer "inside
/// the horizon" of the approximation contributes no dilation instead of a
/// non-real number
///
/// Fails with a [`DomainError`] when `distance <= 0` or `mass <= 0`
pub fn gravitational_factor(mass: f64, distance: f64, G: f64, c: f64) -> Result<f64, DomainError> {
    if !(distance > 0.0) {
        return Err(DomainError::NonPositiveDistance(distance));
    }
    if !(mass > 0.0) {
        return Err(DomainError::NonPositiveMass(mass));
    }

    // rs_over_r = 2Gm / (r c^2), the Schwarzschild term of the approximation
    let rs_over_r = 2.0 * G * mass / (distance * c * c);
    let arg = 1.0 - rs_over_r;

    if arg <= 0.0 {
        // Degenerate input: factor floored to exactly 1 (no dilation)
        return Ok(1.0);
    }

    Ok(arg.sqrt())
}

/// Product of the kinematic factor and every gravitational factor
///
/// Multiplication is commutative, so source ordering only affects
/// floating-point rounding, never correctness
pub fn combined_factor(kinematic: f64, gravitationals: &[f64]) -> f64 {
    gravitationals.iter().fold(kinematic, |acc, g| acc * g)
}
