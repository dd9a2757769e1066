//! Plain reductions over numeric sequences.

use alloc::vec::Vec;

use crate::DomainError;

/// Largest element of `values`.
///
/// Incomparable elements (e.g., NaN) never replace the running maximum.
///
/// # Errors
///
/// Returns [`DomainError::EmptyInput`] if `values` is empty.
pub fn max<T: PartialOrd + Copy>(values: &[T]) -> Result<T, DomainError> {
    let (&first, rest) = values.split_first().ok_or(DomainError::EmptyInput)?;
    Ok(rest
        .iter()
        .fold(first, |acc, &x| if x > acc { x } else { acc }))
}

/// Smallest element of `values`.
///
/// # Errors
///
/// Returns [`DomainError::EmptyInput`] if `values` is empty.
pub fn min<T: PartialOrd + Copy>(values: &[T]) -> Result<T, DomainError> {
    let (&first, rest) = values.split_first().ok_or(DomainError::EmptyInput)?;
    Ok(rest
        .iter()
        .fold(first, |acc, &x| if x < acc { x } else { acc }))
}

/// The `p`-norm `(Σ|x|^p)^(1/p)` of `values`.
///
/// The norm of an empty sequence is zero.
///
/// # Errors
///
/// Returns [`DomainError::InvalidExponent`] unless `p >= 1`.
pub fn p_norm(p: f64, values: &[f64]) -> Result<f64, DomainError> {
    if p.is_nan() || p < 1.0 {
        return Err(DomainError::InvalidExponent);
    }
    let sum = values
        .iter()
        .map(|&x| libm::pow(libm::fabs(x), p))
        .sum::<f64>();
    Ok(libm::pow(sum, 1.0 / p))
}

/// Returns `values` divided by their `p`-norm.
///
/// A sequence with norm zero is returned unchanged.
///
/// # Errors
///
/// Returns [`DomainError::InvalidExponent`] unless `p >= 1`.
pub fn p_normalized(p: f64, values: &[f64]) -> Result<Vec<f64>, DomainError> {
    let norm = p_norm(p, values)?;
    if norm == 0.0 {
        return Ok(values.to_vec());
    }
    Ok(values.iter().map(|&x| x / norm).collect())
}

/// Maps `value` into the closed interval `[min_value, min_value + period]` by adding an
/// integer multiple of `period`.
///
/// The reduction goes through the angle of a point on the unit circle, so values that are
/// (up to floating point errors) congruent to `min_value` may end up at either end of
/// the interval. All other values land strictly inside it.
///
/// # Errors
///
/// Returns [`DomainError::NonPositiveModulus`] unless `period` is finite and positive.
///
/// # Example
///
/// ```
/// use core::f64::consts::PI;
/// use qarith::reduce::real_mod;
///
/// let angle = real_mod(5.0 * PI / 2.0, 2.0 * PI, -PI).unwrap();
/// assert!((angle - PI / 2.0).abs() < 1e-12);
/// ```
pub fn real_mod(value: f64, period: f64, min_value: f64) -> Result<f64, DomainError> {
    if !period.is_finite() || period <= 0.0 {
        return Err(DomainError::NonPositiveModulus);
    }
    let tau = 2.0 * core::f64::consts::PI;
    let angle = tau * ((value - min_value) / period - 0.5);
    let fraction = 0.5 + libm::atan2(libm::sin(angle), libm::cos(angle)) / tau;
    Ok(min_value + fraction * period)
}
