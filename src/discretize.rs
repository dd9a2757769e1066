//! Fixed point discretization of probability distributions into alias tables.
//!
//! A quantum state preparation routine cannot load arbitrary real amplitudes; it needs
//! each probability as an integer with a fixed number of bits, and the integers have to
//! add up *exactly* to a known total. [`discretize`] turns a vector of non-negative real
//! weights into such a histogram and, at the same time, into an alias table that can be
//! sampled in constant time (see [`DiscretizedHistogram`]).
//!
//! # Algorithm
//!
//! 1. Each weight is scaled so that all of them together fill `N` bars of height
//!    `H = 2^bits - 1`, and rounded to the nearest integer.
//! 2. The rounding drift (a few units at most) is corrected one unit at a time, walking
//!    the slots in index order.
//! 3. Slots above `H` ("sources") repeatedly pour their excess into slots below `H`
//!    ("sinks"). Each sink gets filled up exactly once, and records the source it was
//!    filled from as its alternate index. The sink's own coefficient stays as it is (it
//!    is the part of the slot that the sink keeps), while the source's coefficient drops
//!    by the amount it gave away.
//!
//! Each transfer settles the sink it fills for good, so there are at most `N - 1`
//! transfers in total.
//!
//! # Example
//!
//! ```
//! use qarith::discretize::discretize_bits;
//!
//! let histogram = discretize_bits(2, &[1.0, 1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(histogram.bar_height(), 3);
//! assert_eq!(histogram.one_norm(), 4.0);
//! assert_eq!(histogram.keep_coefficients(), [3, 3, 3, 3]);
//! assert_eq!(histogram.alternate_indices(), [0, 1, 2, 3]);
//! ```

mod histogram;
mod precision;

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::DomainError;

pub use histogram::DiscretizedHistogram;
pub use precision::Precision;

/// Discretizes `weights` into a histogram with `precision` bits per slot.
///
/// The sign of each weight is ignored, i.e., only its magnitude matters.
///
/// # Errors
///
/// - [`DomainError::TooFewWeights`] if `weights.len() < 2`;
/// - [`DomainError::NonFiniteWeight`] if any weight is NaN or infinite;
/// - [`DomainError::ZeroNorm`] if all weights are zero;
/// - [`DomainError::NormOverflow`] if the sum of all magnitudes is not representable.
///
/// # Example
///
/// ```
/// use qarith::discretize::{discretize, Precision};
///
/// let weights = [0.1, 0.2, 0.3, 0.4];
/// let histogram = discretize(Precision::new(10).unwrap(), &weights).unwrap();
///
/// let bar_height = histogram.bar_height() as u64;
/// let total = histogram.masses().iter().sum::<u64>();
/// assert_eq!(total, weights.len() as u64 * bar_height);
///
/// for (probability, weight) in histogram.sampling_probabilities().iter().zip(&weights) {
///     assert!((probability - weight).abs() < 0.005);
/// }
/// ```
pub fn discretize(
    precision: Precision,
    weights: &[f64],
) -> Result<DiscretizedHistogram, DomainError> {
    let len = weights.len();
    if len < 2 {
        return Err(DomainError::TooFewWeights { len });
    }
    if let Some(index) = weights.iter().position(|weight| !weight.is_finite()) {
        return Err(DomainError::NonFiniteWeight { index });
    }
    let one_norm = weights.iter().map(|&weight| libm::fabs(weight)).sum::<f64>();
    if one_norm == 0.0 {
        return Err(DomainError::ZeroNorm);
    }
    if !one_norm.is_finite() {
        return Err(DomainError::NormOverflow);
    }

    let bar_height = precision.bar_height() as u64;
    let total = len as u64 * bar_height;

    // Normalize before scaling: `total / one_norm` alone overflows for tiny norms.
    // Sources may temporarily exceed `bar_height`, so we work in `u64` until the end.
    let mut keep = weights
        .iter()
        .map(|&weight| libm::rint(libm::fabs(weight) / one_norm * total as f64) as u64)
        .collect::<Vec<_>>();
    let mut alternate = (0..len).collect::<Vec<_>>();

    let excess = keep.iter().sum::<u64>() as i64 - total as i64;
    correct_rounding_drift(&mut keep, excess);
    debug_assert_eq!(keep.iter().sum::<u64>(), total);

    let transfers = fill_sinks_from_sources(&mut keep, &mut alternate, bar_height);
    debug!(
        len,
        bits = precision.bits(),
        one_norm,
        excess,
        transfers,
        "discretized weights"
    );

    let keep = keep
        .into_iter()
        .map(|k| {
            debug_assert!(k <= bar_height);
            k as u32
        })
        .collect();

    Ok(DiscretizedHistogram::from_parts_unchecked(
        one_norm, precision, keep, alternate,
    ))
}

/// Same as [`discretize`] but takes the number of bits of precision directly.
///
/// # Errors
///
/// In addition to the errors returned by [`discretize`], returns
/// [`DomainError::PrecisionTooHigh`] if `bits > 31`.
pub fn discretize_bits(bits: u32, weights: &[f64]) -> Result<DiscretizedHistogram, DomainError> {
    discretize(Precision::new(bits)?, weights)
}

/// Shifts the total of `keep` by `-excess` in steps of one unit, walking the slots in
/// index order and touching each slot at most once.
///
/// Slots that are already zero are skipped when units have to be removed, so that no
/// coefficient goes negative. Since rounding moves each nonzero slot by at most half a
/// unit, there are always enough slots to absorb the drift.
fn correct_rounding_drift(keep: &mut [u64], excess: i64) {
    let mut remaining = excess.unsigned_abs();
    for k in keep.iter_mut() {
        if remaining == 0 {
            break;
        }
        if excess > 0 {
            if *k != 0 {
                *k -= 1;
                remaining -= 1;
            }
        } else {
            *k += 1;
            remaining -= 1;
        }
    }
    debug_assert_eq!(remaining, 0);
}

/// Builds the alias table in place and returns the number of transfers.
///
/// On return, every entry of `keep` is at most `bar_height`.
fn fill_sinks_from_sources(keep: &mut [u64], alternate: &mut [usize], bar_height: u64) -> usize {
    let mut sources = Vec::new();
    let mut sinks = Vec::new();
    for (index, &k) in keep.iter().enumerate() {
        if k > bar_height {
            sources.push(index);
        } else if k < bar_height {
            sinks.push(index);
        }
    }

    let mut transfers = 0;
    while let Some(&source) = sources.last() {
        let Some(sink) = sinks.pop() else {
            // Can only happen if the total is off, which `correct_rounding_drift` rules out.
            // Clip whatever is left.
            for &source in &sources {
                keep[source] = bar_height;
            }
            break;
        };
        sources.pop();

        // `keep[source] > bar_height`, so this can't underflow.
        keep[source] = keep[source] - bar_height + keep[sink];
        alternate[sink] = source;
        transfers += 1;
        trace!(source, sink, remaining = keep[source], "filled sink");

        if keep[source] > bar_height {
            sources.push(source);
        } else if keep[source] < bar_height {
            sinks.push(source);
        }
    }

    debug_assert!(transfers < keep.len());
    transfers
}
