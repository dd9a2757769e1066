//! Exact rationals and their continued fraction convergents.
//!
//! The main entry point is [`continued_fraction_convergent`], which finds a rational
//! approximation with a bounded denominator. This is the classical post-processing step
//! of period finding: a measured phase `j / 2^n` is approximated by a fraction whose
//! denominator is a candidate period.

use core::fmt::Display;

use num_traits::{AsPrimitive, Signed, Zero};

use crate::{
    rational::{narrow, Euclid},
    DomainError, SignedWord,
};

/// An exact rational number `numerator / denominator`.
///
/// A `Fraction` is not necessarily reduced to lowest terms, and its denominator may be
/// negative. Two `Fraction`s compare equal only if both their numerators and their
/// denominators are equal, so `1/2 != 2/4` and `1/2 != -1/-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction<T> {
    numerator: T,
    denominator: T,
}

impl<T: SignedWord> Fraction<T> {
    pub fn new(numerator: T, denominator: T) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> T {
        self.numerator
    }

    pub fn denominator(&self) -> T {
        self.denominator
    }

    /// Floating point approximation of the represented number.
    ///
    /// Returns a non-finite value if the denominator is zero.
    pub fn to_f64(&self) -> f64
    where
        T: AsPrimitive<f64>,
    {
        self.numerator.as_() / self.denominator.as_()
    }
}

impl<T: Display> Display for Fraction<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl<T: SignedWord> From<(T, T)> for Fraction<T> {
    fn from((numerator, denominator): (T, T)) -> Self {
        Self::new(numerator, denominator)
    }
}

/// Returns the last continued fraction convergent of `fraction` whose denominator does not
/// exceed `denominator_bound` in magnitude.
///
/// The convergents are generated by the same sign normalized Euclidean recurrence as in
/// [`extended_gcd`](crate::rational::extended_gcd). The search stops as soon as either
/// the expansion terminates or the magnitude of the current denominator exceeds the bound.
/// In the latter case, the previous convergent (which still respected the bound) is
/// returned. Note that, while every convergent is a best rational approximation in the
/// classical sense, the returned fraction is not necessarily the closest of *all*
/// fractions with a denominator within the bound (semiconvergents are never considered).
///
/// The returned fraction is in lowest terms and its denominator is positive.
///
/// # Errors
///
/// Returns [`DomainError::NonPositiveBound`] if `denominator_bound <= 0`.
///
/// # Panics
///
/// Panics if the numerator of the convergent is not representable in `T`. Numerators
/// never exceed `|fraction.numerator()|` in magnitude, so this happens only if the
/// fraction `T::MIN / d` with an odd negative `d` is recovered exactly, e.g., for
/// `Fraction::new(T::MIN, -3)` with a bound of at least `3`.
///
/// # Example
///
/// ```
/// use qarith::continued_fraction::{continued_fraction_convergent, Fraction};
///
/// let fraction = Fraction::new(314159i64, 100000);
///
/// let coarse = continued_fraction_convergent(fraction, 10).unwrap();
/// assert_eq!(coarse.numerator() * 7, 22 * coarse.denominator());
///
/// let fine = continued_fraction_convergent(fraction, 113).unwrap();
/// assert_eq!(fine.numerator() * 113, 355 * fine.denominator());
/// ```
pub fn continued_fraction_convergent<T: SignedWord>(
    fraction: Fraction<T>,
    denominator_bound: T,
) -> Result<Fraction<T>, DomainError> {
    if denominator_bound <= T::zero() {
        return Err(DomainError::NonPositiveBound);
    }

    // Runs in the wide type so that `T::MIN` survives sign normalization.
    let bound = denominator_bound.widen();
    let (mut state, signs) =
        Euclid::new(fraction.numerator.widen(), fraction.denominator.widen());
    // A zero numerator still needs a nonzero sign, or else the denominator would vanish.
    let one = <T::Wide as num_traits::One>::one();
    let sign_a = if signs.0.is_zero() { one } else { signs.0 };
    let sign_b = if signs.1.is_zero() { one } else { signs.1 };
    while !state.is_done() && state.s.1.abs() <= bound {
        state.step();
    }

    // At any point, `s.k * a + t.k * b == r.k`, so `a / b ≈ -t.k / s.k` with equality
    // once `r.k == 0`.
    let (numerator, denominator) = if state.is_done() && state.s.1.abs() <= bound {
        (-state.t.1 * sign_b, state.s.1 * sign_a)
    } else {
        (-state.t.0 * sign_b, state.s.0 * sign_a)
    };
    let (numerator, denominator) = if denominator.is_negative() {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };

    Ok(Fraction::new(narrow::<T>(numerator), narrow::<T>(denominator)))
}
