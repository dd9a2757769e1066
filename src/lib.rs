//! Classical Numeric Primitives for Quantum State Preparation
//!
//! The `qarith` crate provides the runtime-independent number crunching that a quantum
//! circuit construction framework needs before (and after) it talks to any quantum
//! hardware or simulator. It has two goals:
//!
//! 1. **exact integer arithmetic on rationals**, i.e., the extended Euclidean algorithm,
//!    modular exponentiation and inversion, and bounded-denominator continued fraction
//!    convergents as they are needed, e.g., for classical post-processing of period
//!    finding; and
//! 2. **fixed-point discretization of probability distributions** into an exact-sum
//!    integer histogram together with an alias table, which is what a state preparation
//!    routine (e.g., a quantum ROM) loads into its registers.
//!
//! Everything in this crate is a pure function of its inputs. There is no global state,
//! no I/O, and no allocation that outlives a call except for returned values.
//!
//! # Quick Start
//!
//! To use `qarith` in your Rust project, add the following line to the `[dependencies]`
//! section of your `Cargo.toml`:
//!
//! ```toml
//! qarith = "0.1"
//! ```
//!
//! ## Rational Arithmetic Example
//!
//! ```
//! use qarith::{
//!     continued_fraction::{continued_fraction_convergent, Fraction},
//!     rational::{exp_mod, gcd, inverse_mod},
//! };
//!
//! assert_eq!(gcd(12i64, 18), 6);
//! assert_eq!(inverse_mod(3i64, 7).unwrap(), 5);
//! assert_eq!(exp_mod(2i64, 10, 1000).unwrap(), 24);
//!
//! // Recover the classical approximation 355/113 of pi from a finite decimal expansion.
//! let approximation =
//!     continued_fraction_convergent(Fraction::new(314159i64, 100000), 113).unwrap();
//! assert_eq!(approximation.denominator().abs(), 113);
//! assert_eq!(approximation.numerator().abs(), 355);
//! ```
//!
//! ## Discretization Example
//!
//! ```
//! use qarith::discretize::{discretize, Precision};
//!
//! let weights = [0.5, -0.25, 0.125, 0.125]; // Signs are ignored.
//! let histogram = discretize(Precision::new(8).unwrap(), &weights).unwrap();
//!
//! // The alias table holds exactly `N * bar_height` integer units of mass ...
//! let total = histogram.masses().iter().sum::<u64>();
//! assert_eq!(total, 4 * histogram.bar_height() as u64);
//!
//! // ... and the alias table realizes (approximately) the normalized weights.
//! let probabilities = histogram.sampling_probabilities();
//! assert!((probabilities[0] - 0.5).abs() < 0.01);
//! ```

#![no_std]
#![warn(rust_2018_idioms, missing_debug_implementations)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod continued_fraction;
pub mod discretize;
pub mod rational;
pub mod reduce;

use core::fmt::{Debug, Display};

use num_traits::{AsPrimitive, PrimInt, Signed};

/// A trait for the signed machine integers on which the rational arithmetic operates.
///
/// Every `SignedWord` knows a [`Wide`](SignedWord::Wide) type with twice as many bits,
/// which lets modular multiplication form the full product of two residues before
/// reducing it. This trait is implemented on `i8`, `i16`, `i32`, and `i64`. There is
/// usually no reason to implement it on custom types.
pub trait SignedWord: PrimInt + Signed + Debug + Display + Default + 'static {
    /// A signed integer type that can represent the product of any two `Self`s.
    type Wide: PrimInt + Signed + AsPrimitive<Self>;

    /// Lossless conversion into [`Self::Wide`].
    fn widen(self) -> Self::Wide;

    /// Returns `(self * other) mod modulus` for `self, other` in `[0, modulus)`.
    ///
    /// The product is formed in [`Self::Wide`], so it cannot overflow.
    #[inline(always)]
    fn mul_mod(self, other: Self, modulus: Self) -> Self {
        (self.widen() * other.widen() % modulus.widen()).as_()
    }
}

impl SignedWord for i8 {
    type Wide = i16;

    #[inline(always)]
    fn widen(self) -> i16 {
        self.into()
    }
}

impl SignedWord for i16 {
    type Wide = i32;

    #[inline(always)]
    fn widen(self) -> i32 {
        self.into()
    }
}

impl SignedWord for i32 {
    type Wide = i64;

    #[inline(always)]
    fn widen(self) -> i64 {
        self.into()
    }
}

impl SignedWord for i64 {
    type Wide = i128;

    #[inline(always)]
    fn widen(self) -> i128 {
        self.into()
    }
}

/// Error type for violated preconditions.
///
/// A `DomainError` is always reported before any computation takes place, so a failed
/// call never leaves behind a partial result.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// A modulus was zero or negative.
    NonPositiveModulus,

    /// The base of a modular exponentiation was zero or negative.
    NonPositiveBase,

    /// The exponent of a modular exponentiation was negative.
    NegativePower,

    /// The denominator bound of a continued fraction convergent was zero or negative.
    NonPositiveBound,

    /// An operation that is only defined on non-negative integers got a negative one.
    NegativeValue,

    /// Discretization needs at least two weights.
    TooFewWeights { len: usize },

    /// Fixed point precision is limited to 31 bits.
    PrecisionTooHigh { bits: u32 },

    /// All weights were zero.
    ZeroNorm,

    /// A weight was NaN or infinite.
    NonFiniteWeight { index: usize },

    /// The sum of the magnitudes of all weights overflowed.
    NormOverflow,

    /// A reduction over an empty sequence.
    EmptyInput,

    /// The exponent of a p-norm was smaller than one (or NaN).
    InvalidExponent,

    /// An error tolerance was not a finite positive number.
    InvalidTolerance,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonPositiveModulus => write!(f, "Modulus must be positive."),
            Self::NonPositiveBase => write!(f, "Base must be positive."),
            Self::NegativePower => write!(f, "Power must be non-negative."),
            Self::NonPositiveBound => write!(f, "Denominator bound must be positive."),
            Self::NegativeValue => write!(f, "Value must be non-negative."),
            Self::TooFewWeights { len } => {
                write!(f, "Need at least two weights to discretize, got {len}.")
            }
            Self::PrecisionTooHigh { bits } => write!(
                f,
                "Bits of precision must be at most 31, got {bits}."
            ),
            Self::ZeroNorm => write!(f, "Weights must not all be zero."),
            Self::NonFiniteWeight { index } => {
                write!(f, "Weight at index {index} is not a finite number.")
            }
            Self::NormOverflow => write!(f, "Sum of the weights' magnitudes overflowed."),
            Self::EmptyInput => write!(f, "Input sequence must not be empty."),
            Self::InvalidExponent => write!(f, "Exponent of a p-norm must be at least one."),
            Self::InvalidTolerance => {
                write!(f, "Error tolerance must be a finite positive number.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DomainError {}

/// Error type for operations that are mathematically undefined on valid inputs.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Tried to invert an integer modulo a modulus that it shares a factor with.
    ///
    /// The field `gcd` holds the greatest common divisor (as an `i128` so that this
    /// error type doesn't have to be generic over the integer type).
    NotCoprime { gcd: i128 },
}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotCoprime { gcd } => write!(
                f,
                "No modular inverse exists since the arguments have common divisor {gcd}."
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArithmeticError {}

/// Union of [`DomainError`] and [`ArithmeticError`].
///
/// Both variants convert into `Error` via `From`, so the `?` operator works on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Domain(DomainError),
    Arithmetic(ArithmeticError),
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ArithmeticError> for Error {
    fn from(err: ArithmeticError) -> Self {
        Self::Arithmetic(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "Domain error: {err}"),
            Self::Arithmetic(err) => write!(f, "Arithmetic error: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Arithmetic(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_mod_does_not_overflow() {
        let modulus = i64::MAX - 24; // Close to the largest representable modulus.
        let a = modulus - 1;
        assert_eq!(a.mul_mod(a, modulus), 1);
        assert_eq!(100i8.mul_mod(100, 127), (10000 % 127) as i8);
    }

    #[test]
    fn errors_convert() {
        fn fails() -> Result<(), Error> {
            Err(DomainError::ZeroNorm)?;
            Ok(())
        }
        assert_eq!(fails(), Err(Error::Domain(DomainError::ZeroNorm)));

        let err: Error = ArithmeticError::NotCoprime { gcd: 2 }.into();
        assert_eq!(err, Error::Arithmetic(ArithmeticError::NotCoprime { gcd: 2 }));
    }
}
