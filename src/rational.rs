//! Exact integer arithmetic: Bezout coefficients, greatest common divisors, and modular
//! arithmetic.
//!
//! All functions in this module are generic over [`SignedWord`], i.e., they work on `i8`,
//! `i16`, `i32`, and `i64`. Intermediate products in modular arithmetic are computed in
//! the next wider integer type, so [`exp_mod`] and [`inverse_mod`] are correct for any
//! positive modulus that fits into the word type.
//!
//! The Euclidean recurrence behind [`extended_gcd`] runs in [`SignedWord::Wide`] as well,
//! so arguments equal to `T::min_value()` are fine. Only results that don't fit into `T`
//! (e.g., `gcd(i64::MIN, 0) == 2^63`) cause a panic.

use num_traits::{NumCast, One, PrimInt, Signed, ToPrimitive};

use crate::{ArithmeticError, DomainError, Error, SignedWord};

/// State of the Euclidean recurrence on the triples `(r, s, t)`.
///
/// Invariant: `s.k * a + t.k * b == r.k` for `k` in `{0, 1}`, where `(a, b)` are the
/// (sign normalized) arguments the state was created from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Euclid<T> {
    pub(crate) r: (T, T),
    pub(crate) s: (T, T),
    pub(crate) t: (T, T),
}

impl<T: PrimInt + Signed> Euclid<T> {
    /// Returns the initial state for `(a, b)` together with the signs `(sign_a, sign_b)`
    /// that were used to make both arguments non-negative.
    #[inline]
    pub(crate) fn new(a: T, b: T) -> (Self, (T, T)) {
        let signs = (a.signum(), b.signum());
        let state = Self {
            r: (a * signs.0, b * signs.1),
            s: (T::one(), T::zero()),
            t: (T::zero(), T::one()),
        };
        (state, signs)
    }

    #[inline]
    pub(crate) fn is_done(&self) -> bool {
        self.r.1.is_zero()
    }

    /// Advances all three triples by one division step.
    ///
    /// Must not be called once [`is_done`](Self::is_done) returns `true`.
    #[inline]
    pub(crate) fn step(&mut self) {
        let quotient = self.r.0 / self.r.1;
        self.r = (self.r.1, self.r.0 - quotient * self.r.1);
        self.s = (self.s.1, self.s.0 - quotient * self.s.1);
        self.t = (self.t.1, self.t.0 - quotient * self.t.1);
    }
}

/// Returns Bezout coefficients `(u, v)` with `u * a + v * b == gcd(a, b)`.
///
/// The greatest common divisor obtained this way is always non-negative, regardless of
/// the signs of `a` and `b`. It is zero only if `a == b == 0`, in which case this
/// function returns `(0, 0)`.
///
/// The coefficients always fit into `T`, even if `gcd(a, b)` itself does not (see
/// [`gcd`]).
///
/// # Example
///
/// ```
/// use qarith::rational::extended_gcd;
///
/// let (u, v) = extended_gcd(12i32, -18);
/// assert_eq!(u * 12 + v * -18, 6);
/// ```
pub fn extended_gcd<T: SignedWord>(a: T, b: T) -> (T, T) {
    let (u, v, _) = bezout(a, b);
    (u, v)
}

/// Returns `(u, v, gcd(a, b))`, with the gcd still in the wide type.
///
/// The gcd is read off the recurrence rather than evaluated as `u * a + v * b`, since the
/// individual products may overflow even though their sum doesn't. The coefficients
/// satisfy `|u| <= max(1, |b| / 2)` and `|v| <= max(1, |a| / 2)`, so they always narrow
/// back into `T`.
fn bezout<T: SignedWord>(a: T, b: T) -> (T, T, T::Wide) {
    let (mut state, (sign_a, sign_b)) = Euclid::new(a.widen(), b.widen());
    while !state.is_done() {
        state.step();
    }
    (
        narrow::<T>(state.s.0 * sign_a),
        narrow::<T>(state.t.0 * sign_b),
        state.r.0,
    )
}

/// Converts a value computed in [`SignedWord::Wide`] back into `T`.
///
/// # Panics
///
/// Panics if `value` is not representable in `T`.
#[inline]
pub(crate) fn narrow<T: SignedWord>(value: T::Wide) -> T {
    match <T as NumCast>::from(value) {
        Some(value) => value,
        None => panic!("result does not fit into the integer type"),
    }
}

/// Greatest common divisor of `a` and `b`; always non-negative.
///
/// Equals `u * a + v * b` for the Bezout coefficients `(u, v)` returned by
/// [`extended_gcd`].
///
/// # Panics
///
/// Panics if the result is not representable in `T`. This happens only for
/// `gcd(T::MIN, 0)`, `gcd(0, T::MIN)`, and `gcd(T::MIN, T::MIN)`, which all equal
/// `-T::MIN`.
pub fn gcd<T: SignedWord>(a: T, b: T) -> T {
    narrow::<T>(bezout(a, b).2)
}

/// Returns `true` iff `a` and `b` have no common divisor other than `1`.
pub fn is_coprime<T: SignedWord>(a: T, b: T) -> bool {
    bezout(a, b).2.is_one()
}

/// Canonical residue of `value` modulo `modulus`, i.e., an integer in `[0, modulus)`.
///
/// Unlike the `%` operator, the result is non-negative even for negative `value`.
///
/// # Errors
///
/// Returns [`DomainError::NonPositiveModulus`] if `modulus <= 0`.
pub fn modulus<T: SignedWord>(value: T, modulus: T) -> Result<T, DomainError> {
    if modulus <= T::zero() {
        return Err(DomainError::NonPositiveModulus);
    }
    let remainder = value % modulus;
    Ok(if remainder < T::zero() {
        remainder + modulus
    } else {
        remainder
    })
}

/// Returns `b` in `[0, m)` such that `a * b ≡ 1 (mod m)`.
///
/// # Errors
///
/// - [`DomainError::NonPositiveModulus`] if `m <= 0`;
/// - [`ArithmeticError::NotCoprime`] if `a` and `m` share a common divisor, in
///   which case no inverse exists.
///
/// # Example
///
/// ```
/// use qarith::{rational::inverse_mod, ArithmeticError, Error};
///
/// assert_eq!(inverse_mod(3i64, 7), Ok(5));
/// assert_eq!(
///     inverse_mod(2i64, 4),
///     Err(Error::Arithmetic(ArithmeticError::NotCoprime { gcd: 2 }))
/// );
/// ```
pub fn inverse_mod<T: SignedWord>(a: T, m: T) -> Result<T, Error> {
    if m <= T::zero() {
        return Err(DomainError::NonPositiveModulus.into());
    }
    // `m > 0`, so the gcd is at most `m` and fits into `T`.
    let (u, _, gcd) = bezout(a, m);
    if !gcd.is_one() {
        return Err(ArithmeticError::NotCoprime {
            gcd: gcd.to_i128().unwrap_or_default(),
        }
        .into());
    }
    Ok(modulus(u, m)?)
}

/// Computes `base^power mod modulus` by square-and-multiply.
///
/// Takes `O(log(power))` modular multiplications, one per bit of `power`. Each
/// multiplication is carried out in [`SignedWord::Wide`] so it cannot overflow.
///
/// # Errors
///
/// Returns a [`DomainError`] unless `base > 0`, `power >= 0`, and `modulus > 0`.
///
/// # Example
///
/// ```
/// use qarith::rational::exp_mod;
///
/// assert_eq!(exp_mod(2i32, 10, 1000), Ok(24));
/// assert_eq!(exp_mod(7i32, 0, 1), Ok(0)); // Everything is zero modulo one.
/// ```
pub fn exp_mod<T: SignedWord>(base: T, power: T, modulus: T) -> Result<T, DomainError> {
    if modulus <= T::zero() {
        return Err(DomainError::NonPositiveModulus);
    }
    if base <= T::zero() {
        return Err(DomainError::NonPositiveBase);
    }
    if power < T::zero() {
        return Err(DomainError::NegativePower);
    }

    let mut result = T::one() % modulus;
    let mut square = base % modulus;
    let mut remaining_power = power;
    while !remaining_power.is_zero() {
        if (remaining_power & T::one()).is_one() {
            result = result.mul_mod(square, modulus);
        }
        square = square.mul_mod(square, modulus);
        remaining_power = remaining_power >> 1;
    }

    Ok(result)
}

/// Number of bits needed to represent the non-negative integer `value`.
///
/// Returns `0` for `value == 0`.
///
/// # Errors
///
/// Returns [`DomainError::NegativeValue`] if `value < 0`.
pub fn bit_size<T: SignedWord>(value: T) -> Result<u32, DomainError> {
    if value < T::zero() {
        return Err(DomainError::NegativeValue);
    }

    let mut remaining = value;
    let mut count = 0;
    while !remaining.is_zero() {
        remaining = remaining >> 1;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezout_identity() {
        for a in -30i32..=30 {
            for b in -30i32..=30 {
                let (u, v) = extended_gcd(a, b);
                let g = gcd(a, b);
                assert_eq!(u * a + v * b, g);
                assert!(g >= 0);
                if a != 0 || b != 0 {
                    assert!(g > 0);
                    assert_eq!(a % g, 0);
                    assert_eq!(b % g, 0);
                }
            }
        }
    }

    #[test]
    fn gcd_examples() {
        assert_eq!(gcd(12i64, 18), 6);
        let (u, v) = extended_gcd(12i64, 18);
        assert_eq!(12 * u + 18 * v, 6);
        assert_eq!((u, v), (-1, 1));

        assert_eq!(gcd(-12i64, 18), 6);
        assert_eq!(gcd(12i64, -18), 6);
        assert_eq!(gcd(0i64, 7), 7);
        assert_eq!(gcd(-7i64, 0), 7);
    }

    #[test]
    fn large_arguments() {
        // The products `u * a` and `v * b` overflow `i64` here, the gcd itself doesn't.
        let a = 4_611_686_018_427_387_847i64; // Large prime below 2^62.
        let b = 3_000_000_000_000_000_000i64;
        let (u, v) = extended_gcd(a, b);
        assert_eq!(gcd(a, b), 1);
        assert_eq!(u as i128 * a as i128 + v as i128 * b as i128, 1);

        let inverse = inverse_mod(b, a).unwrap();
        assert_eq!(b.mul_mod(inverse, a), 1);
    }

    #[test]
    fn gcd_of_zeros() {
        assert_eq!(extended_gcd(0i16, 0), (0, 0));
        assert_eq!(gcd(0i16, 0), 0);
        assert!(!is_coprime(0i16, 0));
    }

    #[test]
    fn minimal_arguments() {
        let (u, v) = extended_gcd(i64::MIN, 3);
        assert_eq!(u as i128 * i64::MIN as i128 + v as i128 * 3, 1);
        assert_eq!(gcd(i64::MIN, 3), 1);
        assert_eq!(gcd(3, i64::MIN), 1);
        assert_eq!(gcd(i64::MIN, 6), 2);
        assert_eq!(gcd(i64::MIN, i64::MAX), 1);
        assert!(is_coprime(i64::MIN, 3));
        assert!(!is_coprime(i64::MIN, i64::MIN));
        assert!(!is_coprime(i64::MIN, 0));

        // -2^63 = 1 (mod 3) and -2^63 = 1 (mod 7).
        assert_eq!(inverse_mod(i64::MIN, 3), Ok(1));
        assert_eq!(inverse_mod(i64::MIN, 7), Ok(1));
        assert_eq!(modulus(i64::MIN, 7), Ok(1));

        for b in i8::MIN..=i8::MAX {
            if b == 0 || b == i8::MIN {
                continue;
            }
            let (u, v) = extended_gcd(i8::MIN, b);
            let g = gcd(i8::MIN, b);
            assert_eq!(u as i16 * i8::MIN as i16 + v as i16 * b as i16, g as i16);
            assert_eq!(g as i16, (b as i16).abs() & -(b as i16).abs());
        }
        assert_eq!(extended_gcd(i8::MIN, 0), (-1, 0));
        assert_eq!(extended_gcd(i8::MIN, i8::MIN), (0, -1));
    }

    #[test]
    #[should_panic]
    fn unrepresentable_gcd() {
        gcd(i64::MIN, 0);
    }

    #[test]
    fn coprimality() {
        assert!(is_coprime(8i32, 15));
        assert!(is_coprime(-8i32, 15));
        assert!(is_coprime(1i32, 0));
        assert!(!is_coprime(6i32, 15));
        assert!(!is_coprime(0i32, 15));
    }

    #[test]
    fn canonical_modulus() {
        assert_eq!(modulus(-5i32, 3), Ok(1));
        assert_eq!(modulus(5i32, 3), Ok(2));
        assert_eq!(modulus(-6i32, 3), Ok(0));
        for value in -50i32..50 {
            for m in 1i32..10 {
                let r = modulus(value, m).unwrap();
                assert!((0..m).contains(&r));
                assert_eq!((value - r) % m, 0);
            }
        }
        assert_eq!(modulus(5i32, 0), Err(DomainError::NonPositiveModulus));
        assert_eq!(modulus(5i32, -3), Err(DomainError::NonPositiveModulus));
    }

    #[test]
    fn modular_inverse() {
        assert_eq!(inverse_mod(3i64, 7), Ok(5));
        assert_eq!(inverse_mod(-3i64, 7), Ok(2));
        assert_eq!(
            inverse_mod(2i64, 4),
            Err(Error::Arithmetic(ArithmeticError::NotCoprime { gcd: 2 }))
        );
        assert_eq!(
            inverse_mod(2i64, 0),
            Err(Error::Domain(DomainError::NonPositiveModulus))
        );

        for m in 2i64..40 {
            for a in -40i64..40 {
                match inverse_mod(a, m) {
                    Ok(b) => {
                        assert!(is_coprime(a, m));
                        assert!((0..m).contains(&b));
                        assert_eq!(modulus(a * b, m), Ok(1));
                    }
                    Err(_) => assert!(!is_coprime(a, m)),
                }
            }
        }
    }

    #[test]
    fn modular_exponentiation() {
        assert_eq!(exp_mod(2i64, 10, 1000), Ok(24));
        assert_eq!(exp_mod(3i64, 0, 7), Ok(1));
        assert_eq!(exp_mod(3i64, 5, 1), Ok(0));
        assert_eq!(exp_mod(0i64, 5, 7), Err(DomainError::NonPositiveBase));
        assert_eq!(exp_mod(2i64, -1, 7), Err(DomainError::NegativePower));
        assert_eq!(exp_mod(2i64, 3, 0), Err(DomainError::NonPositiveModulus));

        // Fermat's little theorem for a large prime, which requires wide intermediates.
        let p = 2_305_843_009_213_693_951i64; // 2^61 - 1
        assert_eq!(exp_mod(123_456_789i64, p - 1, p), Ok(1));

        for base in 1i32..12 {
            for power in 0i32..12 {
                let naive = (0..power).fold(1i64, |acc, _| acc * base as i64 % 97);
                assert_eq!(exp_mod(base, power, 97), Ok(naive as i32));
            }
        }
    }

    #[test]
    fn bit_sizes() {
        assert_eq!(bit_size(0i32), Ok(0));
        assert_eq!(bit_size(1i32), Ok(1));
        assert_eq!(bit_size(7i32), Ok(3));
        assert_eq!(bit_size(8i32), Ok(4));
        assert_eq!(bit_size(i64::MAX), Ok(63));
        assert_eq!(bit_size(-1i32), Err(DomainError::NegativeValue));
    }
}
