use crate::DomainError;

/// Fixed point resolution of a [`DiscretizedHistogram`](super::DiscretizedHistogram).
///
/// A `Precision` of `bits` bits defines the *bar height* `2^bits - 1`, i.e., the number
/// of integer units that a single histogram slot holds when it is completely full.
/// At most 31 bits are supported so that every coefficient fits into a `u32` with room
/// to spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision {
    bits: u32,
}

impl Precision {
    pub const MAX_BITS: u32 = 31;

    /// # Errors
    ///
    /// Returns [`DomainError::PrecisionTooHigh`] if `bits > 31`.
    pub fn new(bits: u32) -> Result<Self, DomainError> {
        if bits > Self::MAX_BITS {
            return Err(DomainError::PrecisionTooHigh { bits });
        }
        Ok(Self { bits })
    }

    /// Chooses enough bits so that each sampling probability deviates from its target
    /// by at most `error_tolerance / N` (for `N` weights).
    ///
    /// Uses `bits = ceil(-log2(error_tolerance / 2)) + 1`, clamped below at zero.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidTolerance`] unless `error_tolerance` is finite and
    ///   positive;
    /// - [`DomainError::PrecisionTooHigh`] if the tolerance would need more than 31 bits.
    ///
    /// # Example
    ///
    /// ```
    /// use qarith::discretize::Precision;
    ///
    /// assert_eq!(Precision::from_error_tolerance(0.01).unwrap().bits(), 9);
    /// assert_eq!(Precision::from_error_tolerance(1.0).unwrap().bits(), 2);
    /// assert!(Precision::from_error_tolerance(1e-12).is_err());
    /// ```
    pub fn from_error_tolerance(error_tolerance: f64) -> Result<Self, DomainError> {
        if !error_tolerance.is_finite() || error_tolerance <= 0.0 {
            return Err(DomainError::InvalidTolerance);
        }

        let bits = libm::ceil(-libm::log2(0.5 * error_tolerance)) + 1.0;
        if bits > Self::MAX_BITS as f64 {
            return Err(DomainError::PrecisionTooHigh {
                bits: if bits < u32::MAX as f64 {
                    bits as u32
                } else {
                    u32::MAX
                },
            });
        }

        Self::new(if bits > 0.0 { bits as u32 } else { 0 })
    }

    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Returns `2^bits - 1`.
    pub fn bar_height(self) -> u32 {
        (1u32 << self.bits) - 1
    }
}
