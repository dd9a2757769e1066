use alloc::{vec, vec::Vec};

use super::Precision;

/// Output of [`discretize`](super::discretize): an exact-sum fixed point histogram
/// together with an alias table.
///
/// # Invariants
///
/// For a histogram over `N = self.len()` slots with bar height `H = self.bar_height()`:
///
/// - every slot holds exactly `H` units of mass: it keeps `keep_coefficients()[j]` of
///   them for itself and redirects the remaining `H - keep_coefficients()[j]` to its
///   alternate index. Hence the per-index [`masses`](Self::masses) sum up to `N * H`
///   exactly, in integer arithmetic;
/// - every keep coefficient lies in `0..=H`;
/// - every alternate index lies in `0..N`; slots whose keep coefficient equals `H`
///   point to themselves.
///
/// # Sampling
///
/// The histogram is meant to be sampled in constant time: draw a slot `j` uniformly from
/// `0..N` and a level `v` uniformly from `0..=H`, then return [`resolve(j, v)`](
/// Self::resolve). The resulting distribution is given by
/// [`sampling_probabilities`](Self::sampling_probabilities).
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizedHistogram {
    one_norm: f64,
    precision: Precision,
    keep_coefficients: Vec<u32>,
    alternate_indices: Vec<usize>,
}

impl DiscretizedHistogram {
    /// Does not check the invariants; `discretize` is responsible for them.
    pub(super) fn from_parts_unchecked(
        one_norm: f64,
        precision: Precision,
        keep_coefficients: Vec<u32>,
        alternate_indices: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(keep_coefficients.len(), alternate_indices.len());
        Self {
            one_norm,
            precision,
            keep_coefficients,
            alternate_indices,
        }
    }

    /// Sum of the magnitudes of the weights that the histogram was created from.
    pub fn one_norm(&self) -> f64 {
        self.one_norm
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn bar_height(&self) -> u32 {
        self.precision.bar_height()
    }

    pub fn len(&self) -> usize {
        self.keep_coefficients.len()
    }

    /// Always `false` since discretization requires at least two weights.
    pub fn is_empty(&self) -> bool {
        self.keep_coefficients.is_empty()
    }

    pub fn keep_coefficients(&self) -> &[u32] {
        &self.keep_coefficients
    }

    pub fn alternate_indices(&self) -> &[usize] {
        &self.alternate_indices
    }

    /// Returns `(one_norm, keep_coefficients, alternate_indices)`.
    pub fn into_parts(self) -> (f64, Vec<u32>, Vec<usize>) {
        (self.one_norm, self.keep_coefficients, self.alternate_indices)
    }

    /// Integer mass that the alias table assigns to each index.
    ///
    /// These are the rounded (and drift corrected) scaled weights. They always sum up to
    /// exactly `N * H`.
    pub fn masses(&self) -> Vec<u64> {
        let bar_height = self.bar_height() as u64;
        let mut masses = vec![0u64; self.len()];
        for (slot, (&keep, &alternate)) in self
            .keep_coefficients
            .iter()
            .zip(&self.alternate_indices)
            .enumerate()
        {
            masses[slot] += keep as u64;
            masses[alternate] += bar_height - keep as u64;
        }
        masses
    }

    /// Maps a uniformly drawn `slot` and `level` to a sampled index.
    ///
    /// Returns `slot` if `level <= keep_coefficients()[slot]`, and the slot's alternate
    /// index otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.len()`.
    #[inline]
    pub fn resolve(&self, slot: usize, level: u32) -> usize {
        if level <= self.keep_coefficients[slot] {
            slot
        } else {
            self.alternate_indices[slot]
        }
    }

    /// Exact probability of each index when sampling with [`resolve`](Self::resolve)
    /// from a uniform `slot` in `0..N` and a uniform `level` in `0..=H`.
    ///
    /// The returned probabilities sum to one (up to floating point rounding).
    pub fn sampling_probabilities(&self) -> Vec<f64> {
        let len = self.len();
        let levels = self.bar_height() as u64 + 1;

        // Count (slot, level) pairs that resolve to each index.
        let mut counts = vec![0u64; len];
        for (slot, (&keep, &alternate)) in self
            .keep_coefficients
            .iter()
            .zip(&self.alternate_indices)
            .enumerate()
        {
            let kept = keep as u64 + 1;
            counts[slot] += kept;
            counts[alternate] += levels - kept;
        }

        let normalization = 1.0 / (len as f64 * levels as f64);
        counts
            .into_iter()
            .map(|count| count as f64 * normalization)
            .collect()
    }
}
