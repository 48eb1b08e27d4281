//! Utility functions for working with data slices
//!
//! All helpers assume finite input unless stated otherwise; masking of
//! non-finite samples happens before any of these are called.

/// Sort a slice in place in ascending order
///
/// Uses the IEEE total order, so NaN values (which callers should already
/// have masked out) end up at the end instead of panicking.
#[inline]
pub fn sort_in_place(data: &mut [f64]) {
    data.sort_unstable_by(f64::total_cmp);
}

/// Sort data and return a new vector
///
/// # Examples
///
/// ```rust
/// use robust_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sort_in_place(&mut sorted);
    sorted
}

/// Calculate the mean of a slice
///
/// Accumulates deviations from the first element, so a slice of identical
/// values returns that value exactly. Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use robust_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    let Some(&shift) = data.first() else {
        return 0.0;
    };
    let sum: f64 = data.iter().map(|&x| x - shift).sum();
    shift + sum / data.len() as f64
}

/// Median of pre-sorted data
///
/// Averages the two middle values for even counts. Returns NaN for an
/// empty slice.
///
/// ```rust
/// use robust_core::utils::median_sorted;
///
/// assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
/// ```
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 0 {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    } else {
        sorted[n / 2]
    }
}

/// Median of unsorted data, reordering the slice
///
/// Uses selection rather than a full sort. Returns NaN for an empty slice.
pub fn median_in_place(data: &mut [f64]) -> f64 {
    let n = data.len();
    if n == 0 {
        return f64::NAN;
    }
    let mid = n / 2;
    let (lower, upper_mid, _) = data.select_nth_unstable_by(mid, f64::total_cmp);
    let upper_mid = *upper_mid;
    if n % 2 == 1 {
        return upper_mid;
    }
    // The lower half is unordered; its maximum is the other middle value.
    let lower_mid = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    0.5 * (lower_mid + upper_mid)
}

/// Median absolute deviation around `center`
///
/// Unscaled: multiply by [`MAD_CONSISTENCY`] for a standard-deviation
/// equivalent under normality.
pub fn mad(data: &[f64], center: f64) -> f64 {
    let mut deviations: Vec<f64> = data.iter().map(|&x| (x - center).abs()).collect();
    median_in_place(&mut deviations)
}

/// Consistency factor turning a MAD into a normal-equivalent sigma
pub const MAD_CONSISTENCY: f64 = 1.4826;
