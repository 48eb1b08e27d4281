//! Core traits for robust location estimation
//!
//! Algorithm-specific estimators live in `robust-location`; this module
//! only fixes the interface they share so that the windowing engine can be
//! generic over them.

use crate::{utils, Result};

/// Base trait for all central tendency estimators
///
/// Estimators measure the "typical value" of a window of flux samples.
/// Implementations include means, medians, trimmed means and iteratively
/// reweighted M-estimators.
///
/// # API Convention
///
/// - `estimate` may reorder the data in place (takes `&mut [f64]`)
/// - `estimate_sorted` requires pre-sorted data (takes `&[f64]`)
///
/// # Example
///
/// ```rust
/// use robust_core::{CentralTendencyEstimator, Result};
///
/// #[derive(Clone)]
/// struct Midrange;
///
/// impl CentralTendencyEstimator for Midrange {
///     fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
///         match (sorted_data.first(), sorted_data.last()) {
///             (Some(lo), Some(hi)) => Ok(0.5 * (lo + hi)),
///             _ => Err(robust_core::Error::empty_input("midrange")),
///         }
///     }
///
///     fn name(&self) -> &str { "Midrange" }
///     fn is_robust(&self) -> bool { false }
///     fn breakdown_point(&self) -> f64 { 0.0 }
/// }
///
/// let mut window = vec![3.0, 1.0, 2.0];
/// assert_eq!(Midrange.estimate(&mut window).unwrap(), 2.0);
/// ```
pub trait CentralTendencyEstimator: Send + Sync + Clone {
    /// Estimate the central tendency from a sample
    ///
    /// # Warning
    /// This method may sort the data in place! If you need to preserve the
    /// original order, make a copy first.
    fn estimate(&self, data: &mut [f64]) -> Result<f64> {
        utils::sort_in_place(data);
        self.estimate_sorted(data)
    }

    /// Estimate with a caller-owned work buffer
    ///
    /// Estimators that need auxiliary storage reuse `work` across calls
    /// instead of allocating per window. The default ignores it.
    fn estimate_with_work(&self, data: &mut [f64], work: &mut Vec<f64>) -> Result<f64> {
        let _ = work;
        self.estimate(data)
    }

    /// Estimate the central tendency from pre-sorted data
    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64>;

    /// Human-readable name of the estimator
    fn name(&self) -> &str;

    /// Whether this estimator is robust to outliers
    fn is_robust(&self) -> bool;

    /// The breakdown point (fraction of contamination the estimator can handle)
    /// - 0.0 for non-robust estimators (e.g., mean)
    /// - 0.5 for maximally robust estimators (e.g., median)
    fn breakdown_point(&self) -> f64;
}
