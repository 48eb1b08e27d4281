//! Iteratively reweighted M-estimators of location
//!
//! Every estimator here runs the same fixed-point loop and differs only in
//! its [`WeightKernel`]:
//!
//! 1. start at the median, scale by the MAD (times the kernel's scale factor)
//! 2. standardize residuals by `cval * scale` and weight them with the kernel
//! 3. move the center by the weighted mean residual
//! 4. stop once the step is below [`CONVERGENCE_TOLERANCE`] or after
//!    [`MAX_ITERATIONS`] steps
//!
//! The scale is held fixed during the iteration. A zero MAD (more than half
//! the window identical) short-circuits to the median.

use crate::kernels::{AndrewsKernel, BiweightKernel, HuberKernel, WelschKernel};
use crate::traits::WeightKernel;
use robust_core::{utils, CentralTendencyEstimator, Error, Result};

/// Upper bound on reweighting steps per estimate
pub const MAX_ITERATIONS: usize = 100;

/// Absolute change in the center below which the iteration stops
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// M-estimator of location parameterized by its weight kernel
#[derive(Clone, Debug, PartialEq)]
pub struct MEstimator<K: WeightKernel> {
    kernel: K,
    cval: f64,
}

/// Tukey's biweight location
pub type Biweight = MEstimator<BiweightKernel>;
/// Andrews' sine wave location
pub type AndrewSineWave = MEstimator<AndrewsKernel>;
/// Welsch location
pub type Welsch = MEstimator<WelschKernel>;
/// Huber location
pub type Huber = MEstimator<HuberKernel>;

impl<K: WeightKernel> MEstimator<K> {
    /// Create with the given tuning constant
    ///
    /// `cval` is the distance, in scale units, at which the kernel starts
    /// cutting (or fully rejects) residuals. It must be finite and positive.
    pub fn new(cval: f64) -> Result<Self> {
        if !(cval.is_finite() && cval > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cval for {} must be positive and finite, got {cval}",
                K::default().name()
            )));
        }
        Ok(Self {
            kernel: K::default(),
            cval,
        })
    }

    /// Tuning constant in use
    pub fn cval(&self) -> f64 {
        self.cval
    }

    /// Kernel in use
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<K: WeightKernel> Default for MEstimator<K> {
    fn default() -> Self {
        let kernel = K::default();
        let cval = kernel.default_cval();
        Self { kernel, cval }
    }
}

impl<K: WeightKernel> CentralTendencyEstimator for MEstimator<K> {
    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        if sorted_data.is_empty() {
            return Err(Error::empty_input(self.kernel.name()));
        }
        Ok(reweighted_location(sorted_data, &self.kernel, self.cval))
    }

    fn name(&self) -> &str {
        self.kernel.name()
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        // Started from the median with a MAD scale
        0.5
    }
}

/// Run the reweighting loop on sorted, non-empty data
pub fn reweighted_location<K: WeightKernel>(sorted_data: &[f64], kernel: &K, cval: f64) -> f64 {
    let median = utils::median_sorted(sorted_data);
    if sorted_data.len() < 2 {
        return median;
    }

    let scale = utils::mad(sorted_data, median) * kernel.scale_factor();
    if scale <= 0.0 || !scale.is_finite() {
        return median;
    }

    let cutoff = cval * scale;
    let mut center = median;
    for _ in 0..MAX_ITERATIONS {
        let (weighted_residuals, weight_sum) =
            sorted_data
                .iter()
                .fold((0.0, 0.0), |(num, den), &x| {
                    let r = x - center;
                    let w = kernel.weight(r / cutoff);
                    (num + w * r, den + w)
                });

        // Every point rejected: nothing left to move the center
        if weight_sum <= 0.0 || !weight_sum.is_finite() {
            break;
        }

        let step = weighted_residuals / weight_sum;
        if !step.is_finite() {
            break;
        }
        center += step;
        if step.abs() < CONVERGENCE_TOLERANCE {
            break;
        }
    }
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn clean_with_outlier() -> Vec<f64> {
        let mut data = vec![
            0.98, 0.99, 1.0, 1.01, 1.02, 0.995, 1.005, 0.985, 1.015, 1.0, 0.99, 1.01,
        ];
        data.push(25.0);
        utils::sorted(&data)
    }

    #[test]
    fn test_rejects_invalid_cval() {
        assert!(Biweight::new(0.0).is_err());
        assert!(Huber::new(-1.5).is_err());
        assert!(Welsch::new(f64::NAN).is_err());
        assert!(AndrewSineWave::new(f64::INFINITY).is_err());
        assert!(Biweight::new(6.0).is_ok());
    }

    #[test]
    fn test_defaults_use_kernel_cval() {
        assert_eq!(Biweight::default().cval(), 5.0);
        assert_eq!(AndrewSineWave::default().cval(), 1.339);
        assert_eq!(Welsch::default().cval(), 2.11);
        assert_eq!(Huber::default().cval(), 1.5);
    }

    #[test]
    fn test_constant_window_short_circuits() {
        let data = vec![1.25; 9];
        assert_eq!(Biweight::default().estimate_sorted(&data).unwrap(), 1.25);
        assert_eq!(Huber::default().estimate_sorted(&data).unwrap(), 1.25);
        assert_eq!(Welsch::default().estimate_sorted(&data).unwrap(), 1.25);
        assert_eq!(AndrewSineWave::default().estimate_sorted(&data).unwrap(), 1.25);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(Biweight::default().estimate_sorted(&[3.5]).unwrap(), 3.5);
        assert_eq!(Huber::default().estimate_sorted(&[-2.0]).unwrap(), -2.0);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(Biweight::default().estimate_sorted(&[]).is_err());
    }

    #[test]
    fn test_symmetric_data_centers_on_median() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert_abs_diff_eq!(Biweight::default().estimate_sorted(&data).unwrap(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(Huber::default().estimate_sorted(&data).unwrap(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(Welsch::default().estimate_sorted(&data).unwrap(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            AndrewSineWave::default().estimate_sorted(&data).unwrap(),
            4.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_outlier_resistance() {
        let data = clean_with_outlier();
        let clean_mean = 1.0;
        let plain_mean = utils::mean(&data);

        for (name, est) in [
            ("biweight", Biweight::default().estimate_sorted(&data).unwrap()),
            ("andrews", AndrewSineWave::default().estimate_sorted(&data).unwrap()),
            ("welsch", Welsch::default().estimate_sorted(&data).unwrap()),
            ("huber", Huber::default().estimate_sorted(&data).unwrap()),
        ] {
            assert!(
                (est - clean_mean).abs() < (plain_mean - clean_mean).abs(),
                "{name} estimate {est} not closer than mean {plain_mean}"
            );
            assert_abs_diff_eq!(est, clean_mean, epsilon = 0.01);
        }
    }

    #[test]
    fn test_redescending_kernels_ignore_outlier_completely() {
        let data = clean_with_outlier();
        let without: Vec<f64> = data.iter().copied().filter(|&x| x < 2.0).collect();
        let with = Biweight::default().estimate_sorted(&data).unwrap();
        let reference = Biweight::default().estimate_sorted(&without).unwrap();
        assert_relative_eq!(with, reference, epsilon = 1e-5);
    }

    #[test]
    fn test_estimate_sorts_for_caller() {
        let mut data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        let est = Biweight::default().estimate(&mut data).unwrap();
        assert_abs_diff_eq!(est, 3.0, epsilon = 1e-9);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_tiny_cval_terminates() {
        // Every residual lands outside the support after the first step
        let data = vec![0.0, 1.0, 10.0, 11.0];
        let est = Biweight::new(1e-9).unwrap().estimate_sorted(&data).unwrap();
        assert!(est.is_finite());
    }

    #[test]
    fn test_names() {
        assert_eq!(Biweight::default().name(), "Biweight");
        assert_eq!(Huber::default().name(), "Huber");
        assert!(Welsch::default().is_robust());
        assert_eq!(AndrewSineWave::default().breakdown_point(), 0.5);
    }
}
