//! Classical location estimators: arithmetic mean and median

use robust_core::{utils, CentralTendencyEstimator, Error, Result};

/// Arithmetic mean
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mean;

impl CentralTendencyEstimator for Mean {
    // No ordering needed
    fn estimate(&self, data: &mut [f64]) -> Result<f64> {
        self.estimate_sorted(data)
    }

    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        if sorted_data.is_empty() {
            return Err(Error::empty_input("mean"));
        }
        Ok(utils::mean(sorted_data))
    }

    fn name(&self) -> &str {
        "Mean"
    }

    fn is_robust(&self) -> bool {
        false
    }

    fn breakdown_point(&self) -> f64 {
        0.0
    }
}

/// Sample median (average of the two middle values for even counts)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Median;

impl CentralTendencyEstimator for Median {
    fn estimate(&self, data: &mut [f64]) -> Result<f64> {
        if data.is_empty() {
            return Err(Error::empty_input("median"));
        }
        Ok(utils::median_in_place(data))
    }

    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        if sorted_data.is_empty() {
            return Err(Error::empty_input("median"));
        }
        Ok(utils::median_sorted(sorted_data))
    }

    fn name(&self) -> &str {
        "Median"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        0.5
    }
}
