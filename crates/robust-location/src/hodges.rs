//! Hodges-Lehmann location estimator

use robust_core::{utils, CentralTendencyEstimator, Error, Result};

/// Median of the Walsh averages `(x_i + x_j) / 2` for all `i <= j`
///
/// Quadratic in the window size in both time and memory.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HodgesLehmann;

impl HodgesLehmann {
    fn walsh_median(data: &[f64], walsh: &mut Vec<f64>) -> Result<f64> {
        let n = data.len();
        match n {
            0 => Err(Error::empty_input("hodges")),
            1 => Ok(data[0]),
            _ => {
                walsh.clear();
                walsh.reserve(n * (n + 1) / 2);
                for (i, &a) in data.iter().enumerate() {
                    walsh.extend(data[i..].iter().map(|&b| 0.5 * (a + b)));
                }
                Ok(utils::median_in_place(walsh))
            }
        }
    }
}

impl CentralTendencyEstimator for HodgesLehmann {
    // Pairwise averages do not depend on order
    fn estimate(&self, data: &mut [f64]) -> Result<f64> {
        Self::walsh_median(data, &mut Vec::new())
    }

    fn estimate_with_work(&self, data: &mut [f64], work: &mut Vec<f64>) -> Result<f64> {
        Self::walsh_median(data, work)
    }

    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        Self::walsh_median(sorted_data, &mut Vec::new())
    }

    fn name(&self) -> &str {
        "Hodges-Lehmann"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        // 1 - 1/sqrt(2)
        0.293
    }
}
