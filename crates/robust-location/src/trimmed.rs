//! Trimmed and winsorized means

use robust_core::{utils, CentralTendencyEstimator, Error, Result};

/// Number of values affected in each tail for a sample of size `n`
///
/// Rounds down; with `proportion < 0.5` at least
/// one value always survives.
#[inline]
pub fn tail_count(n: usize, proportion: f64) -> usize {
    (proportion * n as f64).floor() as usize
}

fn validate_proportion(proportion: f64) -> Result<()> {
    if proportion > 0.0 && proportion < 0.5 {
        Ok(())
    } else {
        Err(Error::invalid_proportion(proportion))
    }
}

/// Mean after discarding the lowest and highest `proportion` of the sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimmedMean {
    proportion: f64,
}

impl TrimmedMean {
    /// Create with specified trim proportion per tail, in (0, 0.5)
    pub fn new(proportion: f64) -> Result<Self> {
        validate_proportion(proportion)?;
        Ok(Self { proportion })
    }

    /// Get the trim proportion
    pub fn proportion(&self) -> f64 {
        self.proportion
    }
}

impl Default for TrimmedMean {
    /// 10% cut from each tail
    fn default() -> Self {
        Self { proportion: 0.1 }
    }
}

impl CentralTendencyEstimator for TrimmedMean {
    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        let n = sorted_data.len();
        if n == 0 {
            return Err(Error::empty_input("trim_mean"));
        }
        let k = tail_count(n, self.proportion);
        Ok(utils::mean(&sorted_data[k..n - k]))
    }

    fn name(&self) -> &str {
        "Trimmed Mean"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        self.proportion
    }
}

/// Mean after clamping each tail's `proportion` to the nearest retained value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WinsorizedMean {
    proportion: f64,
}

impl WinsorizedMean {
    /// Create with specified winsorization proportion per tail, in (0, 0.5)
    pub fn new(proportion: f64) -> Result<Self> {
        validate_proportion(proportion)?;
        Ok(Self { proportion })
    }

    /// Get the winsor proportion
    pub fn proportion(&self) -> f64 {
        self.proportion
    }
}

impl Default for WinsorizedMean {
    fn default() -> Self {
        Self { proportion: 0.1 }
    }
}

impl CentralTendencyEstimator for WinsorizedMean {
    fn estimate_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        let n = sorted_data.len();
        if n == 0 {
            return Err(Error::empty_input("winsorize"));
        }
        let k = tail_count(n, self.proportion);
        if k == 0 {
            return Ok(utils::mean(sorted_data));
        }

        let low = sorted_data[k];
        let high = sorted_data[n - k - 1];
        let shift = low;
        let inner: f64 = sorted_data[k..n - k].iter().map(|&x| x - shift).sum();
        let tails = k as f64 * ((low - shift) + (high - shift));
        Ok(shift + (inner + tails) / n as f64)
    }

    fn name(&self) -> &str {
        "Winsorized Mean"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        self.proportion
    }
}
