//! Cadence-based filters: window lengths count samples, not time
//!
//! Both filters use an odd window of [`cadence_window`] samples, shrunk to
//! the largest odd count that fits when a segment is shorter.

use super::{CollaboratorParams, SegmentDetrender};
use crate::config::cadence_window;
use nalgebra::DMatrix;
use robust_core::{utils, Error, Result};

/// Largest odd window not exceeding `n` samples
fn fit_window(window: usize, n: usize) -> usize {
    let window = window.min(n);
    if window % 2 == 0 {
        window.saturating_sub(1).max(1)
    } else {
        window
    }
}

/// Running median over an odd number of cadences
///
/// Near the ends the window is truncated to the samples that exist. No
/// zero padding is applied, so edge values differ from
/// `scipy.signal.medfilt`, which pulls them toward zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct MedianFilter;

impl SegmentDetrender for MedianFilter {
    fn name(&self) -> &str {
        "median filter"
    }

    fn detrend_segment(&self, _time: &[f64], flux: &[f64], params: &CollaboratorParams) -> Result<Vec<f64>> {
        let n = flux.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let half = fit_window(cadence_window(params.window_length), n) / 2;
        let mut scratch = Vec::with_capacity(2 * half + 1);
        Ok((0..n)
            .map(|i| {
                let lo = i.saturating_sub(half);
                let hi = (i + half + 1).min(n);
                scratch.clear();
                scratch.extend_from_slice(&flux[lo..hi]);
                utils::median_in_place(&mut scratch)
            })
            .collect())
    }
}

/// Savitzky-Golay smoothing: local least-squares polynomial fits
///
/// `cval` is the polynomial order (default 2). Samples within half a window
/// of either end take their value from the polynomial fitted to the first
/// or last full window.
#[derive(Clone, Copy, Debug, Default)]
pub struct SavitzkyGolay;

impl SavitzkyGolay {
    /// Polynomial order encoded in `cval`
    fn order(cval: Option<f64>) -> Result<usize> {
        let order = cval.unwrap_or(2.0);
        if !(order.is_finite() && order >= 0.0 && order.fract() == 0.0) {
            return Err(Error::InvalidParameter(format!(
                "savgol polynomial order must be a non-negative integer, got {order}"
            )));
        }
        Ok(order as usize)
    }

    /// Projection onto polynomials of `order` over `window` equally spaced points
    ///
    /// Row `r` holds the weights that evaluate the least-squares fit at
    /// offset `r` of the window.
    fn projection(window: usize, order: usize) -> Result<DMatrix<f64>> {
        let half = (window / 2) as f64;
        let design = DMatrix::from_fn(window, order + 1, |row, col| (row as f64 - half).powi(col as i32));
        let xt = design.transpose();
        let xtx = &xt * &design;

        let coeffs = match xtx.clone().cholesky() {
            Some(chol) => chol.solve(&xt),
            None => xtx
                .svd(true, true)
                .solve(&xt, 1e-10)
                .map_err(|e| Error::Computation(format!("savgol projection: {e}")))?,
        };
        Ok(&design * coeffs)
    }
}

impl SegmentDetrender for SavitzkyGolay {
    fn name(&self) -> &str {
        "savitzky-golay filter"
    }

    fn detrend_segment(&self, _time: &[f64], flux: &[f64], params: &CollaboratorParams) -> Result<Vec<f64>> {
        let n = flux.len();
        let order = Self::order(params.cval)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let window = fit_window(cadence_window(params.window_length), n);
        if window == 1 {
            return Ok(flux.to_vec());
        }
        // Order window - 1 interpolates the window exactly
        let order = order.min(window - 1);
        let hat = Self::projection(window, order)?;
        let half = window / 2;

        Ok((0..n)
            .map(|i| {
                let (start, row) = if i < half {
                    (0, i)
                } else if i + half >= n {
                    (n - window, i + window - n)
                } else {
                    (i - half, half)
                };
                flux[start..start + window]
                    .iter()
                    .enumerate()
                    .map(|(j, &f)| hat[(row, j)] * f)
                    .sum::<f64>()
            })
            .collect())
    }
}
