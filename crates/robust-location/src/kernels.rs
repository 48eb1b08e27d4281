//! Weight kernels for the M-estimators
//!
//! All kernels take the standardized residual `u = (x - center) / (cval * scale)`.

use crate::traits::WeightKernel;
use robust_core::utils::MAD_CONSISTENCY;
use std::f64::consts::PI;

/// Tukey's biweight: `(1 - u²)²` inside the unit interval, zero outside
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BiweightKernel;

impl WeightKernel for BiweightKernel {
    #[inline]
    fn weight(&self, u: f64) -> f64 {
        if u.abs() >= 1.0 {
            return 0.0;
        }
        let t = 1.0 - u * u;
        t * t
    }

    fn name(&self) -> &'static str {
        "Biweight"
    }

    fn default_cval(&self) -> f64 {
        5.0
    }

    fn is_redescending(&self) -> bool {
        true
    }
}

/// Andrews' sine wave: `sin(u) / u` for `|u| < π`, zero outside
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AndrewsKernel;

impl WeightKernel for AndrewsKernel {
    #[inline]
    fn weight(&self, u: f64) -> f64 {
        let a = u.abs();
        if a >= PI {
            0.0
        } else if a < f64::EPSILON {
            1.0
        } else {
            u.sin() / u
        }
    }

    fn name(&self) -> &'static str {
        "Andrews sine wave"
    }

    fn default_cval(&self) -> f64 {
        1.339
    }

    fn is_redescending(&self) -> bool {
        true
    }
}

/// Welsch (Leclerc): `exp(-u² / 2)`
///
/// Never reaches zero, but decays fast enough to suppress gross outliers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WelschKernel;

impl WeightKernel for WelschKernel {
    #[inline]
    fn weight(&self, u: f64) -> f64 {
        (-0.5 * u * u).exp()
    }

    fn name(&self) -> &'static str {
        "Welsch"
    }

    fn default_cval(&self) -> f64 {
        2.11
    }

    fn is_redescending(&self) -> bool {
        false
    }
}

/// Huber: full weight inside the unit interval, `1 / |u|` outside
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HuberKernel;

impl WeightKernel for HuberKernel {
    #[inline]
    fn weight(&self, u: f64) -> f64 {
        let a = u.abs();
        if a <= 1.0 {
            1.0
        } else {
            1.0 / a
        }
    }

    fn name(&self) -> &'static str {
        "Huber"
    }

    fn scale_factor(&self) -> f64 {
        MAD_CONSISTENCY
    }

    fn default_cval(&self) -> f64 {
        1.5
    }

    fn is_redescending(&self) -> bool {
        false
    }
}
