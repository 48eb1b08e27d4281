//! Detrending configuration and parameter resolution
//!
//! [`FlattenConfig`] holds what the caller asked for, with optional fields
//! left unset. [`FlattenConfig::resolve`] fills in the defaults and
//! validates everything up front so no computation starts on a bad request.

use crate::method::Method;
use robust_core::{Error, ExecutionStrategy, Result};
use serde::{Deserialize, Serialize};

/// Window length used when none is given, in time units (or cadences)
pub const DEFAULT_WINDOW_LENGTH: f64 = 2.0;

/// Tail proportion used by `trim_mean` and `winsorize` when none is given
pub const DEFAULT_PROPORTION_TO_CUT: f64 = 0.1;

/// Caller-facing options for a detrending run
///
/// ```rust
/// use robust_detrend::{FlattenConfig, Method};
///
/// let config = FlattenConfig::default()
///     .with_method(Method::Welsch)
///     .with_window_length(0.75)
///     .with_edge_cutoff(0.25);
/// let params = config.resolve().unwrap();
/// assert_eq!(params.cval, 2.11);
/// assert_eq!(params.break_tolerance, 0.375);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Detrending method
    pub method: Method,
    /// Window length; cadences for `savgol` and `medfilt`
    pub window_length: Option<f64>,
    /// Samples closer than this to either end of a segment get no trend
    pub edge_cutoff: f64,
    /// Largest time gap that does not split a segment; `0` disables splitting.
    /// Defaults to half the window length.
    pub break_tolerance: Option<f64>,
    /// Tuning constant; defaults per method
    pub cval: Option<f64>,
    /// Tail proportion for `trim_mean` and `winsorize`
    pub proportiontocut: f64,
    /// Whether the trend is returned alongside the flattened flux
    pub return_trend: bool,
    /// Sequential or parallel evaluation of segments and windows
    pub strategy: ExecutionStrategy,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            method: Method::Biweight,
            window_length: None,
            edge_cutoff: 0.0,
            break_tolerance: None,
            cval: None,
            proportiontocut: DEFAULT_PROPORTION_TO_CUT,
            return_trend: false,
            strategy: ExecutionStrategy::Sequential,
        }
    }
}

impl FlattenConfig {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_window_length(mut self, window_length: f64) -> Self {
        self.window_length = Some(window_length);
        self
    }

    pub fn with_edge_cutoff(mut self, edge_cutoff: f64) -> Self {
        self.edge_cutoff = edge_cutoff;
        self
    }

    pub fn with_break_tolerance(mut self, break_tolerance: f64) -> Self {
        self.break_tolerance = Some(break_tolerance);
        self
    }

    pub fn with_cval(mut self, cval: f64) -> Self {
        self.cval = Some(cval);
        self
    }

    pub fn with_proportiontocut(mut self, proportiontocut: f64) -> Self {
        self.proportiontocut = proportiontocut;
        self
    }

    pub fn with_return_trend(mut self, return_trend: bool) -> Self {
        self.return_trend = return_trend;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Apply defaults and validate every parameter
    pub fn resolve(&self) -> Result<ResolvedParams> {
        if !(self.proportiontocut > 0.0 && self.proportiontocut < 0.5) {
            return Err(Error::invalid_proportion(self.proportiontocut));
        }

        let window_length = self.window_length.unwrap_or(DEFAULT_WINDOW_LENGTH);
        if !(window_length.is_finite() && window_length > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "window_length must be positive and finite, got {window_length}"
            )));
        }

        if !(self.edge_cutoff.is_finite() && self.edge_cutoff >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "edge_cutoff must be non-negative and finite, got {}",
                self.edge_cutoff
            )));
        }

        let break_tolerance = match self.break_tolerance {
            None => window_length / 2.0,
            Some(tol) if tol.is_nan() || tol < 0.0 => {
                return Err(Error::InvalidParameter(format!(
                    "break_tolerance must be non-negative, got {tol}"
                )));
            }
            Some(tol) if tol == 0.0 => f64::INFINITY,
            Some(tol) => tol,
        };

        if let Some(cval) = self.cval {
            if !cval.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "cval must be finite, got {cval}"
                )));
            }
        }
        let cval = self
            .cval
            .unwrap_or_else(|| self.method.default_cval(self.proportiontocut));

        if let Some(kind) = self.method.location_kind() {
            kind.validate_cval(cval)?;
        }

        // Backends only see a cval that was given or has a tabulated default
        let backend_cval = match self.cval {
            Some(cval) => Some(cval),
            None if self.method.has_tabulated_cval() => Some(cval),
            None => None,
        };

        Ok(ResolvedParams {
            method: self.method,
            window_length,
            edge_cutoff: self.edge_cutoff,
            break_tolerance,
            cval,
            backend_cval,
            proportiontocut: self.proportiontocut,
            return_trend: self.return_trend,
            strategy: self.strategy,
        })
    }
}

/// Fully defaulted and validated parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedParams {
    pub method: Method,
    pub window_length: f64,
    pub edge_cutoff: f64,
    /// Never zero; infinite when gap splitting is disabled
    pub break_tolerance: f64,
    /// Tuning constant for the location estimator
    pub cval: f64,
    /// Tuning constant handed to a segment backend, if any
    pub backend_cval: Option<f64>,
    pub proportiontocut: f64,
    pub return_trend: bool,
    pub strategy: ExecutionStrategy,
}

/// Odd cadence count for a cadence-based window
///
/// Rounds to the nearest whole cadence and bumps even counts up by one.
pub fn cadence_window(window_length: f64) -> usize {
    let cadences = window_length.round().max(1.0) as usize;
    if cadences % 2 == 0 {
        cadences + 1
    } else {
        cadences
    }
}
