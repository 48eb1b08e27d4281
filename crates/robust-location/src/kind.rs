//! Closed set of location estimator kinds and static dispatch over them
//!
//! Callers pick a [`LocationKind`] at runtime but the windowing loop should
//! not branch on it per sample. [`LocationKind::dispatch`] builds the
//! concrete estimator once and hands it to an [`EstimatorVisitor`], whose
//! generic `visit` is monomorphized for every estimator type.

use crate::hodges::HodgesLehmann;
use crate::mestimator::{AndrewSineWave, Biweight, Huber, Welsch};
use crate::simple::{Mean, Median};
use crate::trimmed::{TrimmedMean, WinsorizedMean};
use robust_core::{CentralTendencyEstimator, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Robust location estimator selectable by the detrending engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Mean,
    Median,
    /// Tail proportion in `cval`
    TrimMean,
    /// Tail proportion in `cval`
    Winsorize,
    Biweight,
    #[serde(rename = "andrewsinewave")]
    AndrewSineWave,
    Welsch,
    Huber,
    Hodges,
}

impl LocationKind {
    /// Every kind, in a stable order
    pub const ALL: [LocationKind; 9] = [
        LocationKind::Mean,
        LocationKind::Median,
        LocationKind::TrimMean,
        LocationKind::Winsorize,
        LocationKind::Biweight,
        LocationKind::AndrewSineWave,
        LocationKind::Welsch,
        LocationKind::Huber,
        LocationKind::Hodges,
    ];

    /// Method identifier used on the detrending interface
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::TrimMean => "trim_mean",
            Self::Winsorize => "winsorize",
            Self::Biweight => "biweight",
            Self::AndrewSineWave => "andrewsinewave",
            Self::Welsch => "welsch",
            Self::Huber => "huber",
            Self::Hodges => "hodges",
        }
    }

    /// Whether `cval` is read by this kind
    pub fn uses_cval(&self) -> bool {
        !matches!(self, Self::Mean | Self::Median | Self::Hodges)
    }

    /// Whether `cval` is interpreted as a tail proportion
    pub fn uses_proportion(&self) -> bool {
        matches!(self, Self::TrimMean | Self::Winsorize)
    }

    /// Whether the estimate comes from an iterative reweighting loop
    pub fn is_iterative(&self) -> bool {
        matches!(
            self,
            Self::Biweight | Self::AndrewSineWave | Self::Welsch | Self::Huber
        )
    }

    /// Build the estimator for `cval` and run `visitor` with it
    ///
    /// Fails only when `cval` is invalid for the kind.
    pub fn dispatch<V: EstimatorVisitor>(&self, cval: f64, visitor: V) -> Result<V::Output> {
        Ok(match self {
            Self::Mean => visitor.visit(Mean),
            Self::Median => visitor.visit(Median),
            Self::TrimMean => visitor.visit(TrimmedMean::new(cval)?),
            Self::Winsorize => visitor.visit(WinsorizedMean::new(cval)?),
            Self::Biweight => visitor.visit(Biweight::new(cval)?),
            Self::AndrewSineWave => visitor.visit(AndrewSineWave::new(cval)?),
            Self::Welsch => visitor.visit(Welsch::new(cval)?),
            Self::Huber => visitor.visit(Huber::new(cval)?),
            Self::Hodges => visitor.visit(HodgesLehmann),
        })
    }

    /// Check that `cval` is acceptable for this kind without estimating anything
    pub fn validate_cval(&self, cval: f64) -> Result<()> {
        self.dispatch(cval, Validate)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generic continuation receiving a concrete estimator
pub trait EstimatorVisitor {
    type Output;

    fn visit<E: CentralTendencyEstimator>(self, estimator: E) -> Self::Output;
}

struct Validate;

impl EstimatorVisitor for Validate {
    type Output = ();

    fn visit<E: CentralTendencyEstimator>(self, _estimator: E) {}
}

struct EstimateOnce<'a> {
    data: &'a mut [f64],
}

impl EstimatorVisitor for EstimateOnce<'_> {
    type Output = Result<f64>;

    fn visit<E: CentralTendencyEstimator>(self, estimator: E) -> Self::Output {
        estimator.estimate(self.data)
    }
}

/// One-off location estimate of `data` with the given kind and tuning value
///
/// The slice may be reordered.
///
/// ```rust
/// use robust_location::{location, LocationKind};
///
/// let mut window = vec![1.0, 1.01, 0.99, 1.0, 8.0];
/// let center = location(&mut window, LocationKind::Biweight, 5.0).unwrap();
/// assert!((center - 1.0).abs() < 0.01);
/// ```
pub fn location(data: &mut [f64], kind: LocationKind, cval: f64) -> Result<f64> {
    kind.dispatch(cval, EstimateOnce { data })?
}
