//! Detrending method identifiers and their default tuning constants

use lazy_static::lazy_static;
use robust_core::{Error, Result};
use robust_location::LocationKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Every method name accepted by the detrender
///
/// The first nine slide a time window and apply a robust location estimator.
/// The rest delegate each segment to a registered
/// [`SegmentDetrender`](crate::collaborators::SegmentDetrender).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Mean,
    Median,
    TrimMean,
    Winsorize,
    Biweight,
    #[serde(rename = "andrewsinewave")]
    AndrewSineWave,
    Welsch,
    Huber,
    /// Hodges-Lehmann: median of all pairwise averages in the window, so
    /// quadratic in the number of samples per window in time and memory.
    /// Keep windows to a few hundred samples.
    Hodges,
    Lowess,
    #[serde(rename = "hspline")]
    HSpline,
    #[serde(rename = "supersmoother")]
    SuperSmoother,
    Cofiam,
    Savgol,
    Medfilt,
    Gp,
    Untrendy,
    #[serde(rename = "pspline")]
    PSpline,
}

lazy_static! {
    /// Default `cval` per method when the caller gives none
    ///
    /// Methods absent from the table fall back to 0. Trimmed and winsorized
    /// means never read it; they default to `proportiontocut` instead.
    static ref DEFAULT_CVAL: HashMap<Method, f64> = {
        let mut table = HashMap::new();
        table.insert(Method::Biweight, 5.0);
        table.insert(Method::AndrewSineWave, 1.339);
        table.insert(Method::Welsch, 2.11);
        table.insert(Method::Huber, 1.5);
        // Polynomial order
        table.insert(Method::Savgol, 2.0);
        table
    };
}

impl Method {
    pub const ALL: [Method; 18] = [
        Method::Mean,
        Method::Median,
        Method::TrimMean,
        Method::Winsorize,
        Method::Biweight,
        Method::AndrewSineWave,
        Method::Welsch,
        Method::Huber,
        Method::Hodges,
        Method::Lowess,
        Method::HSpline,
        Method::SuperSmoother,
        Method::Cofiam,
        Method::Savgol,
        Method::Medfilt,
        Method::Gp,
        Method::Untrendy,
        Method::PSpline,
    ];

    /// Identifier used in configuration and error messages
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
            Self::Lowess => "lowess",
            Self::HSpline => "hspline",
            Self::SuperSmoother => "supersmoother",
            Self::Cofiam => "cofiam",
            Self::Savgol => "savgol",
            Self::Medfilt => "medfilt",
            Self::Gp => "gp",
            Self::Untrendy => "untrendy",
            Self::PSpline => "pspline",
        }
    }

    /// Location estimator backing a time-windowed method
    pub fn location_kind(&self) -> Option<LocationKind> {
        Some(match self {
            Self::Mean => LocationKind::Mean,
            Self::Median => LocationKind::Median,
            Self::TrimMean => LocationKind::TrimMean,
            Self::Winsorize => LocationKind::Winsorize,
            Self::Biweight => LocationKind::Biweight,
            Self::AndrewSineWave => LocationKind::AndrewSineWave,
            Self::Welsch => LocationKind::Welsch,
            Self::Huber => LocationKind::Huber,
            Self::Hodges => LocationKind::Hodges,
            Self::Lowess
            | Self::HSpline
            | Self::SuperSmoother
            | Self::Cofiam
            | Self::Savgol
            | Self::Medfilt
            | Self::Gp
            | Self::Untrendy
            | Self::PSpline => return None,
        })
    }

    /// Whether the trend comes from the sliding time window
    pub fn is_time_windowed(&self) -> bool {
        self.location_kind().is_some()
    }

    /// Whether `window_length` counts cadences instead of time units
    pub fn is_cadence_based(&self) -> bool {
        matches!(self, Self::Savgol | Self::Medfilt)
    }

    /// Whether `cval` is a tail proportion taken from `proportiontocut`
    pub fn uses_proportion(&self) -> bool {
        matches!(self, Self::TrimMean | Self::Winsorize)
    }

    /// Default `cval` for this method given the configured tail proportion
    pub fn default_cval(&self, proportiontocut: f64) -> f64 {
        if self.uses_proportion() {
            return proportiontocut;
        }
        DEFAULT_CVAL.get(self).copied().unwrap_or(0.0)
    }

    /// Whether the defaults table carries an entry for this method
    pub fn has_tabulated_cval(&self) -> bool {
        DEFAULT_CVAL.contains_key(self)
    }

    /// Name of the capability a non-windowed method needs from a backend
    pub fn dependency(&self) -> &'static str {
        match self {
            Self::Lowess => "lowess",
            Self::HSpline => "huber spline",
            Self::SuperSmoother => "supersmoother",
            Self::Cofiam => "cosine filtering",
            Self::Savgol => "savitzky-golay filter",
            Self::Medfilt => "median filter",
            Self::Gp => "gaussian process",
            Self::Untrendy => "untrendy",
            Self::PSpline => "pspline",
            _ => "sliding window",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::InvalidMethod(s.to_string()))
    }
}

impl From<LocationKind> for Method {
    fn from(kind: LocationKind) -> Self {
        match kind {
            LocationKind::Mean => Self::Mean,
            LocationKind::Median => Self::Median,
            LocationKind::TrimMean => Self::TrimMean,
            LocationKind::Winsorize => Self::Winsorize,
            LocationKind::Biweight => Self::Biweight,
            LocationKind::AndrewSineWave => Self::AndrewSineWave,
            LocationKind::Welsch => Self::Welsch,
            LocationKind::Huber => Self::Huber,
            LocationKind::Hodges => Self::Hodges,
        }
    }
}
