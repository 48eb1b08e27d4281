//! Robust detrending of gappy light curves
//!
//! [`Flattener`] removes slow flux variations from an irregularly sampled
//! `(time, flux)` series while keeping short features such as transits:
//!
//! 1. samples with non-finite time or flux are masked out
//! 2. [`GapSegmenter`] splits the rest into segments at gaps wider than
//!    `break_tolerance`
//! 3. every segment gets a trend, either from [`WindowEstimator`] (a robust
//!    location estimate in a sliding time window) or from a registered
//!    [`SegmentDetrender`] backend
//! 4. [`TrendAssembler`] puts the trends back on the original grid, NaN at
//!    masked positions, and divides the flux by them
//!
//! # Example
//!
//! ```rust
//! use robust_detrend::{flatten, FlattenConfig, Method};
//!
//! let time: Vec<f64> = (0..500).map(|i| i as f64 * 0.01).collect();
//! let mut flux: Vec<f64> = time.iter().map(|t| 1.0 + 0.01 * (t / 3.0).sin()).collect();
//! flux[42] = f64::NAN;
//!
//! let config = FlattenConfig::new(Method::Biweight).with_window_length(0.5);
//! let output = flatten(&time, &flux, &config).unwrap();
//!
//! assert_eq!(output.flux.len(), time.len());
//! assert!(output.flux[42].is_nan());
//! assert!((output.flux[250] - 1.0).abs() < 1e-4);
//! ```
//!
//! # Methods
//!
//! The time-windowed methods are `mean`, `median`, `trim_mean`,
//! `winsorize`, `biweight`, `andrewsinewave`, `welsch`, `huber` and
//! `hodges`. `medfilt` and `savgol` ship as built-in cadence filters. The
//! remaining methods (`lowess`, `hspline`, `supersmoother`, `cofiam`, `gp`,
//! `untrendy`, `pspline`) need a backend registered in a
//! [`CollaboratorRegistry`]; without one, flattening fails with
//! `MissingCollaborator`.

pub mod assembler;
pub mod collaborators;
pub mod config;
pub mod flatten;
pub mod gaps;
pub mod method;
pub mod window;

pub use assembler::{finite_mask, TrendAssembler};
pub use collaborators::{
    CollaboratorParams, CollaboratorRegistry, MedianFilter, SavitzkyGolay, SegmentDetrender,
};
pub use config::{FlattenConfig, ResolvedParams, DEFAULT_PROPORTION_TO_CUT, DEFAULT_WINDOW_LENGTH};
pub use flatten::{flatten, FlattenOutput, Flattener};
pub use gaps::{GapSegmenter, Segment};
pub use method::Method;
pub use window::{WindowEstimator, WindowSpec};

pub use robust_core::{Error, ExecutionStrategy, Result};
