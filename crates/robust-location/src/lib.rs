//! Robust location estimators for windowed detrending
//!
//! This crate provides the central-tendency estimators the sliding-window
//! detrender applies to every window of flux values:
//! - Mean and median
//! - Trimmed and winsorized means
//! - Hodges-Lehmann (median of Walsh averages)
//! - M-estimators: Tukey's biweight, Andrews' sine wave, Welsch, Huber
//!
//! # Estimator Properties
//!
//! | Estimator | Breakdown Point | Tuning (`cval`) | Default |
//! |-----------|----------------|-----------------|---------|
//! | Mean | 0% | - | — |
//! | Median | 50% | - | — |
//! | Trimmed mean | proportion | tail fraction | 0.1 |
//! | Winsorized mean | proportion | tail fraction | 0.1 |
//! | Hodges-Lehmann | 29% | - | — |
//! | Biweight | 50% | MAD units of full rejection | 5 |
//! | Andrews | 50% | MAD units (scaled by π) | 1.339 |
//! | Welsch | 50% | MAD units of the Gaussian weight | 2.11 |
//! | Huber | 50% | normal-consistent MAD units | 1.5 |
//!
//! The M-estimators run a bounded fixed-point loop; see [`mestimator`] for
//! the iteration cap and convergence tolerance.
//!
//! # Example
//!
//! ```rust
//! use robust_core::CentralTendencyEstimator;
//! use robust_location::{Biweight, Mean};
//!
//! let mut window = vec![1.0, 1.02, 0.98, 1.01, 0.99, 40.0];
//! let robust = Biweight::default().estimate(&mut window.clone()).unwrap();
//! let naive = Mean.estimate(&mut window).unwrap();
//! assert!((robust - 1.0).abs() < (naive - 1.0).abs());
//! ```

pub mod hodges;
pub mod kernels;
pub mod kind;
pub mod mestimator;
pub mod simple;
pub mod traits;
pub mod trimmed;

// Re-exports
pub use hodges::HodgesLehmann;
pub use kernels::{AndrewsKernel, BiweightKernel, HuberKernel, WelschKernel};
pub use kind::{location, EstimatorVisitor, LocationKind};
pub use mestimator::{
    AndrewSineWave, Biweight, Huber, MEstimator, Welsch, CONVERGENCE_TOLERANCE, MAX_ITERATIONS,
};
pub use simple::{Mean, Median};
pub use traits::WeightKernel;
pub use trimmed::{TrimmedMean, WinsorizedMean};
