//! Robust light curve detrending
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`robust_core`]: error type, execution strategies and slice utilities
//! - [`robust_location`]: robust location estimators (biweight, Huber,
//!   Welsch, Andrews, Hodges-Lehmann, trimmed and winsorized means)
//! - [`robust_detrend`]: gap segmentation, sliding-window trends and the
//!   [`Flattener`] pipeline
//!
//! ```rust
//! use robust_lightcurve::{flatten, FlattenConfig, Method};
//!
//! let time: Vec<f64> = (0..100).map(|i| i as f64 * 0.02).collect();
//! let flux = vec![1.02; 100];
//! let output = flatten(&time, &flux, &FlattenConfig::new(Method::Biweight)).unwrap();
//! assert!(output.flux.iter().all(|&f| f == 1.0));
//! ```

pub use robust_core;
pub use robust_detrend;
pub use robust_location;

pub use robust_core::{Error, ExecutionStrategy, Result};
pub use robust_detrend::{flatten, FlattenConfig, FlattenOutput, Flattener, Method};
