//! Core traits and types for robust light curve detrending
//!
//! This crate provides the pieces shared by every `robust-*` crate:
//!
//! - [`Error`] / [`Result`]: the unified error taxonomy
//! - [`CentralTendencyEstimator`]: the interface all location estimators implement
//! - [`ExecutionStrategy`]: sequential or rayon-parallel mapping of independent work
//! - [`utils`]: sorting, median and MAD helpers on `f64` slices
//!
//! # Example
//!
//! ```rust
//! use robust_core::{utils, ExecutionStrategy};
//!
//! let windows = vec![vec![1.0, 3.0, 2.0], vec![5.0, 4.0, 6.0]];
//! let medians = ExecutionStrategy::Sequential
//!     .map_indexed(windows.len(), |i| utils::median_sorted(&utils::sorted(&windows[i])));
//! assert_eq!(medians, vec![2.0, 5.0]);
//! ```

pub mod error;
pub mod execution;
pub mod traits;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};
pub use execution::ExecutionStrategy;
pub use traits::CentralTendencyEstimator;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CentralTendencyEstimator, Error, ExecutionStrategy, Result};
}
