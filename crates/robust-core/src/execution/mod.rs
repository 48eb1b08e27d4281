//! Execution strategies for independent per-item computations
//!
//! Detrending has two embarrassingly parallel loops: segments are independent
//! of each other, and every window inside a segment is independent of every
//! other window. Both are driven through [`ExecutionStrategy`] so the caller
//! picks sequential or rayon-backed execution once.
//!
//! Results are collected in index order regardless of strategy, so the output
//! is identical for both.

use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Process items sequentially
    #[default]
    Sequential,
    /// Process items in parallel on the rayon global pool
    ///
    /// Falls back to sequential execution when the `parallel` feature is off.
    Parallel,
}

impl ExecutionStrategy {
    /// Whether this strategy will actually run on multiple threads
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel) && cfg!(feature = "parallel")
    }

    /// Number of worker threads this strategy uses
    pub fn num_threads(&self) -> usize {
        if self.is_parallel() {
            parallel::num_threads()
        } else {
            1
        }
    }

    /// Map `f` over `0..count`, collecting results in index order
    pub fn map_indexed<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        if self.is_parallel() {
            return parallel::map_indexed(count, f);
        }
        (0..count).map(f).collect()
    }

    /// Map `f` over `0..count` with a per-worker scratch value built by `init`
    ///
    /// The scratch is reused across items handled by the same worker, which
    /// lets window estimators avoid one allocation per window.
    pub fn map_indexed_with<S, R, I, F>(&self, count: usize, init: I, f: F) -> Vec<R>
    where
        I: Fn() -> S + Sync + Send,
        F: Fn(&mut S, usize) -> R + Sync + Send,
        R: Send,
    {
        if self.is_parallel() {
            return parallel::map_indexed_with(count, init, f);
        }
        let mut scratch = init();
        (0..count).map(|i| f(&mut scratch, i)).collect()
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    pub(super) fn num_threads() -> usize {
        rayon::current_num_threads()
    }

    pub(super) fn map_indexed<R, F>(count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).into_par_iter().map(f).collect()
    }

    pub(super) fn map_indexed_with<S, R, I, F>(count: usize, init: I, f: F) -> Vec<R>
    where
        I: Fn() -> S + Sync + Send,
        F: Fn(&mut S, usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).into_par_iter().map_init(init, f).collect()
    }
}

// Only reachable through `is_parallel`, which is false without the feature.
#[cfg(not(feature = "parallel"))]
mod parallel {
    pub(super) fn num_threads() -> usize {
        1
    }

    pub(super) fn map_indexed<R, F>(count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R,
    {
        (0..count).map(f).collect()
    }

    pub(super) fn map_indexed_with<S, R, I, F>(count: usize, init: I, f: F) -> Vec<R>
    where
        I: Fn() -> S,
        F: Fn(&mut S, usize) -> R,
    {
        let mut scratch = init();
        (0..count).map(|i| f(&mut scratch, i)).collect()
    }
}
