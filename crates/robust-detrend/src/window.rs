//! Sliding time-window trend estimation within one segment
//!
//! For every sample `i` the window holds all samples `j` of the segment with
//! `|time[j] - time[i]| <= window_length / 2`. Because time is ascending the
//! window bounds are found by binary search, and the estimator runs on a
//! per-worker scratch copy of the window's flux.
//!
//! Samples within `edge_cutoff` of either end of the segment, boundary
//! included, get a NaN trend. The cutoff is clamped to half the window so it never blanks more
//! than a window's worth of data at each end.

use robust_core::{CentralTendencyEstimator, Error, ExecutionStrategy, Result};
use robust_location::{EstimatorVisitor, LocationKind};
use tracing::trace;

/// Geometry and estimator of the sliding window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSpec {
    pub kind: LocationKind,
    pub window_length: f64,
    pub edge_cutoff: f64,
    pub cval: f64,
}

impl WindowSpec {
    pub fn new(kind: LocationKind, window_length: f64, edge_cutoff: f64, cval: f64) -> Result<Self> {
        if !(window_length.is_finite() && window_length > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "window_length must be positive and finite, got {window_length}"
            )));
        }
        if !(edge_cutoff.is_finite() && edge_cutoff >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "edge_cutoff must be non-negative and finite, got {edge_cutoff}"
            )));
        }
        kind.validate_cval(cval)?;
        Ok(Self {
            kind,
            window_length,
            edge_cutoff,
            cval,
        })
    }

    pub fn half_window(&self) -> f64 {
        self.window_length / 2.0
    }

    /// Edge cutoff actually applied
    pub fn effective_edge_cutoff(&self) -> f64 {
        self.edge_cutoff.min(self.half_window())
    }
}

/// Computes the windowed trend of a segment
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowEstimator {
    strategy: ExecutionStrategy,
}

impl WindowEstimator {
    pub fn new(strategy: ExecutionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Trend value for every sample of one segment
    ///
    /// `time` must be ascending and finite, `flux` finite and of equal
    /// length. A single-sample segment returns its own flux regardless of
    /// the edge cutoff.
    pub fn estimate_segment(&self, time: &[f64], flux: &[f64], spec: &WindowSpec) -> Result<Vec<f64>> {
        if time.len() != flux.len() {
            return Err(Error::size_mismatch(time.len(), flux.len(), "segment flux"));
        }
        match time.len() {
            0 => return Ok(Vec::new()),
            1 => return Ok(vec![flux[0]]),
            _ => {}
        }

        trace!(
            n = time.len(),
            estimator = %spec.kind,
            "sliding window over segment"
        );

        spec.kind.dispatch(
            spec.cval,
            Slide {
                time,
                flux,
                half_window: spec.half_window(),
                edge_cutoff: spec.effective_edge_cutoff(),
                strategy: self.strategy,
            },
        )?
    }
}

/// Per-worker buffers: the window's flux and estimator work space
#[derive(Default)]
struct Scratch {
    window: Vec<f64>,
    work: Vec<f64>,
}

struct Slide<'a> {
    time: &'a [f64],
    flux: &'a [f64],
    half_window: f64,
    edge_cutoff: f64,
    strategy: ExecutionStrategy,
}

impl EstimatorVisitor for Slide<'_> {
    type Output = Result<Vec<f64>>;

    fn visit<E: CentralTendencyEstimator>(self, estimator: E) -> Self::Output {
        let Slide {
            time,
            flux,
            half_window,
            edge_cutoff,
            strategy,
        } = self;
        let first = time[0];
        let last = time[time.len() - 1];

        strategy
            .map_indexed_with(time.len(), Scratch::default, |scratch: &mut Scratch, i| {
                let t = time[i];
                if edge_cutoff > 0.0 && (t - first <= edge_cutoff || last - t <= edge_cutoff) {
                    return Ok(f64::NAN);
                }
                let (lo, hi) = window_bounds(time, t, half_window);
                scratch.window.clear();
                scratch.window.extend_from_slice(&flux[lo..hi]);
                estimator.estimate_with_work(&mut scratch.window, &mut scratch.work)
            })
            .into_iter()
            .collect()
    }
}

/// Index range of samples with `|time[j] - center| <= half_window`
pub fn window_bounds(time: &[f64], center: f64, half_window: f64) -> (usize, usize) {
    let lo = time.partition_point(|&x| x < center - half_window);
    let hi = time.partition_point(|&x| x <= center + half_window);
    (lo, hi)
}
