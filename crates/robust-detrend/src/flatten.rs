//! End-to-end detrending: mask, segment, estimate, reassemble, normalize

use crate::assembler::{compress, finite_mask, TrendAssembler};
use crate::collaborators::{CollaboratorParams, CollaboratorRegistry, SegmentDetrender};
use crate::config::{FlattenConfig, ResolvedParams};
use crate::gaps::GapSegmenter;
use crate::window::{WindowEstimator, WindowSpec};
use robust_core::{Error, ExecutionStrategy, Result};
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Flattened flux and, when requested, the trend it was divided by
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenOutput {
    pub flux: Vec<f64>,
    pub trend: Option<Vec<f64>>,
}

impl FlattenOutput {
    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }

    pub fn into_parts(self) -> (Vec<f64>, Option<Vec<f64>>) {
        (self.flux, self.trend)
    }
}

/// How each segment's trend is produced, decided once per run
enum SegmentBackend {
    Windowed(WindowEstimator, WindowSpec),
    External(Arc<dyn SegmentDetrender>, CollaboratorParams),
}

impl SegmentBackend {
    fn select(params: &ResolvedParams, registry: &CollaboratorRegistry) -> Result<Self> {
        match params.method.location_kind() {
            Some(kind) => Ok(Self::Windowed(
                WindowEstimator::new(params.strategy),
                WindowSpec::new(kind, params.window_length, params.edge_cutoff, params.cval)?,
            )),
            None => Ok(Self::External(
                registry.resolve(params.method)?,
                CollaboratorParams {
                    method: params.method,
                    window_length: params.window_length,
                    cval: params.backend_cval,
                },
            )),
        }
    }

    fn detrend(&self, index: usize, time: &[f64], flux: &[f64]) -> Result<Vec<f64>> {
        trace!(segment = index, len = flux.len(), "detrending segment");
        match self {
            Self::Windowed(estimator, spec) => estimator.estimate_segment(time, flux, spec),
            Self::External(_, _) if flux.len() == 1 => Ok(vec![flux[0]]),
            Self::External(backend, params) => {
                let trend = backend.detrend_segment(time, flux, params)?;
                if trend.len() != flux.len() {
                    return Err(Error::segment_mismatch(index, flux.len(), trend.len()));
                }
                Ok(trend)
            }
        }
    }
}

/// Detrends light curves with a fixed configuration and backend registry
///
/// ```rust
/// use robust_detrend::{FlattenConfig, Flattener, Method};
///
/// let time: Vec<f64> = (0..200).map(|i| i as f64 * 0.02).collect();
/// let flux: Vec<f64> = time.iter().map(|t| 1.0 + 0.002 * t).collect();
///
/// let flattener = Flattener::new(
///     FlattenConfig::new(Method::Median)
///         .with_window_length(0.5)
///         .with_return_trend(true),
/// );
/// let output = flattener.flatten(&time, &flux).unwrap();
/// assert_eq!(output.len(), time.len());
/// assert!(output.flux.iter().all(|f| (f - 1.0).abs() < 1e-3));
/// ```
#[derive(Clone, Debug)]
pub struct Flattener {
    config: FlattenConfig,
    registry: CollaboratorRegistry,
}

impl Flattener {
    /// Flattener with the built-in backends
    pub fn new(config: FlattenConfig) -> Self {
        Self::with_registry(config, CollaboratorRegistry::with_builtin())
    }

    pub fn with_registry(config: FlattenConfig, registry: CollaboratorRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    pub fn registry(&self) -> &CollaboratorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CollaboratorRegistry {
        &mut self.registry
    }

    /// Divide `flux` by its robust trend
    ///
    /// Both outputs have the input length. Positions with non-finite time or
    /// flux, and positions blanked by the edge cutoff, are NaN in both.
    /// `time` must be ascending over its finite entries.
    #[instrument(skip(self, time, flux), fields(n = time.len(), method = %self.config.method))]
    pub fn flatten(&self, time: &[f64], flux: &[f64]) -> Result<FlattenOutput> {
        if time.len() != flux.len() {
            return Err(Error::size_mismatch(time.len(), flux.len(), "flux"));
        }

        let params = self.config.resolve()?;
        let backend = SegmentBackend::select(&params, &self.registry)?;
        if params.strategy == ExecutionStrategy::Parallel && !params.strategy.is_parallel() {
            warn!("parallel execution requested but the `parallel` feature is disabled");
        }

        let n = time.len();
        let mask = finite_mask(time, flux);
        let kept_time = compress(time, &mask);
        let kept_flux = compress(flux, &mask);
        debug!(
            masked = n - kept_time.len(),
            window_length = params.window_length,
            cval = params.cval,
            "masked non-finite samples"
        );

        let segments = GapSegmenter::new(params.break_tolerance).segment(&kept_time);
        debug!(
            segments = segments.len(),
            break_tolerance = params.break_tolerance,
            "split at gaps"
        );

        let trends = params
            .strategy
            .map_indexed(segments.len(), |k| {
                let range = segments[k].range();
                backend.detrend(k, &kept_time[range.clone()], &kept_flux[range])
            })
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let trend = TrendAssembler::assemble(n, &mask, &segments, &trends)?;
        let flattened = TrendAssembler::normalize(flux, &trend)?;

        Ok(FlattenOutput {
            flux: flattened,
            trend: params.return_trend.then_some(trend),
        })
    }
}

/// One-off [`Flattener::flatten`] with the built-in backends
pub fn flatten(time: &[f64], flux: &[f64], config: &FlattenConfig) -> Result<FlattenOutput> {
    Flattener::new(config.clone()).flatten(time, flux)
}
