//! Segment backends for methods that do not use the sliding time window
//!
//! Splines, LOWESS, Gaussian processes and friends are supplied by the
//! caller through [`SegmentDetrender`] and looked up by [`Method`] in a
//! [`CollaboratorRegistry`]. The median and Savitzky-Golay filters ship
//! with the crate.

pub mod cadence;

use crate::method::Method;
use robust_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use cadence::{MedianFilter, SavitzkyGolay};

/// Parameters passed to a backend for every segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollaboratorParams {
    pub method: Method,
    /// Time units, or cadences for cadence-based methods
    pub window_length: f64,
    /// Tuning constant if the caller gave one or the method has a default
    pub cval: Option<f64>,
}

/// Trend of one contiguous, finite segment
///
/// Implementations must return exactly one value per input sample.
/// [`CollaboratorParams`] only carries what every method shares. Settings
/// specific to a backend, such as a Gaussian process kernel, its size and
/// period, belong to the backend: captured by a closure or held as fields.
pub trait SegmentDetrender: Send + Sync {
    fn name(&self) -> &str;

    fn detrend_segment(&self, time: &[f64], flux: &[f64], params: &CollaboratorParams) -> Result<Vec<f64>>;
}

impl<F> SegmentDetrender for F
where
    F: Fn(&[f64], &[f64], &CollaboratorParams) -> Result<Vec<f64>> + Send + Sync,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn detrend_segment(&self, time: &[f64], flux: &[f64], params: &CollaboratorParams) -> Result<Vec<f64>> {
        self(time, flux, params)
    }
}

/// Backends keyed by the method they serve
#[derive(Clone)]
pub struct CollaboratorRegistry {
    backends: HashMap<Method, Arc<dyn SegmentDetrender>>,
}

impl CollaboratorRegistry {
    /// Registry with no backends at all
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Registry with the built-in median and Savitzky-Golay filters
    pub fn with_builtin() -> Self {
        let mut backends: HashMap<Method, Arc<dyn SegmentDetrender>> = HashMap::new();
        backends.insert(Method::Medfilt, Arc::new(MedianFilter));
        backends.insert(Method::Savgol, Arc::new(SavitzkyGolay));
        Self { backends }
    }

    /// Register `backend` for `method`, returning the one it replaces
    ///
    /// Time-windowed methods are served by the window engine and cannot be
    /// overridden.
    pub fn register(
        &mut self,
        method: Method,
        backend: Arc<dyn SegmentDetrender>,
    ) -> Result<Option<Arc<dyn SegmentDetrender>>> {
        if method.is_time_windowed() {
            return Err(Error::InvalidMethod(format!(
                "{method} is computed by the sliding window and takes no backend"
            )));
        }
        Ok(self.backends.insert(method, backend))
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, method: Method, backend: Arc<dyn SegmentDetrender>) -> Result<Self> {
        self.register(method, backend)?;
        Ok(self)
    }

    pub fn get(&self, method: Method) -> Option<&Arc<dyn SegmentDetrender>> {
        self.backends.get(&method)
    }

    pub fn contains(&self, method: Method) -> bool {
        self.backends.contains_key(&method)
    }

    /// Backend for `method` or a `MissingCollaborator` error
    pub fn resolve(&self, method: Method) -> Result<Arc<dyn SegmentDetrender>> {
        self.get(method)
            .cloned()
            .ok_or_else(|| Error::MissingCollaborator {
                method: method.name().to_string(),
                dependency: method.dependency().to_string(),
            })
    }

    /// Methods with a registered backend
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.backends.contains_key(m))
            .collect()
    }
}

impl Default for CollaboratorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for CollaboratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.methods()
                    .into_iter()
                    .filter_map(|m| self.get(m).map(|b| (m.name(), b.name().to_string()))),
            )
            .finish()
    }
}
