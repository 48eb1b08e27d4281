//! Core traits for location estimation

/// Weight function of an iteratively reweighted M-estimator
///
/// `u` is a residual already divided by `cval * scale`, so every kernel
/// sees the same standardized argument and only its shape differs.
pub trait WeightKernel: Send + Sync + Clone + Default {
    /// Weight for the standardized residual `u`
    fn weight(&self, u: f64) -> f64;

    /// Name of the kernel, used for the estimator name
    fn name(&self) -> &'static str;

    /// Multiplier applied to the raw MAD to obtain the scale
    ///
    /// Redescending kernels work on the raw MAD; Huber uses the
    /// normal-consistent one.
    fn scale_factor(&self) -> f64 {
        1.0
    }

    /// Tuning constant used when the caller does not provide one
    fn default_cval(&self) -> f64;

    /// Whether weights drop to exactly zero for large residuals
    fn is_redescending(&self) -> bool;
}
