//! Masking of non-finite samples and reassembly of the full-length trend

use crate::gaps::Segment;
use robust_core::{Error, Result};

/// `true` for samples whose time and flux are both finite
pub fn finite_mask(time: &[f64], flux: &[f64]) -> Vec<bool> {
    time.iter()
        .zip(flux)
        .map(|(t, f)| t.is_finite() && f.is_finite())
        .collect()
}

/// Copy the values whose mask entry is set
pub fn compress(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}

/// Scatters per-segment trends back onto the original sample positions
pub struct TrendAssembler;

impl TrendAssembler {
    /// Full-length trend, NaN at every masked position
    ///
    /// `segments` must tile the compressed (unmasked) series in order and
    /// `trends[k]` must have exactly `segments[k].len()` values.
    pub fn assemble(
        total_length: usize,
        mask: &[bool],
        segments: &[Segment],
        trends: &[Vec<f64>],
    ) -> Result<Vec<f64>> {
        if mask.len() != total_length {
            return Err(Error::InternalConsistency(format!(
                "mask has {} entries for {total_length} samples",
                mask.len()
            )));
        }
        if segments.len() != trends.len() {
            return Err(Error::InternalConsistency(format!(
                "{} segments but {} segment trends",
                segments.len(),
                trends.len()
            )));
        }

        let kept = mask.iter().filter(|&&keep| keep).count();
        let mut expected_start = 0;
        for (k, (segment, trend)) in segments.iter().zip(trends).enumerate() {
            if segment.start != expected_start || segment.end < segment.start {
                return Err(Error::InternalConsistency(format!(
                    "segment {k} spans [{}, {}) but should start at {expected_start}",
                    segment.start, segment.end
                )));
            }
            if trend.len() != segment.len() {
                return Err(Error::segment_mismatch(k, segment.len(), trend.len()));
            }
            expected_start = segment.end;
        }
        if expected_start != kept {
            return Err(Error::InternalConsistency(format!(
                "segments cover {expected_start} samples but {kept} are unmasked"
            )));
        }

        let mut values = trends.iter().flatten();
        let mut full = vec![f64::NAN; total_length];
        for (slot, &keep) in full.iter_mut().zip(mask) {
            if keep {
                // Counts checked above
                if let Some(&value) = values.next() {
                    *slot = value;
                }
            }
        }
        Ok(full)
    }

    /// Flux divided by trend, element by element
    pub fn normalize(flux: &[f64], trend: &[f64]) -> Result<Vec<f64>> {
        if flux.len() != trend.len() {
            return Err(Error::size_mismatch(flux.len(), trend.len(), "trend"));
        }
        Ok(flux.iter().zip(trend).map(|(f, t)| f / t).collect())
    }
}
