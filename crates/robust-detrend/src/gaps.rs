//! Splitting a time series into contiguous segments at large gaps

use std::ops::Range;

/// Half-open index range `[start, end)` of one contiguous segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits sorted timestamps wherever consecutive samples are too far apart
///
/// A new segment starts at `i + 1` whenever `time[i + 1] - time[i]` exceeds
/// the break tolerance. The segments cover the input exactly, in order.
///
/// ```rust
/// use robust_detrend::{GapSegmenter, Segment};
///
/// let time = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
/// let segments = GapSegmenter::new(2.0).segment(&time);
/// assert_eq!(segments, vec![Segment::new(0, 3), Segment::new(3, 6)]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GapSegmenter {
    break_tolerance: f64,
}

impl GapSegmenter {
    /// Segmenter splitting at gaps wider than `break_tolerance`
    ///
    /// A tolerance of zero disables splitting.
    pub fn new(break_tolerance: f64) -> Self {
        let break_tolerance = if break_tolerance == 0.0 {
            f64::INFINITY
        } else {
            break_tolerance
        };
        Self { break_tolerance }
    }

    /// Segmenter that keeps the whole series together
    pub fn disabled() -> Self {
        Self {
            break_tolerance: f64::INFINITY,
        }
    }

    pub fn break_tolerance(&self) -> f64 {
        self.break_tolerance
    }

    /// Segment bounds for `time`, which must be ascending and finite
    pub fn segment(&self, time: &[f64]) -> Vec<Segment> {
        if time.is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut start = 0;
        for (i, pair) in time.windows(2).enumerate() {
            if pair[1] - pair[0] > self.break_tolerance {
                segments.push(Segment::new(start, i + 1));
                start = i + 1;
            }
        }
        segments.push(Segment::new(start, time.len()));
        segments
    }
}
