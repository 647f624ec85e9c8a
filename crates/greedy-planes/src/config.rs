//! Parameters for the greedy search.

use serde::{Deserialize, Serialize};

/// The default number of decimal digits kept when comparing cumulative gains.
pub const DEFAULT_PRECISION: u32 = 15;

/// Parameters controlling a clustering run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The number of decimal digits to which cumulative gains are rounded
    /// before they are compared to the best gain seen so far. This keeps
    /// floating-point noise near zero from counting as an improvement.
    pub precision: u32,
    /// An optional upper bound on the number of passes.
    pub max_passes: Option<usize>,
    /// Whether to measure the wall-clock time of the clustering loop.
    pub measure_time: bool,
    /// Whether to compute candidate moves on the `rayon` thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_passes: None,
            measure_time: false,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sets the rounding precision, in decimal digits.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the maximum number of passes.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Sets whether to measure the time taken to cluster.
    #[must_use]
    pub const fn with_measure_time(mut self, measure_time: bool) -> Self {
        self.measure_time = measure_time;
        self
    }

    /// Sets whether to evaluate candidate moves in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rounds `value` to `precision` decimal digits.
    ///
    /// Precisions beyond what an `f64` can represent leave the value as is.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        // 10^22 is the largest power of ten that is exact in an `f64`.
        if self.precision > 22 {
            return value;
        }
        #[allow(clippy::cast_possible_wrap)]
        let scale = 10_f64.powi(self.precision as i32);
        let scaled = value * scale;
        if scaled.is_finite() {
            scaled.round() / scale
        } else {
            value
        }
    }

    /// Whether `gain`, once rounded, is strictly below `best`.
    #[must_use]
    pub fn improves_on(&self, gain: f64, best: f64) -> bool {
        self.round(gain) < best
    }
}
