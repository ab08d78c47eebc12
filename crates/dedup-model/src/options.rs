//! Configuration options for a deduplication run.

use serde::Serialize;

/// Minimum similarity for the fuzzy name and address stages.
///
/// Always within `(0, 1]`. Anything else given by an operator degrades to
/// [`Threshold::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT: Threshold = Threshold(0.85);

    /// Accept `value` when it lies in `(0, 1]`.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    pub fn new_or_default(value: f64) -> Self {
        Self::new(value).unwrap_or_default()
    }

    /// Parse operator input, falling back to the default on absence or garbage.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(Self::new)
            .unwrap_or_default()
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Default number of small records between progress callbacks.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

/// Options controlling a deduplication run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DedupOptions {
    /// Shared threshold of the name and address stages.
    pub threshold: Threshold,
    /// Report progress every N processed small records (0 disables).
    pub progress_interval: usize,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl DedupOptions {
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}
