//! Timestamp-gap detection.

use chrono::{DateTime, Utc};

/// Gaps longer than this many seconds are reported.
pub const DEFAULT_GAP_THRESHOLD_SECS: f64 = 10.0;

/// Tracks the previous timestamp and flags long gaps.
///
/// Only lines that carry a valid timestamp reach the detector; lines without
/// one leave the previous timestamp untouched.
#[derive(Debug, Clone)]
pub struct GapDetector {
    threshold_secs: f64,
    previous: Option<DateTime<Utc>>,
}

impl Default for GapDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GAP_THRESHOLD_SECS)
    }
}

impl GapDetector {
    pub fn new(threshold_secs: f64) -> Self {
        Self {
            threshold_secs,
            previous: None,
        }
    }

    /// Continue from a timestamp seen before this detector was created.
    pub fn seeded(threshold_secs: f64, previous: Option<DateTime<Utc>>) -> Self {
        Self {
            threshold_secs,
            previous,
        }
    }

    /// Feed the next timestamp; returns the interval in seconds when it
    /// exceeds the threshold.
    ///
    /// The previous timestamp is replaced whether or not a gap is reported.
    /// Out-of-order timestamps give a negative interval, which goes through
    /// the same comparison.
    pub fn observe(&mut self, current: DateTime<Utc>) -> Option<f64> {
        let previous = self.previous.replace(current)?;
        let interval = (current - previous).num_milliseconds() as f64 / 1000.0;
        (interval > self.threshold_secs).then_some(interval)
    }

    pub fn previous(&self) -> Option<DateTime<Utc>> {
        self.previous
    }
}
