//! Progress snapshot (bytes written, rate, ETA, percentage).
//!
//! Computed on demand by [`ProgressTracker::stats`](super::ProgressTracker::stats);
//! a zero-valued snapshot means stats are disabled.

use serde::Serialize;
use std::time::Duration;

use super::window::SampleWindow;

/// Point-in-time view of a tracked transfer (CLI-friendly).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    /// Target size in bytes (0 = unknown).
    pub total_bytes: u64,
    /// Bytes observed so far.
    pub bytes_written: u64,
    /// Rate estimate from the sample window.
    pub bytes_per_second: u64,
    /// Measured interval: first sample to last observation.
    #[serde(serialize_with = "as_secs_f64")]
    pub took: Duration,
    /// Estimated time left (zero when done or unknown).
    #[serde(serialize_with = "as_secs_f64")]
    pub remaining: Duration,
    /// Whole percent complete, 0..=100.
    pub percentage: u8,
}

impl ProgressStats {
    /// Build a snapshot from counters and the current sample window.
    pub(super) fn compute(bytes_written: u64, total_bytes: u64, window: &SampleWindow) -> Self {
        let took = window.elapsed();
        let percentage = percentage(bytes_written, total_bytes);

        // Short transfers report the byte count itself as the rate.
        let bytes_per_second = if took > Duration::from_secs(1) {
            let span = window.span().as_secs_f64();
            if span > 0.0 {
                (window.total_bytes() as f64 / span).round() as u64
            } else {
                bytes_written
            }
        } else {
            bytes_written
        };

        let remaining = if total_bytes == 0 || bytes_written == total_bytes {
            Duration::ZERO
        } else if bytes_per_second > 0 {
            let left = total_bytes.saturating_sub(bytes_written);
            Duration::from_secs(left.div_ceil(bytes_per_second))
        } else {
            Duration::ZERO
        };

        ProgressStats {
            total_bytes,
            bytes_written,
            bytes_per_second,
            took,
            remaining,
            percentage,
        }
    }

    /// True when the target size is known and has been reached.
    pub fn is_complete(&self) -> bool {
        self.total_bytes > 0 && self.bytes_written >= self.total_bytes
    }

    /// Fraction complete in [0.0, 1.0]; 0 when the total is unknown.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.bytes_written as f64 / self.total_bytes as f64).min(1.0)
    }
}

fn percentage(bytes_written: u64, total_bytes: u64) -> u8 {
    if total_bytes == 0 {
        return 0;
    }
    if bytes_written == total_bytes {
        return 100;
    }
    let pct = (bytes_written as u128 * 100) / total_bytes as u128;
    pct.min(100) as u8
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
