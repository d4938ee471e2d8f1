//! Fixed-capacity sample ring used for rate estimation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// One observation: when it happened and how many bytes it carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub at: Instant,
    pub bytes: u64,
}

/// Bounded FIFO of samples plus the measured interval.
///
/// `start` is set by the first sample and kept until [`SampleWindow::clear`];
/// `end` is moved forward by the tracker after each observation so that time
/// spent inside the write path counts toward the interval.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
    start: Option<Instant>,
    end: Option<Instant>,
}

impl SampleWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        SampleWindow {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            start: None,
            end: None,
        }
    }

    /// Record `bytes` at `at`, evicting the oldest sample when full.
    pub fn record(&mut self, at: Instant, bytes: u64) {
        if self.start.is_none() {
            self.start = Some(at);
        }
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { at, bytes });
    }

    pub fn mark_end(&mut self, at: Instant) {
        self.end = Some(at);
    }

    /// Drop all samples and timestamps.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.start = None;
        self.end = None;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Time between the first sample and the last `mark_end`.
    pub fn elapsed(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// Sum of retained sample bytes.
    pub fn total_bytes(&self) -> u64 {
        self.samples.iter().map(|s| s.bytes).sum()
    }

    /// Time between the oldest and newest retained sample.
    pub fn span(&self) -> Duration {
        match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) => last.at.saturating_duration_since(first.at),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let base = Instant::now();
        let mut w = SampleWindow::with_capacity(3);
        for i in 0..5u64 {
            w.record(base + Duration::from_millis(i * 10), i + 1);
        }
        assert_eq!(w.len(), 3);
        let bytes: Vec<u64> = w.samples().map(|s| s.bytes).collect();
        assert_eq!(bytes, vec![3, 4, 5]);
        assert_eq!(w.total_bytes(), 12);
        assert_eq!(w.span(), Duration::from_millis(20));
    }

    #[test]
    fn start_is_kept_after_eviction() {
        let base = Instant::now();
        let mut w = SampleWindow::with_capacity(2);
        w.record(base, 1);
        w.record(base + Duration::from_secs(1), 1);
        w.record(base + Duration::from_secs(2), 1);
        w.mark_end(base + Duration::from_secs(3));
        assert_eq!(w.elapsed(), Duration::from_secs(3));
        assert_eq!(w.span(), Duration::from_secs(1));
    }

    #[test]
    fn clear_resets_interval() {
        let base = Instant::now();
        let mut w = SampleWindow::with_capacity(2);
        w.record(base, 10);
        w.mark_end(base + Duration::from_secs(5));
        w.clear();
        assert!(w.is_empty());
        assert_eq!(w.elapsed(), Duration::ZERO);
        assert_eq!(w.span(), Duration::ZERO);
    }

    #[test]
    fn single_sample_has_zero_span() {
        let mut w = SampleWindow::with_capacity(10);
        w.record(Instant::now(), 7);
        assert_eq!(w.span(), Duration::ZERO);
        assert_eq!(w.total_bytes(), 7);
    }
}
