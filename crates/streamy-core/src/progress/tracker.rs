//! The progress tracker: byte counters, sample window and stop control.
//!
//! Lock discipline: `observe` holds the config lock in shared mode so several
//! producers can observe at once; configuration calls (`enable_stats`,
//! `disable_stats`, `enable_controls`, `stop`) hold it exclusively and wait for
//! in-flight observations. The byte counter is atomic and the sample window
//! has its own mutex, so producers do not race each other either.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use super::error::ProgressError;
use super::stats::ProgressStats;
use super::window::SampleWindow;
use crate::units::BinaryUnit;

/// Samples retained by [`StatsMode::Simple`].
pub const SIMPLE_WINDOW_SAMPLES: usize = 10;

/// Rate estimation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsMode {
    /// Fixed window of the last 10 observations.
    #[default]
    Simple,
}

impl StatsMode {
    pub fn name(self) -> &'static str {
        match self {
            StatsMode::Simple => "simple",
        }
    }

    fn window_capacity(self) -> usize {
        match self {
            StatsMode::Simple => SIMPLE_WINDOW_SAMPLES,
        }
    }
}

impl FromStr for StatsMode {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(StatsMode::Simple),
            other => Err(ProgressError::InvalidArgument(format!(
                "unknown stats mode {other:?}"
            ))),
        }
    }
}

/// One-shot stop flag. Once fired it stays fired.
#[derive(Debug, Clone, Default)]
struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Fire the signal; returns false if it had already fired.
    fn fire(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    fn is_fired(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Default)]
struct Config {
    stats: Option<StatsMode>,
    controls: Option<StopSignal>,
}

/// Observes bytes written through a transfer.
///
/// Share it with `Arc` between the copy loop and a supervisor. Writing
/// through `&ProgressTracker` (it implements [`std::io::Write`]) is the usual
/// way to feed it, e.g. as the sink of a tee.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    bytes_written: AtomicU64,
    total_bytes: AtomicU64,
    stopped: AtomicBool,
    config: RwLock<Config>,
    window: Mutex<SampleWindow>,
}

impl ProgressTracker {
    /// New tracker with stats and controls disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a chunk of `buf.len()` bytes.
    ///
    /// Returns [`ProgressError::Stopped`] once the stop signal has fired; the
    /// caller must stop forwarding data. The bytes of the chunk that saw the
    /// stop are still counted.
    pub fn observe(&self, buf: &[u8]) -> Result<usize, ProgressError> {
        let n = buf.len();
        let config = self.read_config();

        self.bytes_written.fetch_add(n as u64, Ordering::Relaxed);

        if config.stats.is_some() {
            self.lock_window().record(Instant::now(), n as u64);
        }

        if let Some(signal) = &config.controls {
            if signal.is_fired() {
                self.stopped.store(true, Ordering::Release);
                return Err(ProgressError::Stopped);
            }
        }

        if config.stats.is_some() {
            self.lock_window().mark_end(Instant::now());
        }

        Ok(n)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Set the target size to `size` units.
    pub fn set_total_size(&self, size: u64, unit: BinaryUnit) {
        self.total_bytes.store(unit.of(size), Ordering::Relaxed);
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.load(Ordering::Relaxed)
    }

    /// Start sampling. Enabling again keeps the current window.
    pub fn enable_stats(&self, mode: StatsMode) -> Result<(), ProgressError> {
        let mut config = self.write_config();
        if config.stats.is_none() {
            *self.lock_window() = SampleWindow::with_capacity(mode.window_capacity());
            config.stats = Some(mode);
            tracing::debug!(mode = mode.name(), "progress stats enabled");
        }
        Ok(())
    }

    /// Stop sampling and forget the window.
    pub fn disable_stats(&self) {
        let mut config = self.write_config();
        if config.stats.take().is_some() {
            self.lock_window().clear();
            tracing::debug!("progress stats disabled");
        }
    }

    pub fn stats_enabled(&self) -> bool {
        self.read_config().stats.is_some()
    }

    /// Allocate the stop signal. Idempotent; a fired signal stays fired.
    pub fn enable_controls(&self) -> Result<(), ProgressError> {
        let mut config = self.write_config();
        if config.controls.is_none() {
            config.controls = Some(StopSignal::default());
            tracing::debug!("progress controls enabled");
        }
        Ok(())
    }

    /// Fire the stop signal.
    ///
    /// No-op without controls or after a previous stop. The write path sees
    /// the signal at its next observation; a chunk already being observed
    /// may still complete.
    pub fn stop(&self) {
        let config = self.write_config();
        if self.stopped.load(Ordering::Acquire) {
            return;
        }
        if let Some(signal) = &config.controls {
            if signal.fire() {
                tracing::debug!(bytes_written = self.bytes_written(), "progress stop requested");
            }
        }
    }

    /// True once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        if self.stopped.load(Ordering::Acquire) {
            return true;
        }
        self.read_config()
            .controls
            .as_ref()
            .is_some_and(StopSignal::is_fired)
    }

    /// Current snapshot; all zero while stats are disabled.
    pub fn stats(&self) -> ProgressStats {
        let config = self.read_config();
        if config.stats.is_none() {
            return ProgressStats::default();
        }
        let window = self.lock_window();
        ProgressStats::compute(self.bytes_written(), self.total_bytes(), &window)
    }

    #[cfg(test)]
    pub(crate) fn window_len(&self) -> usize {
        self.lock_window().len()
    }

    // Poisoning only means a producer panicked mid-observation; the counters
    // and window are still usable.
    fn read_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_window(&self) -> MutexGuard<'_, SampleWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }
}
