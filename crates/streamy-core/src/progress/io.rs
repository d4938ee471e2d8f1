//! `Read`/`Write` adapters that feed a [`ProgressTracker`].
//!
//! A stopped tracker surfaces as an `io::Error` wrapping
//! [`ProgressError::Stopped`](super::ProgressError::Stopped); use
//! [`ProgressError::is_stopped`](super::ProgressError::is_stopped) to tell it
//! apart from a real I/O failure.

use std::io::{self, Read, Write};
use std::sync::Arc;

use super::tracker::ProgressTracker;

impl Write for &ProgressTracker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.observe(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that reports every chunk it returns to a tracker.
pub struct TrackedReader<R> {
    inner: R,
    tracker: Arc<ProgressTracker>,
}

impl<R: Read> TrackedReader<R> {
    pub fn new(inner: R, tracker: Arc<ProgressTracker>) -> Self {
        TrackedReader { inner, tracker }
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for TrackedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.tracker.observe(&buf[..n]).map_err(io::Error::from)?;
        }
        Ok(n)
    }
}

/// Writer that reports the bytes accepted by the inner writer.
///
/// When the tracker is stopped, the chunk that observed the stop has already
/// reached the inner writer.
pub struct TrackedWriter<W> {
    inner: W,
    tracker: Arc<ProgressTracker>,
}

impl<W: Write> TrackedWriter<W> {
    pub fn new(inner: W, tracker: Arc<ProgressTracker>) -> Self {
        TrackedWriter { inner, tracker }
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TrackedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.tracker.observe(&buf[..n]).map_err(io::Error::from)?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
