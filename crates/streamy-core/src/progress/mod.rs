//! Progress tracking for byte streams.
//!
//! A [`ProgressTracker`] observes bytes pushed through it by a copy loop,
//! keeps a small sample window for rate estimation, and carries a one-shot
//! stop signal that a supervisor thread can fire to end the transfer at the
//! next chunk boundary.

mod error;
mod io;
mod stats;
mod tracker;
mod window;

pub use error::ProgressError;
pub use io::{TrackedReader, TrackedWriter};
pub use stats::ProgressStats;
pub use tracker::{ProgressTracker, StatsMode};
pub use window::{Sample, SampleWindow};
