//! Error type for the progress tracker.

use std::io;

/// Error returned by the tracker's write path and configuration calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// The stop signal fired; the caller must stop forwarding data.
    #[error("progress stopped")]
    Stopped,
    /// A configuration value was not recognized. Nothing was changed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProgressError {
    /// True if `err` is an io error produced by a stopped tracker.
    pub fn is_stopped(err: &io::Error) -> bool {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<ProgressError>())
            .is_some_and(|e| *e == ProgressError::Stopped)
    }
}

impl From<ProgressError> for io::Error {
    fn from(err: ProgressError) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}
