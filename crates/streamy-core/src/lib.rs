pub mod config;
pub mod logging;

pub mod probe;
pub mod progress;
pub mod reader_only;
pub mod search;
pub mod tee;
pub mod units;

pub use progress::{ProgressError, ProgressStats, ProgressTracker, StatsMode};
pub use search::{find, SearchError, SearchOutcome};
pub use units::BinaryUnit;
