//! CLI command handlers. Each command is in its own file.

mod copy;
mod endpoints;
mod find;
mod probe;
mod tee;

pub use copy::{run_copy, stop_after_duration, CopyOptions};
pub use find::run_find;
pub use probe::run_probe;
pub use tee::run_tee;
