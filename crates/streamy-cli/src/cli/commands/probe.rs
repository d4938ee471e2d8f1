//! `streamy probe [path]` – report I/O capabilities.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use streamy_core::probe;

pub fn run_probe(path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let pending = probe::has_pending_input(&file).context("inspect file")?;
        println!(
            "{}: seekable={} pending={}",
            path.display(),
            probe::have_seeker(&file),
            pending
        );
    }
    let pending = probe::have_stdin().context("inspect stdin")?;
    println!("stdin: pending={}", pending);
    Ok(())
}
