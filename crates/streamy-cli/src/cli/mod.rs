//! CLI for streamy.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use streamy_core::config;
use streamy_core::BinaryUnit;

use commands::{run_copy, run_find, run_probe, run_tee, CopyOptions};

/// Top-level CLI for streamy.
#[derive(Debug, Parser)]
#[command(name = "streamy")]
#[command(about = "streamy: tracked stream copies, streaming search and tee", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy SRC to DST while reporting progress on stderr.
    Copy {
        /// Source path, or `-` for stdin.
        src: String,
        /// Destination path, or `-` for stdout.
        dst: String,
        /// Expected size (defaults to the source file length when seekable).
        #[arg(long, value_name = "N")]
        size: Option<u64>,
        /// Unit for --size (B, KB, MB, ..., KiB, MiB, ...). Defaults to the configured unit.
        #[arg(long, value_name = "UNIT")]
        unit: Option<BinaryUnit>,
        /// Stop the transfer after this many seconds.
        #[arg(long, value_name = "SECS", value_parser = parse_stop_after)]
        stop_after: Option<f64>,
        /// Print the final snapshot as JSON on stderr.
        #[arg(long)]
        json: bool,
    },

    /// Find the first occurrence of PATTERN in PATH (or stdin). Exit code 1 if not found.
    Find {
        /// Pattern to search for (UTF-8 text, or hex with --hex).
        pattern: String,
        /// File to search; stdin when omitted.
        path: Option<PathBuf>,
        /// Read size in bytes (defaults to the configured chunk size).
        #[arg(long, value_name = "N")]
        chunk_size: Option<usize>,
        /// Interpret PATTERN as hex bytes (e.g. `4949`).
        #[arg(long)]
        hex: bool,
    },

    /// Copy stdin to stdout, duplicating the first LIMIT bytes into FILE.
    Tee {
        /// Number of bytes to duplicate.
        limit: u64,
        /// File that receives the duplicated prefix.
        file: PathBuf,
    },

    /// Report whether PATH is seekable and whether stdin has pending data.
    Probe {
        /// File to check.
        path: Option<PathBuf>,
    },
}

/// Accept only finite, non-negative seconds that fit in a `Duration`.
fn parse_stop_after(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{}", e))?;
    commands::stop_after_duration(secs).map_err(|e| format!("{:#}", e))?;
    Ok(secs)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let code = match cli.command {
            CliCommand::Copy {
                src,
                dst,
                size,
                unit,
                stop_after,
                json,
            } => {
                let opts = CopyOptions {
                    src,
                    dst,
                    size,
                    unit: unit.unwrap_or(cfg.default_unit),
                    stop_after,
                    json,
                };
                run_copy(&cfg, opts).await?;
                ExitCode::SUCCESS
            }
            CliCommand::Find {
                pattern,
                path,
                chunk_size,
                hex,
            } => {
                let chunk_size = chunk_size.unwrap_or(cfg.chunk_size);
                if run_find(&pattern, path.as_deref(), chunk_size, hex).await? {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            CliCommand::Tee { limit, file } => {
                run_tee(limit, &file).await?;
                ExitCode::SUCCESS
            }
            CliCommand::Probe { path } => {
                run_probe(path.as_deref())?;
                ExitCode::SUCCESS
            }
        };

        Ok(code)
    }
}

#[cfg(test)]
mod tests;
