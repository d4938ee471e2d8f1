//! `streamy copy <src> <dst>` – tracked copy with a progress line and optional stop.

use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;
use streamy_core::config::StreamyConfig;
use streamy_core::progress::TrackedWriter;
use streamy_core::{BinaryUnit, ProgressError, ProgressStats, ProgressTracker};

use super::endpoints::{open_input, open_output};

/// Options for one `copy` invocation.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    pub src: String,
    pub dst: String,
    pub size: Option<u64>,
    pub unit: BinaryUnit,
    pub stop_after: Option<f64>,
    pub json: bool,
}

/// How a copy ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyEnd {
    Completed(u64),
    Stopped(u64),
}

/// Convert `--stop-after` seconds; negative, NaN and out-of-range values are errors.
pub fn stop_after_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).with_context(|| format!("invalid --stop-after {}", secs))
}

pub async fn run_copy(cfg: &StreamyConfig, opts: CopyOptions) -> Result<()> {
    let stop_at = opts.stop_after.map(stop_after_duration).transpose()?;
    let input = open_input(&opts.src)?;
    let output = open_output(&opts.dst)?;

    let tracker = Arc::new(ProgressTracker::new());
    tracker.enable_stats(cfg.stats_mode()?)?;
    tracker.enable_controls()?;
    match (opts.size, input.known_len) {
        (Some(size), _) => tracker.set_total_size(size, opts.unit),
        (None, Some(len)) => tracker.set_total_size(len, BinaryUnit::Byte),
        (None, None) => {}
    }

    let chunk_size = cfg.chunk_size.max(1);
    let mut copy_task = tokio::task::spawn_blocking({
        let tracker = Arc::clone(&tracker);
        move || copy_chunks(input.reader, output, tracker, chunk_size)
    });

    let interval = Duration::from_millis(cfg.progress_interval_ms.max(1));
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    let stop_timer = async {
        match stop_at {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(stop_timer);

    let end = loop {
        tokio::select! {
            res = &mut copy_task => break res.context("copy task join")??,
            _ = ticker.tick() => eprint!("\r{}", progress_line(&tracker.stats())),
            _ = &mut stop_timer, if !tracker.is_stopped() => {
                tracing::info!("stop requested after {:?}", stop_at);
                tracker.stop();
            }
        }
    };

    let stats = tracker.stats();
    eprintln!("\r{}", progress_line(&stats));
    if opts.json {
        eprintln!("{}", serde_json::to_string(&stats)?);
    }

    match end {
        CopyEnd::Completed(n) => {
            if stats.total_bytes > 0 && !stats.is_complete() {
                tracing::warn!(
                    bytes = n,
                    expected = stats.total_bytes,
                    "source ended before the expected size"
                );
            }
            tracing::info!(bytes = n, "copy completed");
            Ok(())
        }
        CopyEnd::Stopped(n) => anyhow::bail!("transfer stopped after {} bytes", n),
    }
}

/// Blocking copy loop: read up to `chunk_size`, write through the tracker.
pub fn copy_chunks<R: Read, W: Write>(
    mut src: R,
    dst: W,
    tracker: Arc<ProgressTracker>,
    chunk_size: usize,
) -> Result<CopyEnd> {
    let mut dst = TrackedWriter::new(dst, tracker);
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read source"),
        };
        if let Err(e) = dst.write_all(&buf[..n]) {
            if ProgressError::is_stopped(&e) {
                return Ok(CopyEnd::Stopped(dst.tracker().bytes_written()));
            }
            return Err(e).context("write destination");
        }
    }
    dst.flush().context("flush destination")?;
    Ok(CopyEnd::Completed(dst.tracker().bytes_written()))
}

/// One-line human summary of a snapshot.
pub fn progress_line(stats: &ProgressStats) -> String {
    let done_mib = stats.bytes_written as f64 / BinaryUnit::MiB.bytes() as f64;
    let rate_mib = stats.bytes_per_second as f64 / BinaryUnit::MiB.bytes() as f64;
    if stats.total_bytes == 0 {
        return format!("  {:.1} MiB  {:.2} MiB/s  ", done_mib, rate_mib);
    }
    let total_mib = stats.total_bytes as f64 / BinaryUnit::MiB.bytes() as f64;
    format!(
        "  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}s  ",
        done_mib,
        total_mib,
        stats.fraction() * 100.0,
        rate_mib,
        stats.remaining.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use streamy_core::StatsMode;

    #[test]
    fn copy_chunks_copies_everything() {
        let data: Vec<u8> = (0u8..=255).cycle().take(10_000).collect();
        let tracker = Arc::new(ProgressTracker::new());
        tracker.enable_stats(StatsMode::Simple).unwrap();
        tracker.enable_controls().unwrap();
        tracker.set_total_size(data.len() as u64, BinaryUnit::Byte);
        let mut out = Vec::new();
        let end = copy_chunks(Cursor::new(data.clone()), &mut out, Arc::clone(&tracker), 333).unwrap();
        assert_eq!(end, CopyEnd::Completed(10_000));
        assert_eq!(out, data);
        assert_eq!(tracker.stats().percentage, 100);
    }

    #[test]
    fn copy_chunks_reports_stop() {
        let tracker = Arc::new(ProgressTracker::new());
        tracker.enable_controls().unwrap();
        tracker.stop();
        let mut out = Vec::new();
        let end = copy_chunks(Cursor::new(vec![0u8; 100]), &mut out, Arc::clone(&tracker), 10).unwrap();
        // The first chunk reaches the writer before the tracker reports the stop.
        assert_eq!(end, CopyEnd::Stopped(10));
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn progress_line_formats() {
        let stats = ProgressStats {
            total_bytes: 2 * 1_048_576,
            bytes_written: 1_048_576,
            bytes_per_second: 524_288,
            took: Duration::from_secs(2),
            remaining: Duration::from_secs(2),
            percentage: 50,
        };
        assert_eq!(
            progress_line(&stats),
            "  1.0 / 2.0 MiB (50.0%)  0.50 MiB/s  ETA 2s  "
        );
        let unknown = ProgressStats {
            total_bytes: 0,
            ..stats
        };
        assert_eq!(progress_line(&unknown), "  1.0 MiB  0.50 MiB/s  ");
        let third = ProgressStats {
            total_bytes: 3 * 1_048_576,
            percentage: 33,
            ..stats
        };
        assert!(progress_line(&third).contains("(33.3%)"));
        let past = ProgressStats {
            total_bytes: 1_048_576 / 2,
            percentage: 100,
            ..stats
        };
        assert!(progress_line(&past).contains("(100.0%)"));
    }

    #[test]
    fn stop_after_rejects_bad_seconds() {
        assert_eq!(stop_after_duration(2.5).unwrap(), Duration::from_millis(2500));
        assert_eq!(stop_after_duration(0.0).unwrap(), Duration::ZERO);
        for bad in [-1.0, f64::NAN, f64::INFINITY, 1e300] {
            assert!(stop_after_duration(bad).is_err(), "secs={bad}");
        }
    }

    #[tokio::test]
    async fn run_copy_negative_stop_after_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        std::fs::write(&src, b"abc").unwrap();
        let opts = CopyOptions {
            src: src.to_string_lossy().into_owned(),
            dst: dst.to_string_lossy().into_owned(),
            size: None,
            unit: BinaryUnit::Byte,
            stop_after: Some(-1.0),
            json: false,
        };
        let err = run_copy(&StreamyConfig::default(), opts).await.unwrap_err();
        assert!(format!("{err:#}").contains("--stop-after"), "{err:#}");
    }

    #[tokio::test]
    async fn run_copy_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        let data: Vec<u8> = (0u8..=255).cycle().take(50_000).collect();
        std::fs::write(&src, &data).unwrap();
        let opts = CopyOptions {
            src: src.to_string_lossy().into_owned(),
            dst: dst.to_string_lossy().into_owned(),
            size: None,
            unit: BinaryUnit::Byte,
            stop_after: None,
            json: true,
        };
        run_copy(&StreamyConfig::default(), opts).await.unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), data);
    }
}
