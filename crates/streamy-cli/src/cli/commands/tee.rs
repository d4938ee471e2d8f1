//! `streamy tee <limit> <file>` – stdin to stdout, first LIMIT bytes also to FILE.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use streamy_core::tee::tee_reader_n;

/// Copy `reader` to `out`, duplicating the first `limit` bytes into `side`.
/// Returns (bytes copied, bytes duplicated).
pub fn tee_copy<R: Read, W: Write, S: Write>(
    reader: R,
    out: &mut W,
    side: S,
    limit: u64,
) -> Result<(u64, u64)> {
    let mut tee = tee_reader_n(reader, side, limit);
    let copied = io::copy(&mut tee, out).context("tee copy")?;
    let duplicated = tee.written();
    let (_, mut side) = tee.into_inner();
    side.flush().context("flush tee file")?;
    Ok((copied, duplicated))
}

pub async fn run_tee(limit: u64, file: &Path) -> Result<()> {
    let side = File::create(file).with_context(|| format!("create {}", file.display()))?;
    let shown = file.to_path_buf();
    let (copied, duplicated) = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        let res = tee_copy(stdin.lock(), &mut stdout, BufWriter::new(side), limit);
        stdout.flush().context("flush stdout")?;
        res
    })
    .await
    .context("tee task join")??;
    tracing::info!(copied, duplicated, file = %shown.display(), "tee finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tee_copy_limits_side_output() {
        let mut out = Vec::new();
        let mut side = Vec::new();
        let (copied, duplicated) =
            tee_copy(Cursor::new(b"foo".to_vec()), &mut out, &mut side, 2).unwrap();
        assert_eq!((copied, duplicated), (3, 2));
        assert_eq!(out, b"foo");
        assert_eq!(side, b"fo");
    }

    #[test]
    fn tee_copy_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefix.bin");
        let side = File::create(&path).unwrap();
        let mut out = Vec::new();
        tee_copy(Cursor::new(b"hello world".to_vec()), &mut out, BufWriter::new(side), 5).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert_eq!(out, b"hello world");
    }
}
