//! `streamy find <pattern> [path]` – locate a byte pattern without buffering the stream.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use streamy_core::{search, SearchOutcome};

use super::endpoints::open_input;

/// Decode the pattern argument (UTF-8 text, or hex when `hex` is set).
pub fn decode_pattern(pattern: &str, hex: bool) -> Result<Vec<u8>> {
    let bytes = if hex {
        hex::decode(pattern).with_context(|| format!("invalid hex pattern {:?}", pattern))?
    } else {
        pattern.as_bytes().to_vec()
    };
    if bytes.is_empty() {
        anyhow::bail!("pattern must not be empty");
    }
    Ok(bytes)
}

/// Search `path` (stdin when `None`). Prints the result; returns whether a match was found.
pub async fn run_find(
    pattern: &str,
    path: Option<&Path>,
    chunk_size: usize,
    hex: bool,
) -> Result<bool> {
    let needle = decode_pattern(pattern, hex)?;
    let arg = path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "-".to_string());
    let display: PathBuf = path.map(Path::to_path_buf).unwrap_or_else(|| "<stdin>".into());

    let outcome = tokio::task::spawn_blocking(move || -> Result<SearchOutcome> {
        let input = open_input(&arg)?;
        Ok(search::find(input.reader, &needle, chunk_size)?)
    })
    .await
    .context("find task join")?
    .with_context(|| format!("search {}", display.display()))?;

    match outcome.index {
        Some(index) => {
            println!("{}\t(read {} bytes)", index, outcome.read);
            Ok(true)
        }
        None => {
            println!("not found\t(read {} bytes)", outcome.read);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_text_and_hex() {
        assert_eq!(decode_pattern("test", false).unwrap(), b"test");
        assert_eq!(decode_pattern("4949", true).unwrap(), vec![0x49, 0x49]);
        assert!(decode_pattern("zz", true).is_err());
        assert!(decode_pattern("", false).is_err());
    }

    #[tokio::test]
    async fn run_find_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haystack.txt");
        std::fs::write(&path, "this is a test").unwrap();
        assert!(run_find("test", Some(&path), 3, false).await.unwrap());
        assert!(!run_find("foo", Some(&path), 3, false).await.unwrap());
        assert!(run_find("7465", Some(&path), 0, true).await.unwrap());
    }
}
