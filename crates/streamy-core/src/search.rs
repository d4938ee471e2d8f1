//! Streaming pattern search.
//!
//! Finds the first occurrence of a byte pattern in a reader while holding at
//! most `chunk_size + pattern.len()` bytes. The last `pattern.len() - 1`
//! bytes of each buffer are carried into the next one so that a match split
//! across two reads is still found.

use std::io::{self, Read};

/// Chunk size used when the caller passes 0.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Absolute stream offset of the first match, `None` if the stream ended first.
    pub index: Option<u64>,
    /// Bytes consumed from the reader.
    pub read: u64,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.index.is_some()
    }
}

/// Read failure during a search; `read` bytes were consumed before it.
#[derive(Debug, thiserror::Error)]
#[error("read failed after {read} bytes: {source}")]
pub struct SearchError {
    pub read: u64,
    #[source]
    pub source: io::Error,
}

/// Find the first occurrence of `pattern` in `source`, reading at most
/// `chunk_size` bytes per call (0 = [`DEFAULT_CHUNK_SIZE`]).
///
/// Reaching end of stream without a match is not an error. An empty pattern
/// matches at offset 0 without reading.
pub fn find<R: Read>(
    mut source: R,
    pattern: &[u8],
    chunk_size: usize,
) -> Result<SearchOutcome, SearchError> {
    if pattern.is_empty() {
        return Ok(SearchOutcome {
            index: Some(0),
            read: 0,
        });
    }
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };
    let carry = pattern.len() - 1;
    let Some(buf_len) = chunk_size.checked_add(pattern.len()) else {
        return Err(SearchError {
            read: 0,
            source: io::Error::new(io::ErrorKind::InvalidInput, "chunk size too large"),
        });
    };
    let mut buf = vec![0u8; buf_len];
    // Valid bytes at the front of `buf`.
    let mut filled = 0usize;
    // Stream offset of buf[0].
    let mut base = 0u64;
    let mut read = 0u64;

    loop {
        let n = match source.read(&mut buf[filled..filled + chunk_size]) {
            Ok(0) => return Ok(SearchOutcome { index: None, read }),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(SearchError { read, source }),
        };
        read += n as u64;
        filled += n;

        if let Some(i) = position(&buf[..filled], pattern) {
            return Ok(SearchOutcome {
                index: Some(base + i as u64),
                read,
            });
        }

        let keep = carry.min(filled);
        buf.copy_within(filled - keep..filled, 0);
        base += (filled - keep) as u64;
        filled = keep;
    }
}

fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
