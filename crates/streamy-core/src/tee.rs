//! Bounded tee: duplicate the first N bytes of a stream into a side writer.

use std::io::{self, Read, Write};

/// Reader returned by [`tee_reader_n`].
pub struct TeeReaderN<R, W> {
    reader: R,
    writer: W,
    limit: u64,
    written: u64,
}

/// Wrap `reader` so that everything read from it is returned to the caller
/// and the first `limit` bytes are also written to `writer`.
pub fn tee_reader_n<R: Read, W: Write>(reader: R, writer: W, limit: u64) -> TeeReaderN<R, W> {
    TeeReaderN {
        reader,
        writer,
        limit,
        written: 0,
    }
}

impl<R, W> TeeReaderN<R, W> {
    /// Bytes copied to the side writer so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Read for TeeReaderN<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        let left = self.limit - self.written;
        if n > 0 && left > 0 {
            let take = left.min(n as u64) as usize;
            self.writer.write_all(&buf[..take])?;
            self.written += take as u64;
        }
        Ok(n)
    }
}
