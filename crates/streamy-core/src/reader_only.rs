//! Strip a reader down to plain `Read`.
//!
//! The source is drained by a background thread into a bounded in-process
//! pipe, so the returned reader cannot be seeked or downcast back to the
//! source. A failure in the background copy is delivered to the consumer as
//! the error of its next `read` instead of aborting the process.

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

const PIPE_CHUNK: usize = 32 * 1024;
const PIPE_DEPTH: usize = 4;

/// Read-only view produced by [`reader_only`].
pub struct ReadOnly {
    rx: Receiver<io::Result<Vec<u8>>>,
    pending: Vec<u8>,
    pos: usize,
    done: bool,
}

/// Return a reader that exposes only `Read` over `reader`.
pub fn reader_only<R: Read + Send + 'static>(reader: R) -> ReadOnly {
    let (tx, rx) = mpsc::sync_channel(PIPE_DEPTH);
    thread::spawn(move || pump(reader, tx));
    ReadOnly {
        rx,
        pending: Vec::new(),
        pos: 0,
        done: false,
    }
}

fn pump<R: Read>(mut reader: R, tx: SyncSender<io::Result<Vec<u8>>>) {
    loop {
        let mut chunk = vec![0u8; PIPE_CHUNK];
        match reader.read(&mut chunk) {
            Ok(0) => return,
            Ok(n) => {
                chunk.truncate(n);
                if tx.send(Ok(chunk)).is_err() {
                    // Consumer dropped the reader.
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "reader_only background copy failed");
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

impl Read for ReadOnly {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos == self.pending.len() {
            if self.done {
                return Ok(0);
            }
            match self.rx.recv() {
                Ok(Ok(chunk)) => {
                    self.pending = chunk;
                    self.pos = 0;
                }
                Ok(Err(e)) => {
                    self.done = true;
                    return Err(e);
                }
                // Sender gone: source reached EOF.
                Err(_) => {
                    self.done = true;
                    return Ok(0);
                }
            }
        }
        let n = buf.len().min(self.pending.len() - self.pos);
        buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
