//! Reader that yields one byte per call with a fixed delay.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

pub struct SlowReader {
    content: Vec<u8>,
    pos: usize,
    delay: Duration,
}

impl SlowReader {
    pub fn new(content: &[u8], delay: Duration) -> Self {
        SlowReader {
            content: content.to_vec(),
            pos: 0,
            delay,
        }
    }
}

impl Read for SlowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.content.len() || buf.is_empty() {
            return Ok(0);
        }
        thread::sleep(self.delay);
        buf[0] = self.content[self.pos];
        self.pos += 1;
        Ok(1)
    }
}
