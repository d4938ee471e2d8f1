//! Opening `-`-aware inputs and outputs for commands.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use streamy_core::probe;

/// An opened source plus its length when it is a seekable file.
pub struct Input {
    pub reader: Box<dyn Read + Send>,
    pub known_len: Option<u64>,
}

/// Open `arg` for reading; `-` is stdin.
pub fn open_input(arg: &str) -> Result<Input> {
    if arg == "-" {
        return Ok(Input {
            reader: Box::new(io::stdin()),
            known_len: None,
        });
    }
    let path = Path::new(arg);
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let known_len = if probe::have_seeker(&file) {
        file.metadata().ok().map(|m| m.len())
    } else {
        None
    };
    Ok(Input {
        reader: Box::new(file),
        known_len,
    })
}

/// Open `arg` for writing (create/truncate); `-` is stdout.
pub fn open_output(arg: &str) -> Result<Box<dyn Write + Send>> {
    if arg == "-" {
        return Ok(Box::new(io::stdout()));
    }
    let path = Path::new(arg);
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_input_has_known_len() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.bin");
        std::fs::write(&path, b"12345").unwrap();
        let mut input = open_input(path.to_str().unwrap()).unwrap();
        assert_eq!(input.known_len, Some(5));
        let mut s = String::new();
        input.reader.read_to_string(&mut s).unwrap();
        assert_eq!(s, "12345");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        let err = open_input(path.to_str().unwrap()).err().unwrap();
        assert!(format!("{err:#}").contains("open"));
    }

    #[test]
    fn stdin_input_has_unknown_len() {
        let input = open_input("-").unwrap();
        assert!(input.known_len.is_none());
    }
}
