//! I/O capability probes: seekable handles and pending stdin.

use std::fs::File;
use std::io::{self, Seek, SeekFrom};

/// True if `file` supports random access.
///
/// Only regular files qualify; terminals, `/dev/std*`-style character
/// devices, FIFOs and sockets report false even though `File` implements
/// `Seek` for them.
pub fn have_seeker(file: &File) -> bool {
    let is_regular = file.metadata().map(|m| m.is_file()).unwrap_or(false);
    if !is_regular {
        return false;
    }
    let mut handle = file;
    handle.seek(SeekFrom::Current(0)).is_ok()
}

/// True if stdin is redirected from a pipe or file rather than a terminal or
/// other character device. Propagates the error if stdin cannot be inspected.
#[cfg(unix)]
pub fn have_stdin() -> io::Result<bool> {
    fd_has_pending(libc::STDIN_FILENO)
}

/// True if `file` is a pipe, socket or regular file; false for a character device.
#[cfg(unix)]
pub fn has_pending_input(file: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;
    fd_has_pending(file.as_raw_fd())
}

#[cfg(unix)]
fn fd_has_pending(fd: std::os::unix::io::RawFd) -> io::Result<bool> {
    let mut st = std::mem::MaybeUninit::<libc::stat>::uninit();
    // SAFETY: fstat only writes into `st`, which is valid for one `stat`.
    let r = unsafe { libc::fstat(fd, st.as_mut_ptr()) };
    if r != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: fstat returned 0, so `st` is initialized.
    let st = unsafe { st.assume_init() };
    Ok(st.st_mode & libc::S_IFMT != libc::S_IFCHR)
}

/// Fallback for non-Unix: anything that is not a terminal counts as pending input.
#[cfg(not(unix))]
pub fn have_stdin() -> io::Result<bool> {
    use std::io::IsTerminal;
    Ok(!io::stdin().is_terminal())
}

/// Fallback for non-Unix: a handle that is not a terminal counts as pending input.
#[cfg(not(unix))]
pub fn has_pending_input(file: &File) -> io::Result<bool> {
    use std::io::IsTerminal;
    Ok(!file.is_terminal())
}
