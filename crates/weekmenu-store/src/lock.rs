//! Exclusive advisory lock held around a log read-modify-write.
//!
//! On Unix this is `flock(LOCK_EX)` on a sidecar file; the kernel drops the
//! lock when the file descriptor closes, so releasing is just dropping the
//! guard. Other platforms get a guard that locks nothing.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// RAII guard for the log lock.
#[derive(Debug)]
pub struct LogLock {
    _file: File,
}

impl LogLock {
    /// Block until the lock at `path` is held, creating the file if needed.
    pub fn acquire(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        lock_exclusive(&file)?;
        Ok(Self { _file: file })
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        let ret = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
        if ret == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &File) -> io::Result<()> {
    Ok(())
}
