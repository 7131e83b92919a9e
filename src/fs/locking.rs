//! Store lock for safe concurrent access
//!
//! Every store has a `.lock` file. Writers (appends, checkpoint replacement)
//! hold an exclusive `fs2` advisory lock on it; readers hold a shared one, so
//! a reader never sees a row that is still being written.
//!
//! Advisory locks are cooperative - all participants must go through
//! [`StoreLock`] for the locking to be effective.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{CrumbsError, IoContext, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// A held store lock. Released when dropped, on every exit path.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl StoreLock {
    /// Acquire the lock, polling until `timeout` elapses.
    ///
    /// Fails with [`CrumbsError::LockTimeout`] when another process keeps
    /// holding a conflicting lock for longer than `timeout`.
    pub fn acquire(path: &Path, mode: LockMode, timeout: Duration) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .io_context(|| format!("Failed to open lock file: {}", path.display()))?;

        let start = Instant::now();
        loop {
            // fs2 calls are spelled out: newer std has inherent File lock
            // methods with the same names and different error types.
            let attempt = match mode {
                LockMode::Shared => FileExt::try_lock_shared(&file),
                LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
            };

            match attempt {
                Ok(()) => {
                    debug!(path = %path.display(), ?mode, "store lock acquired");
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                        mode,
                    });
                }
                Err(e) if is_contended(&e) => {
                    if start.elapsed() >= timeout {
                        return Err(CrumbsError::LockTimeout {
                            path: path.to_path_buf(),
                            waited: start.elapsed(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(CrumbsError::io(
                        format!("Failed to acquire lock: {}", path.display()),
                        e,
                    ))
                }
            }
        }
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

fn is_contended(e: &std::io::Error) -> bool {
    e.kind() == fs2::lock_contended_error().kind() || e.kind() == std::io::ErrorKind::WouldBlock
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(path = %self.path.display(), "store unlock failed: {e}");
        }
    }
}
