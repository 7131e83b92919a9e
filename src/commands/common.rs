//! Shared plumbing for command implementations: store discovery, stdin text
//! and the lock retry policy.

use anyhow::{Context, Result};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;

use crate::error::CrumbsError;
use crate::fs::{locate_store, Store, StoreLocation, STORE_DIR_ENV};
use crate::models::Provenance;

/// An opened store plus the directory the command was invoked from.
pub struct Workspace {
    pub store: Store,
    pub cwd: PathBuf,
}

impl Workspace {
    /// Open (creating if needed) the store for the current directory.
    pub fn open() -> Result<Self> {
        let (location, cwd) = locate()?;
        let store = with_lock_retry(|| Store::open_dir(&location.root, location.dir.clone(), true))
            .with_context(|| format!("Failed to open store at {}", location.dir.display()))?;
        Ok(Self { store, cwd })
    }

    pub fn provenance(&self) -> Provenance {
        Provenance::capture(&self.store, &self.cwd)
    }
}

/// Resolve where the store for the current directory lives, without
/// touching the filesystem.
pub fn locate() -> Result<(StoreLocation, PathBuf)> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let env_dir = env::var_os(STORE_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    Ok((locate_store(&cwd, env_dir.as_deref()), cwd))
}

/// Run `op`, retrying once if it timed out waiting for the store lock.
pub fn with_lock_retry<T, F>(op: F) -> crate::Result<T>
where
    F: Fn() -> crate::Result<T>,
{
    match op() {
        Err(e) if e.is_retryable() => {
            warn!("{e}; retrying once");
            op()
        }
        other => other,
    }
}

/// Use `text` if given, otherwise read it from stdin.
///
/// One trailing line break from a pipe or heredoc is dropped.
pub fn read_text(text: Option<String>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;

    Ok(buf.trim_end_matches(['\n', '\r']).to_string())
}

/// Map an error chain to the process exit code of its root [`CrumbsError`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CrumbsError>())
        .map(CrumbsError::exit_code)
        .unwrap_or(1)
}
