//! Error types for store operations.
//!
//! Library code returns [`CrumbsError`] so callers can tell input mistakes,
//! missing stores, I/O trouble and lock contention apart. The CLI layer wraps
//! these in `anyhow` and maps the root cause to an exit code.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrumbsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no .crumbs store at {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("{context}")]
    StorageIo {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("timed out after {}ms waiting for store lock {}", .waited.as_millis(), .path.display())]
    LockTimeout { path: PathBuf, waited: Duration },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Ambiguous(String),

    #[error("corrupt {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CrumbsError>;

impl CrumbsError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CrumbsError::InvalidInput(msg.into())
    }

    /// Wrap any storage-level error with a short description of what failed.
    pub fn io<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CrumbsError::StorageIo {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Lock contention is the only condition worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CrumbsError::LockTimeout { .. })
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            CrumbsError::InvalidInput(_) => 2,
            CrumbsError::StoreNotFound(_) => 3,
            CrumbsError::StorageIo { .. } | CrumbsError::Corrupt { .. } => 4,
            CrumbsError::NotFound(_) | CrumbsError::Ambiguous(_) => 5,
            CrumbsError::LockTimeout { .. } => 75,
        }
    }
}

/// Attach a context string to fallible storage calls.
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> IoContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CrumbsError::io(f(), e))
    }
}
