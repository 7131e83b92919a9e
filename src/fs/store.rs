//! The `.crumbs/` store directory.
//!
//! A [`Store`] is an explicit handle passed to every log and handoff
//! operation; nothing about the "current store" is kept in global state, so
//! several stores can be open in one process.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::{CrumbsError, IoContext, Result};
use crate::fs::locking::{LockMode, StoreLock};
use crate::git::git_root_from;

pub const STORE_DIR_NAME: &str = ".crumbs";
pub const MEMORIES_FILE: &str = "memories.csv";
pub const HANDOFF_FILE: &str = "handoff.toml";
pub const LOCK_FILE: &str = ".lock";

/// Environment variable pointing directly at a store directory
pub const STORE_DIR_ENV: &str = "CRUMBS_DIR";

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    dir: PathBuf,
    config: Config,
}

impl Store {
    /// Open the store under `root`, creating `.crumbs/` if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        Self::open_dir(root, root.join(STORE_DIR_NAME), true)
    }

    /// Open the store under `root` without creating it.
    ///
    /// Fails with [`CrumbsError::StoreNotFound`] if `.crumbs/` is absent.
    pub fn open_existing<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        Self::open_dir(root, root.join(STORE_DIR_NAME), false)
    }

    /// Open a store whose directory is `dir`; `root` is the directory the
    /// store belongs to (used for relative paths and git lookups).
    pub fn open_dir(root: &Path, dir: PathBuf, create: bool) -> Result<Self> {
        if !dir.is_dir() {
            if !create {
                return Err(CrumbsError::StoreNotFound(dir));
            }
            fs::create_dir_all(&dir)
                .io_context(|| format!("Failed to create {}", dir.display()))?;
            debug!(dir = %dir.display(), "created store");
        }

        let config = Config::load(&dir)?;
        let store = Self {
            root: root.to_path_buf(),
            dir,
            config,
        };

        let _lock = store.lock()?;
        crate::memory::memory_log_file(&store).ensure_header()?;

        Ok(store)
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memories_path(&self) -> PathBuf {
        self.dir.join(MEMORIES_FILE)
    }

    pub fn handoff_path(&self) -> PathBuf {
        self.dir.join(HANDOFF_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    /// Take the exclusive writer lock.
    pub fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(
            &self.lock_path(),
            LockMode::Exclusive,
            self.config.lock_timeout(),
        )
    }

    /// Take a shared reader lock.
    pub fn lock_shared(&self) -> Result<StoreLock> {
        StoreLock::acquire(
            &self.lock_path(),
            LockMode::Shared,
            self.config.lock_timeout(),
        )
    }

    /// `cwd` relative to the store root, `.` for the root itself.
    pub fn relative_cwd(&self, cwd: &Path) -> String {
        match cwd.strip_prefix(&self.root) {
            Ok(p) if p.as_os_str().is_empty() => ".".to_string(),
            Ok(p) => p.to_string_lossy().to_string(),
            Err(_) => cwd.to_string_lossy().to_string(),
        }
    }
}

/// Where a store for `cwd` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub root: PathBuf,
    pub dir: PathBuf,
}

impl StoreLocation {
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }
}

/// Resolve the store for a working directory.
///
/// - `CRUMBS_DIR` (if given) names the store directory directly
/// - Else, inside a git repo: `.crumbs/` at the git root
/// - Else, an ancestor that already has `.crumbs/`
/// - Else, `.crumbs/` in `cwd`
pub fn locate_store(cwd: &Path, env_dir: Option<&Path>) -> StoreLocation {
    if let Some(dir) = env_dir {
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            cwd.join(dir)
        };
        let root = dir.parent().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
        return StoreLocation { root, dir };
    }

    let root = git_root_from(cwd)
        .or_else(|| crumbs_root_from(cwd))
        .unwrap_or_else(|| cwd.to_path_buf());
    let dir = root.join(STORE_DIR_NAME);
    StoreLocation { root, dir }
}

fn crumbs_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(STORE_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
}
