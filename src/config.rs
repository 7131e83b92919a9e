//! Store configuration.
//!
//! Settings live in `.crumbs/config.toml`. The file is optional and every key
//! has a default, so a fresh store works without one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{CrumbsError, IoContext, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Default number of rows shown by `ls` and `find`.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Default handoff window, used by `mark` and by `open` without a checkpoint.
pub const DEFAULT_HANDOFF_WINDOW: usize = 10;

/// Crumbs are meant to be short and atomic.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 100;

pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub list_limit: usize,
    pub handoff_window: usize,
    pub max_text_chars: usize,
    pub lock_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            handoff_window: DEFAULT_HANDOFF_WINDOW,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load `config.toml` from a store directory, falling back to defaults
    /// when the file does not exist.
    pub fn load(store_dir: &Path) -> Result<Self> {
        let path = store_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .io_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .io_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.list_limit == 0 {
            return Err(CrumbsError::invalid("config: list_limit must be >= 1"));
        }
        if self.handoff_window == 0 {
            return Err(CrumbsError::invalid("config: handoff_window must be >= 1"));
        }
        if self.max_text_chars == 0 {
            return Err(CrumbsError::invalid("config: max_text_chars must be >= 1"));
        }
        Ok(())
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
