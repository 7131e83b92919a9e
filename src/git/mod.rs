//! Git context captured alongside entries and checkpoints.
//!
//! All of this is best effort: a missing git binary or a directory outside any
//! repository simply yields no branch/head.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Branch name and commit of the repository at `root`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: Option<String>,
    pub head: Option<String>,
}

impl GitInfo {
    pub fn capture(root: &Path) -> Self {
        let branch = rev_parse(root, &["--abbrev-ref", "HEAD"])
            .map_err(|e| debug!("no git branch: {e:#}"))
            .ok();
        let head = rev_parse(root, &["HEAD"])
            .map_err(|e| debug!("no git head: {e:#}"))
            .ok();
        Self { branch, head }
    }
}

/// `git rev-parse <args>` in `root`, trimmed stdout.
fn rev_parse(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("rev-parse")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to execute: git rev-parse {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git rev-parse failed: {}", stderr.trim());
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        bail!("git rev-parse printed nothing");
    }
    Ok(value)
}

/// Walk upwards from `start` looking for a directory containing `.git`.
pub fn git_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
