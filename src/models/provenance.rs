//! Where a write came from: directory and git context.

use std::path::Path;

use crate::fs::Store;
use crate::git::GitInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Directory relative to the store root
    pub cwd: String,
    pub git_branch: Option<String>,
    pub git_head: Option<String>,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            cwd: ".".to_string(),
            git_branch: None,
            git_head: None,
        }
    }
}

impl Provenance {
    /// Capture the invoking directory and the git branch/head of the store root.
    pub fn capture(store: &Store, cwd: &Path) -> Self {
        let git = GitInfo::capture(store.root());
        Self {
            cwd: store.relative_cwd(cwd),
            git_branch: git.branch,
            git_head: git.head,
        }
    }
}
