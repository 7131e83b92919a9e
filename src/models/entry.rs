//! Memory entries: the immutable records held by the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CrumbsError;

/// Kind of memory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Constraints, facts, gotchas
    What,
    /// Rationale and intent
    Why,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::What => "what",
            EntryKind::Why => "why",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = CrumbsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "what" => Ok(EntryKind::What),
            "why" => Ok(EntryKind::Why),
            _ => Err(CrumbsError::invalid(format!(
                "invalid entry kind: {s}. Use: what, why"
            ))),
        }
    }
}

/// A single memory entry.
///
/// `position` is the zero-based record ordinal inside the log file. It is
/// what handoff checkpoints point at, so it stays stable even when an
/// earlier row is unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub kind: EntryKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub position: usize,
    /// Invoking directory relative to the store root
    pub cwd: String,
    pub git_branch: Option<String>,
    pub git_head: Option<String>,
}
