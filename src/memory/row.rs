//! On-disk row format for `memories.csv`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Entry, EntryKind};

pub const MEMORIES_HEADER: &[&str] = &[
    "id",
    "kind",
    "text",
    "ts_utc",
    "cwd",
    "git_branch",
    "git_head",
];

/// One CSV row. Field order must match [`MEMORIES_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRow {
    pub id: String,
    pub kind: String,
    pub text: String,
    pub ts_utc: String,
    pub cwd: String,
    pub git_branch: Option<String>,
    pub git_head: Option<String>,
}

impl MemoryRow {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            kind: entry.kind.to_string(),
            text: entry.text.clone(),
            ts_utc: format_ts(&entry.timestamp),
            cwd: entry.cwd.clone(),
            git_branch: entry.git_branch.clone(),
            git_head: entry.git_head.clone(),
        }
    }

    /// Decode into an [`Entry`]; the error describes the offending field.
    pub fn into_entry(self, position: usize) -> Result<Entry, String> {
        if self.id.trim().is_empty() {
            return Err("empty id".to_string());
        }
        let kind: EntryKind = self.kind.parse().map_err(|_| format!("bad kind '{}'", self.kind))?;
        let timestamp = DateTime::parse_from_rfc3339(&self.ts_utc)
            .map_err(|e| format!("bad ts_utc '{}': {e}", self.ts_utc))?
            .with_timezone(&Utc);

        Ok(Entry {
            id: self.id,
            kind,
            text: self.text,
            timestamp,
            position,
            cwd: self.cwd,
            git_branch: self.git_branch.filter(|s| !s.is_empty()),
            git_head: self.git_head.filter(|s| !s.is_empty()),
        })
    }
}

/// RFC 3339 with milliseconds and a `Z` suffix, so rows sort lexically.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
