//! The handoff checkpoint record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single saved boundary of the last handoff.
///
/// Entries whose log position is `>= position` are "after" the checkpoint and
/// are rendered by `handoff open`. A store holds at most one of these; `mark`
/// overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub ts_utc: DateTime<Utc>,
    /// Number of log records at or before the boundary
    pub position: usize,
    /// Window requested when the checkpoint was marked
    pub window: usize,
    /// Last entry at or before the boundary, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_id: Option<String>,
    /// Newest entry when the checkpoint was marked, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_id: Option<String>,
    pub cwd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_head: Option<String>,
}
