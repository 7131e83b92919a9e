//! Query helpers over a chronological slice of entries.

use crate::error::{CrumbsError, Result};
use crate::models::ids::{
    matches_any_prefix, prefix_candidates, LEGACY_MEMORY_ID_PREFIX, MEMORY_ID_PREFIX,
};
use crate::models::Entry;

/// The last `limit` entries, oldest first.
pub fn recent(entries: &[Entry], limit: usize) -> &[Entry] {
    let len = entries.len();
    if len <= limit {
        entries
    } else {
        &entries[(len - limit)..]
    }
}

/// Case-insensitive substring search.
///
/// Scans from the newest entry backward and keeps up to `limit` matches,
/// returned oldest first like [`recent`].
pub fn search(entries: &[Entry], needle: &str, limit: usize) -> Vec<Entry> {
    let needle = needle.to_lowercase();
    let mut hits: Vec<Entry> = entries
        .iter()
        .rev()
        .filter(|e| e.text.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect();
    hits.reverse();
    hits
}

/// Resolve an entry from a full id or a unique prefix.
pub fn resolve<'a>(entries: &'a [Entry], id_prefix: &str) -> Result<&'a Entry> {
    let candidates = prefix_candidates(id_prefix, MEMORY_ID_PREFIX, LEGACY_MEMORY_ID_PREFIX);

    if let Some(exact) = entries
        .iter()
        .find(|e| e.id.eq_ignore_ascii_case(id_prefix))
    {
        return Ok(exact);
    }

    let mut matches = entries
        .iter()
        .filter(|e| matches_any_prefix(&e.id, &candidates));

    match (matches.next(), matches.next()) {
        (None, _) => Err(CrumbsError::NotFound(format!(
            "no memory matching id prefix '{id_prefix}'"
        ))),
        (Some(entry), None) => Ok(entry),
        (Some(_), Some(_)) => Err(CrumbsError::Ambiguous(format!(
            "id prefix '{id_prefix}' is ambiguous"
        ))),
    }
}
