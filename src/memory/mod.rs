//! The memory log: an append-only sequence of `what`/`why` entries.
//!
//! Entries are stored one per row in `.crumbs/memories.csv`. Writes take the
//! exclusive store lock for "read tail, write row"; reads take a shared lock.
//! All read operations return entries oldest first.

mod query;
mod row;

use chrono::{SubsecRound, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fs::{CsvLog, RecordLog, Store};
use crate::models::ids::{next_short_id, MEMORY_ID_PREFIX};
use crate::models::{Entry, EntryKind, Provenance};
use crate::validation::{validate_count, validate_id_prefix, validate_query, validate_text};

pub use query::{recent, resolve, search};
pub use row::{format_ts, MemoryRow, MEMORIES_HEADER};

/// The CSV log backing a store's memories.
pub fn memory_log_file(store: &Store) -> CsvLog<MemoryRow> {
    CsvLog::new(store.memories_path(), MEMORIES_HEADER)
}

/// Every readable entry plus the number of record slots in the log.
#[derive(Debug, Clone, Default)]
pub struct LogSnapshot {
    pub entries: Vec<Entry>,
    pub total: usize,
}

pub struct MemoryLog<'a, L = CsvLog<MemoryRow>> {
    store: &'a Store,
    log: L,
}

impl<'a> MemoryLog<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            log: memory_log_file(store),
        }
    }
}

impl<'a, L> MemoryLog<'a, L>
where
    L: RecordLog<Record = MemoryRow>,
{
    /// Build a memory log over any record log, e.g. an in-memory one in tests.
    pub fn with_log(store: &'a Store, log: L) -> Self {
        Self { store, log }
    }

    pub fn store(&self) -> &Store {
        self.store
    }

    /// Append an entry recorded from the store root.
    pub fn append(&self, kind: EntryKind, text: &str) -> Result<Entry> {
        self.append_with(kind, text, &Provenance::default())
    }

    /// Append an entry with explicit provenance.
    ///
    /// The row is durable before this returns. Timestamps never go backwards
    /// within a log: if the clock has, the previous tail timestamp is reused.
    pub fn append_with(
        &self,
        kind: EntryKind,
        text: &str,
        provenance: &Provenance,
    ) -> Result<Entry> {
        validate_text(text, self.store.config().max_text_chars)?;

        let _lock = self.store.lock()?;
        // A partial row from a crashed writer must go before positions are counted
        self.log.repair_tail()?;
        let snapshot = self.snapshot_unlocked()?;

        let existing = snapshot.entries.iter().map(|e| e.id.as_str());
        let id = next_short_id(existing, MEMORY_ID_PREFIX);
        // rows store millisecond precision
        let now = Utc::now().trunc_subsecs(3);
        let timestamp = match snapshot.entries.last() {
            Some(tail) if tail.timestamp > now => {
                warn!(
                    tail = %tail.timestamp,
                    %now,
                    "clock behind log tail, reusing tail timestamp"
                );
                tail.timestamp
            }
            _ => now,
        };

        let entry = Entry {
            id,
            kind,
            text: text.to_string(),
            timestamp,
            position: snapshot.total,
            cwd: provenance.cwd.clone(),
            git_branch: provenance.git_branch.clone(),
            git_head: provenance.git_head.clone(),
        };

        self.log.append(&MemoryRow::from_entry(&entry))?;
        debug!(id = %entry.id, position = entry.position, "appended memory");
        Ok(entry)
    }

    /// The most recent `limit` entries, oldest first.
    pub fn list(&self, limit: usize) -> Result<Vec<Entry>> {
        validate_count(limit, "limit")?;
        let entries = self.entries()?;
        Ok(recent(&entries, limit).to_vec())
    }

    /// Up to `limit` entries whose text contains `query` (case-insensitive),
    /// the newest matches, oldest first.
    pub fn find(&self, query: &str, limit: usize) -> Result<Vec<Entry>> {
        validate_query(query)?;
        validate_count(limit, "limit")?;
        let entries = self.entries()?;
        Ok(search(&entries, query, limit))
    }

    /// Resolve one entry by id or unique id prefix.
    pub fn show(&self, id_prefix: &str) -> Result<Entry> {
        validate_id_prefix(id_prefix)?;
        let entries = self.entries()?;
        resolve(&entries, id_prefix).cloned()
    }

    /// All readable entries, oldest first.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.snapshot()?.entries)
    }

    /// Number of readable entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read the whole log under a shared lock.
    pub fn snapshot(&self) -> Result<LogSnapshot> {
        let _lock = self.store.lock_shared()?;
        self.snapshot_unlocked()
    }

    /// Read the whole log. The caller must hold a store lock.
    pub(crate) fn snapshot_unlocked(&self) -> Result<LogSnapshot> {
        self.snapshot_from_unlocked(0)
    }

    /// Read entries at or after `from`; `total` still counts the whole log.
    /// The caller must hold a store lock.
    pub(crate) fn snapshot_from_unlocked(&self, from: usize) -> Result<LogSnapshot> {
        let scan = self.log.scan_from(from)?;
        let mut entries = Vec::with_capacity(scan.records.len());

        for positioned in scan.records {
            match positioned.record.into_entry(positioned.position) {
                Ok(entry) => entries.push(entry),
                Err(reason) => warn!(
                    position = positioned.position,
                    "skipping malformed memory row: {reason}"
                ),
            }
        }

        Ok(LogSnapshot {
            entries,
            total: scan.total,
        })
    }
}
