//! Handoff checkpoints over the memory log.
//!
//! A store has at most one [`Checkpoint`]. `mark` moves it so that the last
//! `window` entries sit after it; `open` returns everything after it, or the
//! last `handoff_window` entries when nothing was ever marked.

use chrono::Utc;
use tracing::debug;

use crate::error::Result;
use crate::fs::checkpoint::{read_checkpoint, write_checkpoint};
use crate::fs::Store;
use crate::memory::{recent, MemoryLog};
use crate::models::ids::{next_short_id, HANDOFF_ID_PREFIX};
use crate::models::{Checkpoint, Entry, Provenance};
use crate::validation::validate_count;

/// The slice of memories handed to the next session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// The checkpoint the slice starts from, `None` for the fallback window
    pub checkpoint: Option<Checkpoint>,
    /// Window recorded on the checkpoint, or the configured default
    pub window: usize,
    /// Entries after the boundary, oldest first
    pub entries: Vec<Entry>,
}

impl Handoff {
    pub fn from_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct HandoffTracker<'a> {
    store: &'a Store,
    memory: MemoryLog<'a>,
}

impl<'a> HandoffTracker<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            memory: MemoryLog::new(store),
        }
    }

    /// Mark a checkpoint leaving the last `window` entries after it.
    pub fn mark(&self, window: usize) -> Result<Checkpoint> {
        self.mark_with(window, &Provenance::default())
    }

    pub fn mark_with(&self, window: usize, provenance: &Provenance) -> Result<Checkpoint> {
        validate_count(window, "window")?;

        let _lock = self.store.lock()?;
        let previous = read_checkpoint(&self.store.handoff_path())?;
        let entries = self.memory.snapshot_unlocked()?.entries;

        // Fewer entries than the window puts the boundary at the start
        let first_after = entries.len().saturating_sub(window);
        let position = match first_after {
            0 => 0,
            i => entries[i].position,
        };
        let boundary_id = first_after
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .map(|e| e.id.clone());

        let id = next_short_id(previous.as_ref().map(|cp| cp.id.as_str()), HANDOFF_ID_PREFIX);
        let checkpoint = Checkpoint {
            id,
            ts_utc: Utc::now(),
            position,
            window,
            boundary_id,
            latest_id: entries.last().map(|e| e.id.clone()),
            cwd: provenance.cwd.clone(),
            git_branch: provenance.git_branch.clone(),
            git_head: provenance.git_head.clone(),
        };

        write_checkpoint(&self.store.handoff_path(), &checkpoint)?;
        debug!(id = %checkpoint.id, position, window, "marked handoff");

        Ok(checkpoint)
    }

    /// Entries after the checkpoint, or the default window when unset.
    ///
    /// A pure read: two calls with no write in between return the same slice.
    pub fn open(&self) -> Result<Handoff> {
        let _lock = self.store.lock_shared()?;
        let checkpoint = read_checkpoint(&self.store.handoff_path())?;

        let handoff = match checkpoint {
            Some(cp) => {
                // Only rows at or after the boundary are decoded
                let after = self.memory.snapshot_from_unlocked(cp.position)?.entries;
                Handoff {
                    window: cp.window,
                    checkpoint: Some(cp),
                    entries: after,
                }
            }
            None => {
                let window = self.store.config().handoff_window;
                let entries = self.memory.snapshot_unlocked()?.entries;
                Handoff {
                    checkpoint: None,
                    window,
                    entries: recent(&entries, window).to_vec(),
                }
            }
        };

        Ok(handoff)
    }

    /// The current checkpoint, if one was ever marked.
    pub fn checkpoint(&self) -> Result<Option<Checkpoint>> {
        let _lock = self.store.lock_shared()?;
        read_checkpoint(&self.store.handoff_path())
    }
}
