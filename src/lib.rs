//! Tiny, git-friendly memory log for coding agents.
//!
//! Agents record short `what` (fact/constraint) and `why` (rationale) notes
//! into an append-only CSV file under `.crumbs/`, and hand the recent slice to
//! the next session through a single handoff checkpoint.
//!
//! ```no_run
//! use crumbs::fs::Store;
//! use crumbs::handoff::HandoffTracker;
//! use crumbs::memory::MemoryLog;
//! use crumbs::models::EntryKind;
//!
//! let store = Store::open(".")?;
//! MemoryLog::new(&store).append(EntryKind::Why, "csv keeps diffs readable")?;
//! HandoffTracker::new(&store).mark(10)?;
//! # Ok::<(), crumbs::CrumbsError>(())
//! ```

pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod handoff;
pub mod logging;
pub mod memory;
pub mod models;
pub mod validation;

pub use error::{CrumbsError, Result};
