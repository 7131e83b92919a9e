//! Memory command implementations.
//!
//! Commands:
//! - `cr what <text>` / `cr why <text>` - Record a memory (stdin if omitted)
//! - `cr ls [N]` - List the last N memories
//! - `cr show <id>` - Show one memory by id or unique prefix
//! - `cr find <query> [--limit N]` - Case-insensitive substring search

use anyhow::{Context, Result};

use crate::memory::MemoryLog;
use crate::models::EntryKind;

use super::common::{read_text, with_lock_retry, Workspace};
use super::formatters::{format_entry_full, format_row};

/// Record a `what` or `why` memory and print its id.
pub fn record(kind: EntryKind, text: Option<String>) -> Result<()> {
    let text = read_text(text)?;
    let ws = Workspace::open()?;
    let provenance = ws.provenance();

    let log = MemoryLog::new(&ws.store);
    let entry = with_lock_retry(|| log.append_with(kind, &text, &provenance))
        .with_context(|| format!("Failed to record {kind}"))?;

    println!("{}", entry.id);
    Ok(())
}

/// List the last `n` memories, oldest first.
pub fn list(n: Option<usize>) -> Result<()> {
    let ws = Workspace::open()?;
    let n = n.unwrap_or(ws.store.config().list_limit);

    let entries = with_lock_retry(|| MemoryLog::new(&ws.store).list(n))
        .context("Failed to list memories")?;
    for entry in &entries {
        println!("{}", format_row(entry));
    }
    Ok(())
}

pub fn show(id: String) -> Result<()> {
    let ws = Workspace::open()?;
    let entry = with_lock_retry(|| MemoryLog::new(&ws.store).show(&id))
        .with_context(|| format!("Failed to show memory '{id}'"))?;

    println!("{}", format_entry_full(&entry));
    Ok(())
}

pub fn find(query: String, limit: Option<usize>) -> Result<()> {
    let ws = Workspace::open()?;
    let limit = limit.unwrap_or(ws.store.config().list_limit);

    let hits = with_lock_retry(|| MemoryLog::new(&ws.store).find(&query, limit))
        .with_context(|| format!("Failed to search for '{query}'"))?;
    for entry in &hits {
        println!("{}", format_row(entry));
    }
    Ok(())
}
