//! Handoff command implementations.
//!
//! Commands:
//! - `cr handoff mark [--window N]` - Move the checkpoint to the last N memories
//! - `cr handoff open [--limit N]` - Print the slice after the checkpoint

use anyhow::{Context, Result};
use colored::Colorize;

use crate::handoff::{Handoff, HandoffTracker};
use crate::models::Checkpoint;
use crate::validation::validate_count;

use super::common::{with_lock_retry, Workspace};
use super::formatters::{format_row, label};

const LABEL_WIDTH: usize = 9;

pub fn mark(window: Option<usize>) -> Result<()> {
    let ws = Workspace::open()?;
    let window = window.unwrap_or(ws.store.config().handoff_window);
    let provenance = ws.provenance();

    let tracker = HandoffTracker::new(&ws.store);
    let checkpoint = with_lock_retry(|| tracker.mark_with(window, &provenance))
        .context("Failed to mark handoff")?;

    print!("{}", format_mark(&checkpoint));
    Ok(())
}

pub fn open(limit: Option<usize>) -> Result<()> {
    if let Some(n) = limit {
        validate_count(n, "limit")?;
    }

    let ws = Workspace::open()?;
    let handoff = with_lock_retry(|| HandoffTracker::new(&ws.store).open())
        .context("Failed to open handoff")?;

    print!("{}", format_open(&handoff, limit));
    Ok(())
}

fn line(name: &str, value: impl std::fmt::Display) -> String {
    format!("{}{value}\n", label(name, LABEL_WIDTH))
}

fn format_mark(cp: &Checkpoint) -> String {
    let mut out = String::new();
    out.push_str(&line("handoff", &cp.id));
    out.push_str(&line("to", cp.latest_id.as_deref().unwrap_or("<empty>")));
    out.push_str(&line("from", cp.boundary_id.as_deref().unwrap_or("<start>")));
    out.push_str(&line("window", cp.window));
    out.push_str(&line("open", "cr handoff open"));
    out
}

/// Header, instructions and rows, newest first, capped at `limit`.
fn format_open(handoff: &Handoff, limit: Option<usize>) -> String {
    let total = handoff.entries.len();
    let shown = limit.map_or(total, |n| n.min(total));
    let mut out = String::new();

    match &handoff.checkpoint {
        Some(cp) => {
            out.push_str(&line("handoff", &cp.id));
            out.push_str(&line("from", cp.boundary_id.as_deref().unwrap_or("<start>")));
        }
        None => {
            out.push_str(&line("handoff", "<none> (showing the most recent memories)"));
        }
    }
    out.push_str(&line("window", handoff.window));
    out.push_str(&line(
        "slice",
        format!("{shown}/{total} memories (newest first)"),
    ));

    out.push_str(&format!("{}\n", "instructions:".bold()));
    out.push_str("1. Read the memory rows below from newest to oldest.\n");
    out.push_str("2. Continue work and record new context with `cr what` / `cr why`.\n");
    out.push_str(&format!(
        "3. When handing off again, run `cr handoff mark --window {}`.\n",
        handoff.window
    ));
    if shown < total {
        out.push_str(&line("more", format!("cr handoff open --limit {total}")));
    }

    for entry in handoff.entries.iter().rev().take(shown) {
        out.push_str(&format_row(entry));
        out.push('\n');
    }
    out
}
