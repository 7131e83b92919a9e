//! Output formatting for command results.
//!
//! Data rows are plain tab-separated text so they stay easy to pipe; only
//! labels and headers are colored.

use colored::Colorize;

use crate::memory::format_ts;
use crate::models::Entry;

/// `id  kind  ts  cwd  text`, tab-separated.
pub fn format_row(entry: &Entry) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        entry.id,
        entry.kind,
        format_ts(&entry.timestamp),
        entry.cwd,
        entry.text
    )
}

/// A right-padded, colored label such as `window:  `.
pub fn label(name: &str, width: usize) -> String {
    format!("{:<width$}", format!("{name}:")).cyan().to_string()
}

/// Labelled multi-line view used by `cr show`.
pub fn format_entry_full(entry: &Entry) -> String {
    let mut lines = vec![
        format!("{}{}", label("id", 6), entry.id),
        format!("{}{}", label("kind", 6), entry.kind),
        format!("{}{}", label("ts", 6), format_ts(&entry.timestamp)),
        format!("{}{}", label("cwd", 6), entry.cwd),
    ];
    if let Some(branch) = &entry.git_branch {
        lines.push(format!("{}{}", label("git_branch", 12), branch));
    }
    if let Some(head) = &entry.git_head {
        lines.push(format!("{}{}", label("git_head", 12), head));
    }
    lines.push(format!("{}{}", label("text", 6), entry.text));
    lines.join("\n")
}
