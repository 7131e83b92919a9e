//! Checkpoint file I/O
//!
//! The single checkpoint lives in `.crumbs/handoff.toml`. A missing file means
//! no checkpoint has been marked yet. Writes go through a temp file and a
//! rename, so readers see either the previous checkpoint or the new one.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{CrumbsError, IoContext, Result};
use crate::models::Checkpoint;

/// Read the checkpoint, or `None` when it was never marked.
///
/// An unparseable file is reported as [`CrumbsError::Corrupt`] rather than
/// being treated as unset.
pub fn read_checkpoint(path: &Path) -> Result<Option<Checkpoint>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CrumbsError::io(
                format!("Failed to read checkpoint file: {}", path.display()),
                e,
            ))
        }
    };

    let checkpoint: Checkpoint = toml::from_str(&content).map_err(|e| CrumbsError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Some(checkpoint))
}

/// Atomically replace the checkpoint file.
pub fn write_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        CrumbsError::invalid(format!("checkpoint path has no parent: {}", path.display()))
    })?;

    let content = toml::to_string_pretty(checkpoint)
        .io_context(|| "Failed to serialize checkpoint to TOML")?;

    let mut staging = NamedTempFile::new_in(dir)
        .io_context(|| format!("Failed to create staging file in {}", dir.display()))?;
    staging
        .write_all(content.as_bytes())
        .io_context(|| "Failed to write checkpoint")?;
    staging
        .as_file()
        .sync_all()
        .io_context(|| "Failed to sync checkpoint to disk")?;

    staging
        .persist(path)
        .map_err(|e| CrumbsError::io(format!("Failed to replace {}", path.display()), e.error))?;

    Ok(())
}
