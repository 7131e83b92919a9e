//! Input validation for entry text, counts and id prefixes.
//!
//! Everything here fails with [`CrumbsError::InvalidInput`] so the caller can
//! surface the problem immediately; none of it is ever retried.

use crate::error::{CrumbsError, Result};

/// Maximum length accepted for an id prefix passed to `show`.
pub const MAX_ID_PREFIX_LENGTH: usize = 64;

/// Validate entry text.
///
/// Text must be non-empty after trimming, fit within `max_chars` characters
/// (counted as chars, not bytes) and stay on a single line.
pub fn validate_text(text: &str, max_chars: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CrumbsError::invalid("text is empty"));
    }

    let n = text.chars().count();
    if n > max_chars {
        return Err(CrumbsError::invalid(format!(
            "too long ({n} > {max_chars}). split into multiple crumbs."
        )));
    }

    if text.contains('\n') || text.contains('\r') {
        return Err(CrumbsError::invalid("newlines are not allowed"));
    }

    Ok(())
}

/// Validate a row count such as a list limit or handoff window.
pub fn validate_count(n: usize, name: &str) -> Result<()> {
    if n == 0 {
        return Err(CrumbsError::invalid(format!("{name} must be >= 1")));
    }
    Ok(())
}

/// Validate a search query for `find`.
pub fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(CrumbsError::invalid("query is empty"));
    }
    Ok(())
}

/// Validate an id or id prefix (`cr-ab12`, `ab12`, `c_ab12`).
pub fn validate_id_prefix(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CrumbsError::invalid("id cannot be empty"));
    }

    if id.len() > MAX_ID_PREFIX_LENGTH {
        return Err(CrumbsError::invalid(format!(
            "id too long: {} characters (max {MAX_ID_PREFIX_LENGTH})",
            id.len()
        )));
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        return Err(CrumbsError::invalid(format!(
            "id '{id}' contains invalid characters"
        )));
    }

    Ok(())
}

/// Clap value parser for id prefix arguments.
///
/// ```ignore
/// #[arg(value_parser = clap_id_validator)]
/// id: String,
/// ```
pub fn clap_id_validator(s: &str) -> std::result::Result<String, String> {
    validate_id_prefix(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
