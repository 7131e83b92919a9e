//! `cr` with no command: a short orientation for whoever just arrived.

use anyhow::Result;
use colored::Colorize;

use crate::config::DEFAULT_HANDOFF_WINDOW;
use crate::fs::StoreLocation;

use super::common::locate;

pub fn execute() -> Result<()> {
    let (location, _) = locate()?;
    print!("{}", onboarding_text(&location));
    Ok(())
}

/// Onboarding block; differs depending on whether a store already exists.
pub fn onboarding_text(location: &StoreLocation) -> String {
    let detected = location
        .exists()
        .then(|| location.dir.display().to_string().cyan().to_string());
    format!("{}\n{}", "Onboarding:".bold(), onboarding_body(detected))
}

/// Uncolored onboarding block appended to `cr --help`.
pub fn help_text() -> String {
    let detected = locate()
        .ok()
        .filter(|(location, _)| location.exists())
        .map(|(location, _)| location.dir.display().to_string());
    format!("Onboarding:\n{}", onboarding_body(detected))
}

fn onboarding_body(detected: Option<String>) -> String {
    let mut out = String::new();
    match detected {
        Some(dir) => {
            out.push_str(&format!("  Detected .crumbs at: {dir}\n"));
            out.push_str("  Run: cr handoff open\n");
        }
        None => {
            out.push_str("  No store yet. Record memories as you go:\n");
            out.push_str("    cr what \"<fact/constraint/change>\"\n");
            out.push_str("    cr why \"<decision/rationale>\"\n");
            out.push_str("  To hand off to the next session:\n");
            out.push_str(&format!(
                "    cr handoff mark --window {DEFAULT_HANDOFF_WINDOW}\n"
            ));
        }
    }
    out.push_str("  The checkpoint groups recent memories so the next agent gets up to speed.\n");
    out
}
