//! The events file: one JSON object keyed by "YYYY-MM-DD".

use std::path::Path;

use anyhow::{Context, Result};
use daybook_core::EventsByDate;
use tracing::debug;

/// Read the events file. A missing or blank file is an empty calendar.
pub fn load_events(path: &Path) -> Result<EventsByDate> {
    if !path.exists() {
        debug!(path = %path.display(), "no events file yet");
        return Ok(EventsByDate::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(EventsByDate::new());
    }

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the events file atomically (temp file + rename).
pub fn save_events(path: &Path, events: &EventsByDate) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(events)?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!(path = %path.display(), days = events.len(), "saved events");
    Ok(())
}
