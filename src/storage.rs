//! JSON file persistence for the journal

use std::fs;
use std::path::Path;

use crate::error::JournalResult;
use crate::model::DreamEntry;

/// Read entries from `path`. A missing file is an empty journal.
pub fn load_entries(path: &Path) -> JournalResult<Vec<DreamEntry>> {
    if !path.exists() {
        tracing::debug!("No journal at {:?}, starting empty", path);
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    let entries: Vec<DreamEntry> = serde_json::from_str(&data)?;
    tracing::info!("Loaded {} dreams from {:?}", entries.len(), path);
    Ok(entries)
}

/// Write entries as pretty JSON, creating parent directories as needed
pub fn save_entries(path: &Path, entries: &[DreamEntry]) -> JournalResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let data = serde_json::to_string_pretty(entries)?;
    fs::write(path, data)?;
    tracing::info!("Saved {} dreams to {:?}", entries.len(), path);
    Ok(())
}
