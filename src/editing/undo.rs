use std::path::PathBuf;

use anyhow::Context;
use uuid::Uuid;

use crate::storage::SessionStore;
use crate::workspace::Session;

use super::EditingResult;

/// Payload persisted for undo operations.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoPayload {
    pub previous_working_text: String,
    pub previous_revision_hash: String,
}

/// Records an undo checkpoint for an accepted edit.
pub fn record_checkpoint(
    session: &Session,
    event_id: Uuid,
    payload: UndoPayload,
    retention: usize,
) -> EditingResult<PathBuf> {
    let store = SessionStore::new(session);
    let path = store.save_undo_payload(&event_id.to_string(), &payload)?;
    prune_undo_history(session, retention)?;
    Ok(path)
}

/// Loads the working text recorded before a prior edit.
pub fn revert_checkpoint(session: &Session, event_id: &Uuid) -> EditingResult<UndoPayload> {
    let store = SessionStore::new(session);
    let payload: Option<UndoPayload> = store.load_undo_payload(&event_id.to_string())?;
    payload.with_context(|| format!("No undo checkpoint for edit {}", event_id))
}

fn prune_undo_history(session: &Session, retention: usize) -> EditingResult<()> {
    let store = SessionStore::new(session);
    let dir = store.undo_dir().to_path_buf();
    if !dir.exists() {
        return Ok(());
    }
    let mut entries: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .collect();
    if entries.len() <= retention {
        return Ok(());
    }
    entries.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    while entries.len() > retention {
        if let Some(entry) = entries.first() {
            let _ = std::fs::remove_file(entry.path());
        }
        entries.remove(0);
    }
    Ok(())
}
