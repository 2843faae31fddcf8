//! Shared filesystem layout helpers for session storage.
//!
//! All session artifacts live under the per-session directory. Centralizing
//! the sub-directory logic here avoids duplicating string constants across
//! the storage and orchestration modules.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use super::Session;

/// Subdirectory storing undo checkpoints.
pub const UNDO_SUBDIR: &str = "undo";
/// Relative path for consent manifest storage inside the session dir.
pub const CONSENT_MANIFESTS_SUBDIR: &str = "consent/manifests";
/// File holding the serialized essay buffer and suggestion.
pub const STATE_FILE: &str = "state.json";
/// Append-only log of session events.
pub const EVENTS_FILE: &str = "events.jsonl";
/// Append-only log of accepted edits.
pub const EDITS_FILE: &str = "edits.jsonl";

/// Convenience wrapper for locating all storage paths of a session.
#[derive(Debug, Clone)]
pub struct SessionLayout {
    pub undo_dir: PathBuf,
    pub consent_manifests_dir: PathBuf,
    pub state_path: PathBuf,
    pub events_path: PathBuf,
    pub edits_path: PathBuf,
}

impl SessionLayout {
    /// Constructs a new layout reference for the provided session.
    pub fn new(session: &Session) -> Self {
        let root = &session.session_path;
        Self {
            undo_dir: root.join(UNDO_SUBDIR),
            consent_manifests_dir: root.join(CONSENT_MANIFESTS_SUBDIR),
            state_path: root.join(STATE_FILE),
            events_path: root.join(EVENTS_FILE),
            edits_path: root.join(EDITS_FILE),
        }
    }
}

/// Ensures the session's storage directories exist.
pub fn ensure_session_dirs(session: &Session) -> Result<()> {
    let layout = SessionLayout::new(session);
    fs::create_dir_all(&layout.undo_dir)?;
    fs::create_dir_all(&layout.consent_manifests_dir)?;
    Ok(())
}
