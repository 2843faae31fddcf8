use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::editing::EditingResult;
use crate::workspace::{Session, SessionLayout};

/// Helper for reading/writing structured payloads inside a session directory.
pub struct SessionStore<'a> {
    session: &'a Session,
    layout: SessionLayout,
}

impl<'a> SessionStore<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            layout: SessionLayout::new(session),
        }
    }

    pub fn session_root(&self) -> &Path {
        &self.session.session_path
    }

    pub fn undo_dir(&self) -> &Path {
        &self.layout.undo_dir
    }

    fn ensure_dir(path: &Path) -> EditingResult<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create session directory {}", path.display()))?;
        Ok(())
    }

    pub fn ensure_session_dirs(&self) -> EditingResult<()> {
        Self::ensure_dir(self.session_root())?;
        Self::ensure_dir(&self.layout.undo_dir)?;
        Ok(())
    }

    pub fn load_state<T: DeserializeOwned>(&self) -> EditingResult<Option<T>> {
        read_json(&self.layout.state_path)
    }

    pub fn save_state<T: Serialize>(&self, payload: &T) -> EditingResult<()> {
        self.ensure_session_dirs()?;
        write_json(&self.layout.state_path, payload)
    }

    pub fn load_undo_payload<T: DeserializeOwned>(
        &self,
        event_id: &str,
    ) -> EditingResult<Option<T>> {
        read_json(&self.undo_payload_path(event_id))
    }

    pub fn save_undo_payload<T: Serialize>(
        &self,
        event_id: &str,
        payload: &T,
    ) -> EditingResult<PathBuf> {
        self.ensure_session_dirs()?;
        let path = self.undo_payload_path(event_id);
        write_json(&path, payload)?;
        Ok(path)
    }

    pub fn undo_payload_path(&self, event_id: &str) -> PathBuf {
        self.layout.undo_dir.join(format!("{event_id}.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> EditingResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session payload {}", path.display()))?;
    let payload = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse session payload {}", path.display()))?;
    Ok(Some(payload))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> EditingResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write session payload {}", path.display()))?;
    Ok(())
}
