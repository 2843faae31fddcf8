pub mod consent;
pub mod events;

pub use consent::{
    require_remote_generation_consent, ConsentManifest, ConsentOperation, ConsentStatus,
    ConsentStore,
};
pub use events::{
    log_edit_accepted, log_edit_proposed, log_edit_rejected, log_edit_undone, log_essay_saved,
    log_feedback_captured, log_passage_selected, log_suggestion_generated, EditEventDetails,
};

use crate::workspace::{Session, SessionLayout, SessionManager};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Type of session events that can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionCreated,
    EssayLoaded,
    SuggestionGenerated,
    PassageSelected,
    EditProposed,
    EditAccepted,
    EditRejected,
    FeedbackCaptured,
    EditUndone,
    EssaySaved,
}

/// General-purpose session event stored as JSONL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Record of a single accepted edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRecord {
    pub edit_id: Uuid,
    pub session_id: Uuid,
    pub operation: String,
    pub passage: String,
    pub replacement: String,
    /// Byte offsets of the replaced span in the pre-edit working text.
    pub span_start: usize,
    pub span_end: usize,
    pub accepted_at: DateTime<Utc>,
    /// Undo checkpoint holding the pre-edit working text.
    pub checkpoint_path: Option<PathBuf>,
    /// Fingerprint of the working text after the edit.
    pub revision_hash: String,
}

impl EditRecord {
    pub fn summary(&self) -> String {
        let excerpt: String = self.passage.chars().take(48).collect();
        format!(
            "{} - {} \"{}{}\"",
            self.accepted_at.to_rfc3339(),
            self.operation,
            excerpt,
            if self.passage.chars().count() > 48 {
                "..."
            } else {
                ""
            }
        )
    }
}

/// Wraps log paths for a session.
pub struct SessionLog {
    events_path: PathBuf,
    edits_path: PathBuf,
}

impl SessionLog {
    pub fn for_session(session: &Session) -> Self {
        let layout = SessionLayout::new(session);
        Self {
            events_path: layout.events_path,
            edits_path: layout.edits_path,
        }
    }

    pub fn append_event(&self, event: &SessionEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<SessionEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: SessionEvent = serde_json::from_str(line)?;
            events.push(event);
        }
        Ok(events)
    }

    pub fn load_events_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionEvent>> {
        Ok(self
            .load_events()?
            .into_iter()
            .filter(|event| event.timestamp >= cutoff)
            .collect())
    }

    pub fn record_edit(&self, record: &EditRecord) -> Result<()> {
        if let Some(parent) = self.edits_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.edits_path)?;
        file.write_all(serde_json::to_string(record)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn load_edits(&self) -> Result<Vec<EditRecord>> {
        if !self.edits_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.edits_path)?;
        let mut records = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let record: EditRecord = serde_json::from_str(line)?;
            records.push(record);
        }
        Ok(records)
    }

    /// Removes the most recent edit record and returns it, persisting the
    /// shortened history. The caller is responsible for restoring the essay
    /// from the record's checkpoint.
    pub fn pop_last_edit(&self) -> Result<Option<EditRecord>> {
        let mut records = self.load_edits()?;
        if let Some(record) = records.pop() {
            self.persist_edits(&records)?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    fn persist_edits(&self, records: &[EditRecord]) -> Result<()> {
        if let Some(parent) = self.edits_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.edits_path)?;
        for record in records {
            file.write_all(serde_json::to_string(record)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Append a simple session event helper.
pub fn log_event(
    _manager: &SessionManager,
    session: &Session,
    event_type: EventType,
    details: serde_json::Value,
) -> Result<()> {
    let event = SessionEvent {
        event_id: Uuid::new_v4(),
        session_id: session.id,
        event_type,
        timestamp: Utc::now(),
        details,
    };
    let log = SessionLog::for_session(session);
    log.append_event(&event)
}
