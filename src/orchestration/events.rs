use crate::workspace::Session;
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use super::{EventType, SessionEvent, SessionLog};

/// Structured payload logged for editing operations.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEventDetails {
    pub session_slug: String,
    pub operation: Option<String>,
    #[serde(default)]
    pub files_touched: Vec<String>,
    pub undo_checkpoint_path: Option<String>,
    pub consent_manifest_path: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EditEventDetails {
    pub fn new(session_slug: impl Into<String>) -> Self {
        Self {
            session_slug: session_slug.into(),
            operation: None,
            files_touched: Vec::new(),
            undo_checkpoint_path: None,
            consent_manifest_path: None,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(session_slug: impl Into<String>, payload: serde_json::Value) -> Self {
        let mut details = Self::new(session_slug);
        details.payload = payload;
        details
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_files_touched<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_touched = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_undo_checkpoint(mut self, checkpoint: impl Into<String>) -> Self {
        self.undo_checkpoint_path = Some(checkpoint.into());
        self
    }

    pub fn with_consent_manifest(mut self, path: impl Into<String>) -> Self {
        self.consent_manifest_path = Some(path.into());
        self
    }
}

pub fn log_suggestion_generated(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::SuggestionGenerated, details)
}

pub fn log_passage_selected(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::PassageSelected, details)
}

pub fn log_edit_proposed(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::EditProposed, details)
}

pub fn log_edit_accepted(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::EditAccepted, details)
}

pub fn log_edit_rejected(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::EditRejected, details)
}

pub fn log_feedback_captured(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::FeedbackCaptured, details)
}

pub fn log_edit_undone(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::EditUndone, details)
}

pub fn log_essay_saved(session: &Session, details: EditEventDetails) -> Result<Uuid> {
    log_edit_event(session, EventType::EssaySaved, details)
}

fn log_edit_event(
    session: &Session,
    event_type: EventType,
    details: EditEventDetails,
) -> Result<Uuid> {
    let event = SessionEvent {
        event_id: Uuid::new_v4(),
        session_id: session.id,
        event_type,
        timestamp: Utc::now(),
        details: serde_json::to_value(details)?,
    };
    let log = SessionLog::for_session(session);
    log.append_event(&event)?;
    Ok(event.event_id)
}
