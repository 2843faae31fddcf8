pub mod menu;

pub use menu::{MenuChoice, ReviewChoice};

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::assistant::{
    build_generation_prompt_manifest, consent_operation_for, DraftingEngine, EditOperation,
    GenerationKind, GenerationRequest, PromptLibrary, SuggestionEngine,
};
use crate::document::{load_document, EssayDocument};
use crate::editing::{
    record_checkpoint, resolve_selection, revert_checkpoint, EssayBuffer, Passage,
    SelectionError, SelectionInput, UndoPayload,
};
use crate::orchestration::{
    log_edit_accepted, log_edit_proposed, log_edit_rejected, log_edit_undone, log_essay_saved,
    log_feedback_captured, log_passage_selected, log_suggestion_generated, log_event,
    require_remote_generation_consent, EditEventDetails, EditRecord, EventType, SessionLog,
};
use crate::storage::SessionStore;
use crate::workspace::{config_dir, Session, SessionLayout, SessionManager};

/// Serialized per-session state: the essay buffer plus the one-shot
/// full-document suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub essay: EssayBuffer,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// A proposed replacement awaiting the user's accept/reject decision.
#[derive(Debug, Clone)]
pub struct EditProposal {
    pub operation: EditOperation,
    pub passage: Passage,
    pub replacement: String,
    /// Set once the proposal has been refined from rejection feedback.
    pub feedback: Option<String>,
}

/// Interactive editing facade: one instance drives one essay session
/// through the load → suggest → select → propose → review → save flow.
pub struct EditorSession {
    manager: SessionManager,
    session: Session,
    state: SessionState,
    prompts: PromptLibrary,
    engine: Box<dyn SuggestionEngine>,
    pending: Option<EditProposal>,
}

impl EditorSession {
    /// Opens a session over an essay file with the default local engine.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let manager = SessionManager::new()?;
        let engine = Box::new(DraftingEngine::new(&manager.config.model));
        Self::open_with(manager, path, engine)
    }

    /// Opens a session with a caller-provided engine.
    pub fn open_with<P: AsRef<Path>>(
        manager: SessionManager,
        path: P,
        engine: Box<dyn SuggestionEngine>,
    ) -> Result<Self> {
        let mut manager = manager;
        let document = load_document(path.as_ref())?;
        let session = manager.create_session(&document.source_path)?;
        let state = SessionState {
            essay: EssayBuffer::from_document(&document),
            suggestion: None,
        };
        let store = SessionStore::new(&session);
        store.save_state(&state)?;
        log_loaded(&manager, &session, &document)?;
        let prompts = PromptLibrary::load(&config_dir()?)?;
        Ok(Self {
            manager,
            session,
            state,
            prompts,
            engine,
            pending: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source_name(&self) -> &str {
        &self.state.essay.filename
    }

    pub fn working_text(&self) -> &str {
        &self.state.essay.working_text
    }

    pub fn original_text(&self) -> &str {
        &self.state.essay.original_text
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.state.suggestion.as_deref()
    }

    pub fn pending(&self) -> Option<&EditProposal> {
        self.pending.as_ref()
    }

    pub fn preview_lines(&self) -> usize {
        self.manager.config.editor.preview_lines
    }

    /// Generates the one-shot full-document suggestion.
    pub fn generate_suggestion(&mut self) -> Result<String> {
        let prompt = self
            .prompts
            .render(GenerationKind::FullRewrite, &self.state.essay.original_text, None);
        let manifest_path =
            self.record_consent_if_remote(GenerationKind::FullRewrite, &prompt)?;
        let request = GenerationRequest {
            kind: GenerationKind::FullRewrite,
            prompt,
            input: self.state.essay.original_text.clone(),
            feedback: None,
        };
        let suggestion = self
            .engine
            .generate(&request)
            .context("Suggestion generation failed")?;
        self.state.suggestion = Some(suggestion.clone());
        self.persist_state()?;
        let details = EditEventDetails::with_payload(
            self.session.slug.as_str(),
            json!({ "engine": self.engine.label(), "chars": suggestion.len() }),
        );
        let details = attach_manifest(details, manifest_path);
        log_suggestion_generated(&self.session, details)?;
        Ok(suggestion)
    }

    /// Resolves raw selection input against the working text. Pure and
    /// recoverable: the interactive loop re-prompts on `Err`.
    pub fn select_passage(&self, raw: &str) -> Result<Passage, SelectionError> {
        let input =
            SelectionInput::parse(raw, self.manager.config.editor.min_literal_selection)?;
        resolve_selection(&self.state.essay.working_text, &input)
    }

    /// Requests a replacement for the selected passage and stores it as the
    /// pending proposal.
    pub fn propose_edit(
        &mut self,
        operation: EditOperation,
        passage: Passage,
    ) -> Result<EditProposal> {
        let kind = GenerationKind::Passage(operation);
        log_passage_selected(
            &self.session,
            EditEventDetails::with_payload(
                self.session.slug.as_str(),
                json!({ "spanStart": passage.start, "spanEnd": passage.end }),
            )
            .with_operation(operation.label()),
        )?;
        let prompt = self.prompts.render(kind, &passage.text, None);
        let manifest_path = self.record_consent_if_remote(kind, &prompt)?;
        let request = GenerationRequest {
            kind,
            prompt,
            input: passage.text.clone(),
            feedback: None,
        };
        let replacement = self
            .engine
            .generate(&request)
            .context("Edit proposal generation failed")?;
        let proposal = EditProposal {
            operation,
            passage,
            replacement,
            feedback: None,
        };
        let details = EditEventDetails::with_payload(
            self.session.slug.as_str(),
            json!({ "replacementChars": proposal.replacement.len() }),
        )
        .with_operation(operation.label());
        log_edit_proposed(&self.session, attach_manifest(details, manifest_path))?;
        self.pending = Some(proposal.clone());
        Ok(proposal)
    }

    /// Revises the rejected proposal according to user feedback and makes
    /// the revision the new pending proposal.
    pub fn refine_pending(&mut self, feedback: &str) -> Result<EditProposal> {
        let Some(previous) = self.pending.clone() else {
            bail!("No pending proposal to refine.");
        };
        log_feedback_captured(
            &self.session,
            EditEventDetails::with_payload(
                self.session.slug.as_str(),
                json!({ "feedback": feedback }),
            )
            .with_operation(previous.operation.label()),
        )?;
        let prompt = self
            .prompts
            .render(GenerationKind::Refine, &previous.replacement, Some(feedback));
        let manifest_path = self.record_consent_if_remote(GenerationKind::Refine, &prompt)?;
        let request = GenerationRequest {
            kind: GenerationKind::Refine,
            prompt,
            input: previous.replacement.clone(),
            feedback: Some(feedback.to_string()),
        };
        let replacement = self
            .engine
            .generate(&request)
            .context("Refinement generation failed")?;
        let proposal = EditProposal {
            operation: previous.operation,
            passage: previous.passage,
            replacement,
            feedback: Some(feedback.to_string()),
        };
        let details = EditEventDetails::with_payload(
            self.session.slug.as_str(),
            json!({ "replacementChars": proposal.replacement.len(), "refined": true }),
        )
        .with_operation(previous.operation.label());
        log_edit_proposed(&self.session, attach_manifest(details, manifest_path))?;
        self.pending = Some(proposal.clone());
        Ok(proposal)
    }

    /// Accepts the pending proposal: records an undo checkpoint, splices the
    /// replacement into the working text, and appends an edit record.
    pub fn accept_pending(&mut self) -> Result<EditRecord> {
        let Some(proposal) = self.pending.take() else {
            bail!("No pending proposal to accept.");
        };
        let edit_id = Uuid::new_v4();
        let checkpoint = record_checkpoint(
            &self.session,
            edit_id,
            UndoPayload {
                previous_working_text: self.state.essay.working_text.clone(),
                previous_revision_hash: self.state.essay.revision_hash.clone(),
            },
            self.manager.config.editor.undo_retention,
        )?;
        let revision_hash = self
            .state
            .essay
            .apply_replacement(&proposal.passage, &proposal.replacement)?;
        self.persist_state()?;

        let record = EditRecord {
            edit_id,
            session_id: self.session.id,
            operation: proposal.operation.label().to_string(),
            passage: proposal.passage.text.clone(),
            replacement: proposal.replacement.clone(),
            span_start: proposal.passage.start,
            span_end: proposal.passage.end,
            accepted_at: Utc::now(),
            checkpoint_path: Some(checkpoint.clone()),
            revision_hash,
        };
        let log = SessionLog::for_session(&self.session);
        log.record_edit(&record)?;
        log_edit_accepted(
            &self.session,
            EditEventDetails::with_payload(
                self.session.slug.as_str(),
                json!({ "editId": record.edit_id, "revision": record.revision_hash }),
            )
            .with_operation(record.operation.clone())
            .with_undo_checkpoint(checkpoint.display().to_string()),
        )?;
        Ok(record)
    }

    /// Rejects the pending proposal. The proposal is kept so it can be
    /// refined with feedback; the working text is untouched.
    pub fn reject_pending(&mut self) -> Result<()> {
        let Some(proposal) = self.pending.as_ref() else {
            bail!("No pending proposal to reject.");
        };
        log_edit_rejected(
            &self.session,
            EditEventDetails::new(self.session.slug.as_str())
                .with_operation(proposal.operation.label()),
        )?;
        Ok(())
    }

    /// Drops the pending proposal without logging, e.g. when the user walks
    /// away from the refine loop.
    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// Reverts the most recent accepted edit from its checkpoint.
    pub fn undo_last_edit(&mut self) -> Result<Option<EditRecord>> {
        let log = SessionLog::for_session(&self.session);
        let Some(record) = log.pop_last_edit()? else {
            return Ok(None);
        };
        let payload = revert_checkpoint(&self.session, &record.edit_id)?;
        self.state.essay.working_text = payload.previous_working_text;
        self.state.essay.revision_hash = payload.previous_revision_hash;
        self.state.essay.has_changes =
            self.state.essay.working_text != self.state.essay.original_text;
        self.persist_state()?;
        log_edit_undone(
            &self.session,
            EditEventDetails::with_payload(
                self.session.slug.as_str(),
                json!({ "editId": record.edit_id }),
            )
            .with_operation(record.operation.clone()),
        )?;
        Ok(Some(record))
    }

    /// One summary line per accepted edit, oldest first.
    pub fn history(&self) -> Result<Vec<String>> {
        let log = SessionLog::for_session(&self.session);
        Ok(log.load_edits()?.iter().map(EditRecord::summary).collect())
    }

    /// Where the edited essay will be written.
    pub fn output_path(&self) -> PathBuf {
        output_path_for(&self.session.source_path)
    }

    /// Writes the working text next to the source file. Returns `None` when
    /// no edit was ever accepted.
    pub fn save(&self) -> Result<Option<PathBuf>> {
        if !self.state.essay.has_changes {
            return Ok(None);
        }
        let path = self.output_path();
        std::fs::write(&path, &self.state.essay.working_text)
            .with_context(|| format!("Failed to save essay to {}", path.display()))?;
        log_essay_saved(
            &self.session,
            EditEventDetails::with_payload(
                self.session.slug.as_str(),
                json!({ "bytes": self.state.essay.working_text.len() }),
            )
            .with_files_touched([path.display().to_string()]),
        )?;
        Ok(Some(path))
    }

    fn persist_state(&self) -> Result<()> {
        SessionStore::new(&self.session).save_state(&self.state)
    }

    /// Records a consent manifest when the install allows remote inference;
    /// local drafting needs none.
    fn record_consent_if_remote(
        &self,
        kind: GenerationKind,
        prompt: &str,
    ) -> Result<Option<String>> {
        if !self.manager.config.model.remote_allowed {
            return Ok(None);
        }
        let excerpt: String = prompt.chars().take(120).collect();
        let manifest = require_remote_generation_consent(
            &self.manager,
            &self.session,
            consent_operation_for(kind),
            "model.remote_allowed enabled in config",
            build_generation_prompt_manifest(
                kind.label(),
                &["essay_text"],
                self.engine.label(),
                &excerpt,
            ),
        )?;
        let layout = SessionLayout::new(&self.session);
        let path = layout
            .consent_manifests_dir
            .join(format!("{}.json", manifest.manifest_id));
        Ok(Some(path.display().to_string()))
    }
}

fn attach_manifest(details: EditEventDetails, manifest_path: Option<String>) -> EditEventDetails {
    match manifest_path {
        Some(path) => details.with_consent_manifest(path),
        None => details,
    }
}

fn log_loaded(
    manager: &SessionManager,
    session: &Session,
    document: &EssayDocument,
) -> Result<()> {
    log_event(
        manager,
        session,
        EventType::EssayLoaded,
        json!({
            "filename": document.filename,
            "byteLen": document.metadata.byte_len,
            "lineCount": document.metadata.line_count,
            "language": document.metadata.language,
        }),
    )
}

/// Output naming rule: `<stem>_edited.txt` in the source file's directory.
pub fn output_path_for(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("essay");
    let file_name = format!("{stem}_edited.txt");
    match source.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from(file_name),
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
