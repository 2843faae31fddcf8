use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::document::{content_hash, EssayDocument};
use crate::editing::selection::Passage;
use crate::editing::EditingResult;

/// The mutable essay state for one session: the text as loaded plus the
/// working copy that accepted edits are spliced into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayBuffer {
    pub original_text: String,
    pub working_text: String,
    pub filename: String,
    #[serde(default)]
    pub has_changes: bool,
    /// Fingerprint of the working text, updated per accepted edit.
    pub revision_hash: String,
}

impl EssayBuffer {
    pub fn from_document(document: &EssayDocument) -> Self {
        Self {
            original_text: document.text.clone(),
            working_text: document.text.clone(),
            filename: document.filename.clone(),
            has_changes: false,
            revision_hash: document.metadata.fingerprint.clone(),
        }
    }

    /// Splices `replacement` over the resolved span. The span must still
    /// match the working text; a stale selection is an error and leaves the
    /// buffer untouched.
    pub fn apply_replacement(
        &mut self,
        passage: &Passage,
        replacement: &str,
    ) -> EditingResult<String> {
        if passage.end > self.working_text.len()
            || self.working_text.get(passage.start..passage.end) != Some(passage.text.as_str())
        {
            bail!("Selected passage no longer matches the working text; select it again.");
        }
        self.working_text
            .replace_range(passage.start..passage.end, replacement);
        self.has_changes = true;
        self.revision_hash = content_hash(&self.working_text);
        Ok(self.revision_hash.clone())
    }
}
