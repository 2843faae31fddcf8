pub mod engine;
pub mod manifest;
pub mod prompts;

pub use engine::DraftingEngine;
pub use manifest::{build_generation_prompt_manifest, consent_operation_for};
pub use prompts::PromptLibrary;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The three passage-level operations a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    Rewrite,
    Rephrase,
    Expand,
}

impl EditOperation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rewrite => "rewrite",
            Self::Rephrase => "rephrase",
            Self::Expand => "expand",
        }
    }
}

/// What a single engine call is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// The whole-essay suggestion generated once after load.
    FullRewrite,
    /// A replacement for one selected passage.
    Passage(EditOperation),
    /// A revision of a rejected proposal, guided by user feedback.
    Refine,
}

impl GenerationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullRewrite => "full_rewrite",
            Self::Passage(op) => op.label(),
            Self::Refine => "refine",
        }
    }
}

/// One blocking request to the text-generation engine.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: GenerationKind,
    /// Fully rendered prompt, kept for manifests and event payloads.
    pub prompt: String,
    /// The essay or passage text the prompt operates on.
    pub input: String,
    pub feedback: Option<String>,
}

/// Seam for the external text-generation service. The default
/// implementation drafts locally; remote engines plug in behind the same
/// trait and are consent-gated by the caller.
pub trait SuggestionEngine {
    fn label(&self) -> &str;
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
