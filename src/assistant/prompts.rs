//! Prompt templates for the suggestion engine.
//!
//! A default set ships embedded in the binary; a workspace can override it
//! by dropping a `prompts.yaml` into its config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{EditOperation, GenerationKind};

const DEFAULT_PROMPTS: &str = include_str!("prompts.yaml");

/// Name of the optional per-workspace override file.
pub const PROMPTS_FILE_NAME: &str = "prompts.yaml";

/// The five templates the editor uses, keyed by operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptLibrary {
    pub full_rewrite: String,
    pub rewrite: String,
    pub rephrase: String,
    pub expand: String,
    pub refine: String,
}

impl PromptLibrary {
    /// Loads the embedded defaults.
    pub fn embedded() -> Result<Self> {
        serde_yaml::from_str(DEFAULT_PROMPTS).context("Embedded prompt library is invalid")
    }

    /// Loads the workspace override when present, otherwise the defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let override_path = config_dir.join(PROMPTS_FILE_NAME);
        if override_path.exists() {
            let data = fs::read_to_string(&override_path).with_context(|| {
                format!("Failed to read prompt library {}", override_path.display())
            })?;
            return serde_yaml::from_str(&data).with_context(|| {
                format!("Failed to parse prompt library {}", override_path.display())
            });
        }
        Self::embedded()
    }

    pub fn render_full_rewrite(&self, essay: &str) -> String {
        self.full_rewrite.replace("{essay}", essay)
    }

    pub fn render_passage(&self, operation: EditOperation, passage: &str) -> String {
        let template = match operation {
            EditOperation::Rewrite => &self.rewrite,
            EditOperation::Rephrase => &self.rephrase,
            EditOperation::Expand => &self.expand,
        };
        template.replace("{passage}", passage)
    }

    pub fn render_refine(&self, passage: &str, feedback: &str) -> String {
        self.refine
            .replace("{passage}", passage)
            .replace("{feedback}", feedback)
    }

    /// Renders the template matching a generation kind.
    pub fn render(&self, kind: GenerationKind, input: &str, feedback: Option<&str>) -> String {
        match kind {
            GenerationKind::FullRewrite => self.render_full_rewrite(input),
            GenerationKind::Passage(op) => self.render_passage(op, input),
            GenerationKind::Refine => self.render_refine(input, feedback.unwrap_or_default()),
        }
    }
}
