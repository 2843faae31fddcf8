use serde_json::Value;

use crate::orchestration::ConsentOperation;

use super::{EditOperation, GenerationKind};

/// Maps a generation kind to the consent operation recorded for it.
pub fn consent_operation_for(kind: GenerationKind) -> ConsentOperation {
    match kind {
        GenerationKind::FullRewrite => ConsentOperation::FullRewrite,
        GenerationKind::Passage(EditOperation::Rewrite) => ConsentOperation::PassageRewrite,
        GenerationKind::Passage(EditOperation::Rephrase) => ConsentOperation::PassageRephrase,
        GenerationKind::Passage(EditOperation::Expand) => ConsentOperation::PassageExpand,
        GenerationKind::Refine => ConsentOperation::PassageRefine,
    }
}

/// Helper to build a manifest JSON blob for a generation based on provided metadata.
pub fn build_generation_prompt_manifest(
    operation: &str,
    data_categories: &[&str],
    destination: &str,
    prompt_excerpt: &str,
) -> Value {
    serde_json::json!({
        "operation": operation,
        "data_categories": data_categories,
        "destination": destination,
        "prompt_excerpt": prompt_excerpt,
    })
}
