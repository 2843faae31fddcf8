use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use whatlang::detect;

/// Lightweight metadata captured when an essay is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub byte_len: usize,
    pub word_estimate: usize,
    pub line_count: usize,
    /// ISO 639-3 code of the detected language, if detection was confident.
    pub language: Option<String>,
    pub fingerprint: String,
}

impl DocumentMetadata {
    pub fn capture(text: &str) -> Self {
        Self {
            byte_len: text.len(),
            word_estimate: text.split_whitespace().count(),
            line_count: text.lines().count(),
            language: detect(text).map(|info| info.lang().code().to_string()),
            fingerprint: content_hash(text),
        }
    }
}

pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
