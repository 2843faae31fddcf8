//! Page text extraction for PDF essays, one newline-joined block per page.

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

pub fn extract_pdf_text(path: &Path) -> Result<String> {
    let doc =
        Document::load(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut text = String::new();
    for page in pages {
        let page_text = doc
            .extract_text(&[page])
            .with_context(|| format!("Failed to extract text from page {page}"))?;
        text.push_str(page_text.trim_end());
        text.push('\n');
    }
    Ok(text)
}
