mod docx;
mod metadata;
mod pdf;

pub use metadata::{content_hash, DocumentMetadata};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// An essay loaded from disk, with format-independent plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayDocument {
    pub source_path: PathBuf,
    pub filename: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Reads an essay from one of the supported formats into plain text.
///
/// `.txt` content is returned byte-exact; `.docx` paragraphs and `.pdf`
/// pages are joined with newlines.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<EssayDocument> {
    let path = path.as_ref();
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "txt" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        "docx" => docx::extract_docx_text(path)?,
        "pdf" => pdf::extract_pdf_text(path)?,
        other => anyhow::bail!("Unsupported file format: .{other}"),
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Essay path is missing a file name")?
        .to_string();

    Ok(EssayDocument {
        source_path: path.to_path_buf(),
        filename,
        metadata: DocumentMetadata::capture(&text),
        text,
    })
}

pub(crate) fn is_supported_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase()),
        Some(ref ext) if ["txt", "docx", "pdf"].contains(&ext.as_str())
    )
}

/// Lists supported essay files under a folder, sorted by path.
pub fn list_supported_files<P: AsRef<Path>>(folder: P) -> Result<Vec<PathBuf>> {
    let folder = folder.as_ref();
    if !folder.exists() {
        anyhow::bail!("Folder {:?} does not exist", folder);
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_supported_file(p))
        .collect();
    files.sort();
    Ok(files)
}
