//! Paragraph text extraction from the OOXML container.
//!
//! A `.docx` file is a zip archive; the essay body lives in
//! `word/document.xml`. Only text runs (`<w:t>`) are extracted, one
//! output line per paragraph (`<w:p>`), matching what word processors
//! show as plain text.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid docx archive", path.display()))?;
    let mut entry = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("{} is missing {DOCUMENT_PART}", path.display()))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(paragraphs_from_xml(&xml).join("\n"))
}

/// Splits the document XML into paragraphs and gathers the text runs of each.
fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    xml.split("</w:p>")
        .filter(|chunk| chunk.contains("<w:p"))
        .map(collect_text_runs)
        .collect()
}

fn collect_text_runs(chunk: &str) -> String {
    let mut text = String::new();
    let mut rest = chunk;
    while let Some(open) = rest.find("<w:t") {
        let after_open = &rest[open..];
        // The opening tag may carry attributes such as xml:space="preserve".
        let Some(tag_end) = after_open.find('>') else {
            break;
        };
        if after_open[..tag_end].ends_with('/') {
            rest = &after_open[tag_end + 1..];
            continue;
        }
        let body = &after_open[tag_end + 1..];
        let Some(close) = body.find("</w:t>") else {
            break;
        };
        text.push_str(&unescape_xml(&body[..close]));
        rest = &body[close..];
    }
    text
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
