use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::document::load_document;
use std::fs;
use std::io::Write;
use zip::write::FileOptions;

#[test]
fn txt_loads_byte_exact() -> Result<()> {
    let harness = IntegrationHarness::new();
    let content = "Line one.\n\n  Indented line with trailing spaces.  \nLast line without newline";
    let path = harness.write_essay("exact.txt", content);

    let document = load_document(&path)?;
    assert_eq!(document.text, content);
    assert_eq!(document.filename, "exact.txt");
    assert_eq!(document.metadata.byte_len, content.len());
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("essay.md", "# not supported");
    let err = load_document(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn missing_file_is_reported() {
    let harness = IntegrationHarness::new();
    let path = harness.workspace_path().join("absent.txt");
    let err = load_document(&path).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn docx_paragraphs_join_with_newlines() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.workspace_path().join("essay.docx");
    let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Philosophy begins in wonder.</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">Wonder &amp; doubt </w:t></w:r><w:r><w:t>sustain it.</w:t></w:r></w:p>
</w:body></w:document>"#;

    let file = fs::File::create(&path)?;
    let mut archive = zip::ZipWriter::new(file);
    archive.start_file("word/document.xml", FileOptions::default())?;
    archive.write_all(xml.as_bytes())?;
    archive.finish()?;

    let document = load_document(&path)?;
    assert_eq!(
        document.text,
        "Philosophy begins in wonder.\nWonder & doubt sustain it."
    );
    Ok(())
}

#[test]
fn corrupt_pdf_is_reported() {
    let harness = IntegrationHarness::new();
    let path = harness.workspace_path().join("broken.pdf");
    fs::write(&path, b"not a pdf at all").unwrap();
    assert!(load_document(&path).is_err());
}
