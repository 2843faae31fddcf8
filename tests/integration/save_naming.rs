use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::EditOperation;
use essaydesk::chat::{output_path_for, EditorSession};
use std::fs;

#[test]
fn saved_file_carries_the_edited_suffix() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("kant_notes.txt", "Duty grounds the moral law entirely.");
    let engine = ScriptedEngine::boxed(["suggestion", "Duty alone grounds the moral law."]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let passage = session.select_passage("grounds the moral law entirely").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;

    let saved = session.save()?.expect("edited essay saves");
    assert_eq!(saved, path.parent().unwrap().join("kant_notes_edited.txt"));
    assert_eq!(
        fs::read_to_string(&saved)?,
        "Duty alone grounds the moral law."
    );
    Ok(())
}

#[test]
fn save_overwrites_an_existing_output() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("draft.txt", "original body of the draft essay");
    let stale = output_path_for(&path);
    fs::write(&stale, "stale content from an earlier run")?;

    let engine = ScriptedEngine::boxed(["suggestion", "revised body"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;
    let passage = session.select_passage("original body of the draft essay").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;

    let saved = session.save()?.unwrap();
    assert_eq!(saved, stale);
    assert_eq!(fs::read_to_string(&saved)?, "revised body");
    Ok(())
}

#[test]
fn saving_without_accepted_edits_writes_nothing() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("untouched.txt", "nothing was ever accepted here");
    let engine = ScriptedEngine::boxed(["suggestion"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    assert!(session.save()?.is_none());
    assert!(!output_path_for(&path).exists());
    Ok(())
}
