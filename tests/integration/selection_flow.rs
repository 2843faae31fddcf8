use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::EditOperation;
use essaydesk::chat::EditorSession;
use essaydesk::editing::SelectionError;

const ESSAY: &str = "Introduction to the problem.\n\
Premise one is stated.\n\
Premise two is stated.\n\
The conclusion follows.";

#[test]
fn line_range_selects_and_replaces_whole_lines() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("lines.txt", ESSAY);
    let engine = ScriptedEngine::boxed(["suggestion", "Both premises are stated together."]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let passage = session.select_passage("2-3").expect("range resolves");
    assert_eq!(passage.text, "Premise one is stated.\nPremise two is stated.");

    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;
    assert_eq!(
        session.working_text(),
        "Introduction to the problem.\nBoth premises are stated together.\nThe conclusion follows."
    );
    Ok(())
}

#[test]
fn out_of_bounds_range_is_recoverable() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("bounds.txt", ESSAY);
    let engine = ScriptedEngine::boxed(["suggestion"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    assert_eq!(
        session.select_passage("3-9"),
        Err(SelectionError::OutOfBounds { lines: 4 })
    );
    Ok(())
}

#[test]
fn short_literal_is_rejected_with_guidance() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("short.txt", ESSAY);
    let engine = ScriptedEngine::boxed(["suggestion"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    match session.select_passage("one") {
        Err(SelectionError::TooShort { min }) => assert!(min > 3),
        other => panic!("expected TooShort, got {other:?}"),
    }
    Ok(())
}
