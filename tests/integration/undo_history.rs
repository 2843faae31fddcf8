use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::EditOperation;
use essaydesk::chat::EditorSession;

#[test]
fn undo_walks_back_through_accepted_edits() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("undo.txt", "alpha beta gamma delta");
    let engine = ScriptedEngine::boxed(["suggestion", "ALPHA BETA", "GAMMA DELTA"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let passage = session.select_passage("alpha beta").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;
    let after_first = session.working_text().to_string();

    let passage = session.select_passage("gamma delta").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;
    assert_eq!(session.working_text(), "ALPHA BETA GAMMA DELTA");
    assert_eq!(session.history()?.len(), 2);

    let undone = session.undo_last_edit()?.expect("second edit reverts");
    assert_eq!(undone.operation, "rewrite");
    assert_eq!(session.working_text(), after_first);
    assert_eq!(session.history()?.len(), 1);

    session.undo_last_edit()?.expect("first edit reverts");
    assert_eq!(session.working_text(), session.original_text());
    assert!(session.save()?.is_none(), "fully undone essay has no changes");

    assert!(session.undo_last_edit()?.is_none());
    Ok(())
}

#[test]
fn history_summarizes_operations_in_order() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("history.txt", "first clause here, second clause there");
    let engine = ScriptedEngine::boxed(["suggestion", "opening clause", "closing clause"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let passage = session.select_passage("first clause").unwrap();
    session.propose_edit(EditOperation::Rephrase, passage)?;
    session.accept_pending()?;
    let passage = session.select_passage("second clause").unwrap();
    session.propose_edit(EditOperation::Expand, passage)?;
    session.accept_pending()?;

    let history = session.history()?;
    assert_eq!(history.len(), 2);
    assert!(history[0].contains("rephrase"));
    assert!(history[1].contains("expand"));
    Ok(())
}
