use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::EditOperation;
use essaydesk::chat::EditorSession;
use std::fs;

#[test]
fn accepted_rephrase_replaces_exactly_the_passage() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("cat.txt", "The cat sat on the mat.");
    let engine = ScriptedEngine::boxed(["full rewrite suggestion", "feline rested"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;

    session.generate_suggestion()?;
    let passage = session.select_passage("cat sat").expect("passage resolves");
    session.propose_edit(EditOperation::Rephrase, passage)?;
    session.accept_pending()?;

    assert_eq!(session.working_text(), "The feline rested on the mat.");
    assert_eq!(session.original_text(), "The cat sat on the mat.");
    Ok(())
}

#[test]
fn rejection_leaves_working_text_byte_identical() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay(
        "reject.txt",
        "An argument may be valid without being sound.\n",
    );
    let engine = ScriptedEngine::boxed(["suggestion", "proposal the user dislikes"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;

    session.generate_suggestion()?;
    let before = session.working_text().to_string();
    let passage = session.select_passage("valid without being sound").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.reject_pending()?;

    assert_eq!(session.working_text(), before);
    assert!(session.save()?.is_none(), "nothing to save after reject");
    Ok(())
}

#[test]
fn rejection_feedback_drives_a_refined_proposal() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("refine.txt", "A long claim about necessity and freedom.\n");
    let engine = ScriptedEngine::boxed([
        "suggestion",
        "first proposal",
        "second, refined proposal",
    ]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;

    session.generate_suggestion()?;
    let passage = session.select_passage("necessity and freedom").unwrap();
    let first = session.propose_edit(EditOperation::Expand, passage)?;
    assert_eq!(first.replacement, "first proposal");
    session.reject_pending()?;

    let refined = session.refine_pending("make it simpler")?;
    assert_eq!(refined.replacement, "second, refined proposal");
    assert_eq!(refined.feedback.as_deref(), Some("make it simpler"));
    // Same target passage across the refine cycle.
    assert_eq!(refined.passage, first.passage);

    session.accept_pending()?;
    assert!(session
        .working_text()
        .contains("second, refined proposal"));
    Ok(())
}

#[test]
fn missing_passage_reports_selection_error_without_mutation() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("missing.txt", "Short essay body here.\n");
    let engine = ScriptedEngine::boxed(["suggestion"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let before = session.working_text().to_string();
    let result = session.select_passage("passage that was never written");
    assert!(result.is_err());
    assert_eq!(session.working_text(), before);
    Ok(())
}

#[test]
fn first_occurrence_wins_when_passage_repeats() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay(
        "repeat.txt",
        "the point stands. Later, the point stands again.",
    );
    let engine = ScriptedEngine::boxed(["suggestion", "the claim holds"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let passage = session.select_passage("the point stands").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.accept_pending()?;
    assert_eq!(
        session.working_text(),
        "the claim holds. Later, the point stands again."
    );

    let saved = session.save()?.expect("accepted edit saves");
    assert_eq!(
        fs::read_to_string(saved)?,
        "the claim holds. Later, the point stands again."
    );
    Ok(())
}
