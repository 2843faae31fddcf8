use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::EditOperation;
use essaydesk::chat::EditorSession;
use essaydesk::orchestration::{EventType, SessionLog};

#[test]
fn the_full_flow_leaves_an_event_trail() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("events.txt", "A premise worth sharpening considerably.");
    let engine = ScriptedEngine::boxed(["suggestion", "bad proposal", "good proposal"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;

    session.generate_suggestion()?;
    let passage = session.select_passage("worth sharpening").unwrap();
    session.propose_edit(EditOperation::Rewrite, passage)?;
    session.reject_pending()?;
    session.refine_pending("tighter please")?;
    session.accept_pending()?;
    session.save()?;

    let events = SessionLog::for_session(session.session()).load_events()?;
    let types: Vec<EventType> = events.iter().map(|e| e.event_type.clone()).collect();
    for expected in [
        EventType::SessionCreated,
        EventType::EssayLoaded,
        EventType::SuggestionGenerated,
        EventType::PassageSelected,
        EventType::EditProposed,
        EventType::EditRejected,
        EventType::FeedbackCaptured,
        EventType::EditAccepted,
        EventType::EssaySaved,
    ] {
        assert!(
            types.contains(&expected),
            "missing {expected:?} in {types:?}"
        );
    }
    // Rejection precedes the refined proposal, which precedes acceptance.
    let position = |t: &EventType| types.iter().position(|x| x == t).unwrap();
    assert!(position(&EventType::EditRejected) < position(&EventType::FeedbackCaptured));
    assert!(position(&EventType::FeedbackCaptured) < position(&EventType::EditAccepted));
    Ok(())
}

#[test]
fn every_session_event_belongs_to_the_session() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("ownership.txt", "Essay text under observation.");
    let engine = ScriptedEngine::boxed(["suggestion"]);
    let mut session = EditorSession::open_with(harness.session_manager(), &path, engine)?;
    session.generate_suggestion()?;

    let session_id = session.session().id;
    let events = SessionLog::for_session(session.session()).load_events()?;
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.session_id == session_id));
    Ok(())
}
