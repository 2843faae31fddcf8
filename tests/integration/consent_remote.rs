use super::support::ScriptedEngine;
use super::IntegrationHarness;
use anyhow::Result;
use essaydesk::assistant::{build_generation_prompt_manifest, EditOperation};
use essaydesk::chat::EditorSession;
use essaydesk::orchestration::{
    require_remote_generation_consent, ConsentOperation, ConsentStore,
};

#[test]
fn remote_generation_is_refused_without_config_opt_in() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("guarded.txt", "Text that must stay local.");
    let mut manager = harness.session_manager();
    assert!(!manager.config.model.remote_allowed);
    let session = manager.create_session(&path)?;

    let err = require_remote_generation_consent(
        &manager,
        &session,
        ConsentOperation::FullRewrite,
        "user approved",
        build_generation_prompt_manifest("full_rewrite", &["essay_text"], "remote-model", ""),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Remote inference is disabled"));
    assert!(ConsentStore::for_session(&session).load_all()?.is_empty());
    Ok(())
}

#[test]
fn opted_in_generations_record_consent_manifests() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write_essay("consented.txt", "Text the user agreed to send out.");
    let mut manager = harness.session_manager();
    manager.config.model.remote_allowed = true;

    let engine = ScriptedEngine::boxed(["suggestion", "replacement text"]);
    let mut session = EditorSession::open_with(manager, &path, engine)?;
    session.generate_suggestion()?;
    let passage = session.select_passage("agreed to send out").unwrap();
    session.propose_edit(EditOperation::Rephrase, passage)?;

    let store = ConsentStore::for_session(session.session());
    let manifests = store.load_all()?;
    assert_eq!(manifests.len(), 2);
    let latest = store
        .latest_for_operation(ConsentOperation::PassageRephrase)?
        .expect("rephrase manifest recorded");
    assert_eq!(latest.data_categories, vec!["essay_text".to_string()]);
    assert!(latest.prompt_manifest["prompt_excerpt"].is_string());
    Ok(())
}
