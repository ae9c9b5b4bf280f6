//! Scenario: Merge vs Replace
//!
//! Journey: A deployed app carries entities that are not in the local
//! declaration (added in a console, or holding secrets).
//!
//! Success Criteria:
//! - merge keeps remote-only entities and brings them back into the directory
//! - replace removes them
//! - identifiers of matched entities never change

use appsync::{ImportOptions, ImportOutcome, ImportStrategy};
use serde_json::json;

use crate::common::*;

fn deployed_state() -> appsync::Application {
    let mut app = app_with_pipelines("todo", &["P1", "P2"]);
    app.values = vec![value("apiKey", json!("secret"))];
    app
}

fn local_state() -> appsync::Application {
    let mut app = app_with_pipelines("todo", &["P1", "P3"]);
    app.services = vec![http_service("github", &["onPush"])];
    app
}

/// SCENARIO: merge preserves remote-only entities
#[test]
fn scenario_merge_keeps_remote_only_entities() {
    let env = TestEnv::new();
    let remote_app = env.deploy_and_link(&deployed_state());
    let p1_id = env.deployed(&remote_app).pipelines[0].id.clone();
    env.write_app_file("app.json", &serde_json::to_string(&local_state()).unwrap());

    let prompter = ScriptedPrompter::answering(&[true], &[]);
    let outcome = env
        .use_case(prompter.clone())
        .execute(&ImportOptions::new(env.app_dir.path()).with_strategy(ImportStrategy::Merge))
        .unwrap();

    assert!(outcome.is_imported());
    assert_eq!(
        prompter.shown(),
        vec![
            "+ services/http/github".to_string(),
            "+ pipelines/P3".to_string(),
        ]
    );

    let deployed = env.deployed(&remote_app);
    assert_eq!(pipeline_names(&deployed), vec!["P1", "P2", "P3"]);
    assert_eq!(deployed.values.len(), 1);
    assert_eq!(deployed.pipelines[0].id, p1_id);

    // Re-sync brings the preserved entities into the directory
    let local = env.local_app();
    assert_eq!(pipeline_names(&local), vec!["P1", "P2", "P3"]);
    assert_eq!(local.values[0].name, "apiKey");
}

/// SCENARIO: replace deletes remote-only entities
#[test]
fn scenario_replace_deletes_remote_only_entities() {
    let env = TestEnv::new();
    let remote_app = env.deploy_and_link(&deployed_state());
    let p1_id = env.deployed(&remote_app).pipelines[0].id.clone();
    env.write_app_file("app.json", &serde_json::to_string(&local_state()).unwrap());

    let prompter = ScriptedPrompter::answering(&[true], &[]);
    let outcome = env
        .use_case(prompter.clone())
        .execute(&ImportOptions::new(env.app_dir.path()).with_strategy(ImportStrategy::Replace))
        .unwrap();

    assert!(outcome.is_imported());
    assert_eq!(
        prompter.shown(),
        vec![
            "+ services/http/github".to_string(),
            "+ pipelines/P3".to_string(),
            "- pipelines/P2".to_string(),
            "- values/apiKey".to_string(),
        ]
    );

    let deployed = env.deployed(&remote_app);
    assert_eq!(pipeline_names(&deployed), vec!["P1", "P3"]);
    assert!(deployed.values.is_empty());
    assert_eq!(deployed.pipelines[0].id, p1_id);
    assert_eq!(env.local_app(), deployed);
}

/// SCENARIO: declining the confirmation changes nothing
#[test]
fn scenario_declined_confirmation_changes_nothing() {
    let env = TestEnv::new();
    let remote_app = env.deploy_and_link(&deployed_state());
    let before = env.deployed(&remote_app);
    env.write_app_file("app.json", &serde_json::to_string(&local_state()).unwrap());

    let outcome = env
        .use_case(ScriptedPrompter::answering(&[false], &[]))
        .execute(&ImportOptions::new(env.app_dir.path()).with_strategy(ImportStrategy::Replace))
        .unwrap();

    assert_eq!(outcome, ImportOutcome::Declined);
    assert_eq!(env.deployed(&remote_app), before);
    assert_eq!(env.local_app(), local_state());
}

/// SCENARIO: preview matches what the import then shows
#[test]
fn scenario_preview_matches_confirmation_diff() {
    let env = TestEnv::new();
    env.deploy_and_link(&deployed_state());
    env.write_app_file("app.json", &serde_json::to_string(&local_state()).unwrap());
    let options = ImportOptions::new(env.app_dir.path()).with_strategy(ImportStrategy::Replace);

    let preview = env
        .use_case(ScriptedPrompter::default())
        .preview(&options, &appsync::domain::ports::NoopEventSink)
        .unwrap();

    let prompter = ScriptedPrompter::answering(&[false], &[]);
    env.use_case(prompter.clone()).execute(&options).unwrap();
    assert_eq!(preview, prompter.shown());
}
