//! Scenario: First Import of a New App
//!
//! Journey: A developer has written an app declaration but never deployed it.
//!
//! Steps:
//! 1. Import with no instance data; accept creation and answer the questions
//! 2. The app is created, the declaration pushed, and the directory re-synced
//!    with the identifiers the remote assigned
//! 3. A second import finds nothing to do
//! 4. Editing the declaration and importing again shows exactly that change

use appsync::domain::ports::RemoteClient;
use appsync::{ImportOptions, ImportOutcome};

use crate::common::*;

/// SCENARIO: Create, import, then re-import without changes
#[test]
fn scenario_first_import_creates_app_and_resyncs_ids() {
    let env = TestEnv::with_declaration(TODO_APP);

    // Step 1: confirm creation, accept default name, pick a project,
    // accept location and deployment model defaults.
    let prompter = ScriptedPrompter::answering(&[true], &["", GROUP, "", ""]);
    let outcome = env
        .use_case(prompter.clone())
        .execute(&ImportOptions::new(env.app_dir.path()))
        .unwrap();

    // Step 2: created and everything counted as a change
    let ImportOutcome::Imported {
        client_id,
        created,
        config_changes,
        ..
    } = outcome
    else {
        panic!("expected an import, got {:?}", outcome);
    };
    assert!(created);
    assert!(client_id.starts_with("todo-"));
    // 1 service + 1 webhook + 2 pipelines + 1 parameter + 1 value
    assert_eq!(config_changes, 6);
    assert_eq!(prompter.asked()[0], "this app does not exist yet: would you like to create a new app?");
    assert!(prompter.shown().is_empty(), "new apps skip the confirm diff");

    let instance = env.instance();
    assert_eq!(instance.client_id, client_id);
    assert_eq!(instance.location.as_deref(), Some("US-VA"));
    assert_eq!(instance.deployment_model.as_deref(), Some("GLOBAL"));

    let remote_app = env.remote().find_app_by_client_id(None, &client_id).unwrap();
    assert_eq!(remote_app.group_id, GROUP);

    let local = env.local_app();
    assert_eq!(local.client_id, client_id);
    assert_eq!(pipeline_names(&local), vec!["P1", "P2"]);
    assert!(local.pipelines.iter().all(|p| !p.id.is_empty()));
    assert!(!local.services[0].webhooks[0].id.is_empty());
    assert_eq!(local, env.deployed(&remote_app));

    // Step 3: nothing changed locally
    let prompter = ScriptedPrompter::answering(&[], &[]);
    let outcome = env
        .use_case(prompter.clone())
        .execute(&ImportOptions::new(env.app_dir.path()))
        .unwrap();
    assert_eq!(outcome, ImportOutcome::NoChanges { client_id: client_id.clone() });
    assert!(prompter.asked().is_empty());

    // Step 4: add a pipeline and confirm
    let mut edited = env.local_app();
    edited.pipelines.push(pipeline("P3"));
    env.write_app_file("app.json", &serde_json::to_string(&edited).unwrap());

    let prompter = ScriptedPrompter::answering(&[true], &[]);
    let outcome = env
        .use_case(prompter.clone())
        .execute(&ImportOptions::new(env.app_dir.path()))
        .unwrap();
    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            client_id: client_id.clone(),
            created: false,
            config_changes: 1,
            asset_changes: 0,
        }
    );
    assert_eq!(prompter.shown(), vec!["+ pipelines/P3".to_string()]);
    assert_eq!(pipeline_names(&env.deployed(&remote_app)), vec!["P1", "P2", "P3"]);
}

/// SCENARIO: Declining creation leaves remote and directory untouched
#[test]
fn scenario_declined_creation_changes_nothing() {
    let env = TestEnv::with_declaration(TODO_APP);

    let outcome = env
        .use_case(ScriptedPrompter::answering(&[false], &[]))
        .execute(&ImportOptions::new(env.app_dir.path()))
        .unwrap();

    assert_eq!(outcome, ImportOutcome::Declined);
    assert!(!env.app_path("instance.json").exists());
    assert!(env.remote().list_apps(GROUP).unwrap().is_empty());
}

/// SCENARIO: Malformed declarations abort before anything remote happens
#[test]
fn scenario_malformed_declaration_aborts_early() {
    let env = TestEnv::with_declaration(
        r#"{"name":"todo","pipelines":[{"name":"P1"},{"name":"P1"}]}"#,
    );

    let err = env
        .use_case(ScriptedPrompter::answering(&[true], &["", GROUP]))
        .execute(&ImportOptions::new(env.app_dir.path()).with_assume_yes(true))
        .unwrap_err();

    assert!(err.to_string().contains("duplicate pipeline \"P1\""));
    assert!(env.remote().list_apps(GROUP).unwrap().is_empty());
}
