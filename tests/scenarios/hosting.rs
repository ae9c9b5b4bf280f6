//! Scenario: Static Hosting Sync
//!
//! Journey: A developer ships static files alongside the app configuration.
//!
//! Steps:
//! 1. First import uploads every file and writes the hash cache
//! 2. A re-run rehashes nothing and changes nothing
//! 3. Editing one file uploads only that file
//! 4. Removing a file deletes it remotely only under replace
//! 5. A corrupt cache is tolerated and rebuilt

use std::sync::{Arc, Mutex};

use appsync::domain::ports::{ImportEvent, ImportEventSink, RemoteClient};
use appsync::{ImportOptions, ImportOutcome, ImportStrategy};

use crate::common::*;

#[derive(Default)]
struct Recorder(Mutex<Vec<ImportEvent>>);

impl ImportEventSink for Recorder {
    fn on_event(&self, event: ImportEvent) {
        self.0.lock().unwrap().push(event);
    }
}

impl Recorder {
    fn rehashed(&self) -> Option<usize> {
        self.0.lock().unwrap().iter().find_map(|e| match e {
            ImportEvent::AssetsScanned { rehashed, .. } => Some(*rehashed),
            _ => None,
        })
    }

    fn saw_cache_load_failure(&self) -> bool {
        self.0
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, ImportEvent::CacheLoadFailed { .. }))
    }
}

fn hosted_env() -> (TestEnv, appsync::domain::ports::RemoteApp) {
    let env = TestEnv::new();
    let remote_app = env.deploy_and_link(&app_with_pipelines("site", &[]));
    env.write_app_file(
        "app.json",
        &serde_json::to_string(&app_with_pipelines("site", &[])).unwrap(),
    );
    env.write_app_file("hosting/files/index.html", "<h1>hi</h1>");
    env.write_app_file("hosting/files/css/site.css", "h1 { color: red }");
    env.write_app_file(
        "hosting/metadata.json",
        r#"[{"file_path":"/index.html","attrs":[{"name":"Content-Type","value":"text/html"}]}]"#,
    );
    (env, remote_app)
}

fn import(env: &TestEnv, strategy: ImportStrategy) -> (ImportOutcome, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let outcome = env
        .use_case(ScriptedPrompter::default())
        .execute_with_events(
            &ImportOptions::new(env.app_dir.path())
                .with_hosting(true)
                .with_strategy(strategy)
                .with_assume_yes(true),
            recorder.clone(),
        )
        .unwrap();
    (outcome, recorder)
}

fn asset_changes(outcome: &ImportOutcome) -> usize {
    match outcome {
        ImportOutcome::Imported { asset_changes, .. } => *asset_changes,
        other => panic!("expected an import, got {:?}", other),
    }
}

/// SCENARIO: upload, no-op re-run, single-file change
#[test]
fn scenario_hosting_uploads_only_what_changed() {
    let (env, remote_app) = hosted_env();
    let remote = env.remote();

    // Step 1
    let (outcome, events) = import(&env, ImportStrategy::Merge);
    assert_eq!(asset_changes(&outcome), 2);
    assert_eq!(events.rehashed(), Some(2));
    assert!(env.app_path(".appsync/hosting-cache.toml").is_file());
    let assets = remote.list_assets(&remote_app.group_id, &remote_app.id).unwrap();
    let paths: Vec<_> = assets.iter().map(|a| a.file_path.as_str()).collect();
    assert_eq!(paths, vec!["/css/site.css", "/index.html"]);
    assert_eq!(assets[1].attrs[0].value, "text/html");
    let stored = remote.asset_location(&remote_app.group_id, &remote_app.id, "/index.html");
    assert_eq!(std::fs::read_to_string(stored).unwrap(), "<h1>hi</h1>");

    // Step 2
    let (outcome, events) = import(&env, ImportStrategy::Merge);
    assert_eq!(asset_changes(&outcome), 0);
    assert_eq!(events.rehashed(), Some(0));

    // Step 3: different size, so the cached hash cannot be trusted
    env.write_app_file("hosting/files/css/site.css", "h1 { color: blue; }");
    let (outcome, events) = import(&env, ImportStrategy::Merge);
    assert_eq!(asset_changes(&outcome), 1);
    assert_eq!(events.rehashed(), Some(1));
    let stored = remote.asset_location(&remote_app.group_id, &remote_app.id, "/css/site.css");
    assert_eq!(std::fs::read_to_string(stored).unwrap(), "h1 { color: blue; }");
}

/// SCENARIO: a touched but unchanged file is rehashed once, not every run
#[test]
fn scenario_touched_file_is_rehashed_once() {
    let (env, _) = hosted_env();
    import(&env, ImportStrategy::Merge);

    let touched = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
    std::fs::File::options()
        .write(true)
        .open(env.app_path("hosting/files/index.html"))
        .unwrap()
        .set_modified(touched)
        .unwrap();

    let (outcome, events) = import(&env, ImportStrategy::Merge);
    assert_eq!(asset_changes(&outcome), 0);
    assert_eq!(events.rehashed(), Some(1));

    let (_, events) = import(&env, ImportStrategy::Merge);
    assert_eq!(events.rehashed(), Some(0));
}

/// SCENARIO: removed files survive merge and are deleted by replace
#[test]
fn scenario_removed_files_follow_strategy() {
    let (env, remote_app) = hosted_env();
    let remote = env.remote();
    import(&env, ImportStrategy::Merge);
    env.remove_app_file("hosting/files/css/site.css");

    let (outcome, _) = import(&env, ImportStrategy::Merge);
    assert_eq!(asset_changes(&outcome), 0);
    assert_eq!(
        remote.list_assets(&remote_app.group_id, &remote_app.id).unwrap().len(),
        2
    );

    let (outcome, _) = import(&env, ImportStrategy::Replace);
    assert_eq!(asset_changes(&outcome), 1);
    let assets = remote.list_assets(&remote_app.group_id, &remote_app.id).unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].file_path, "/index.html");
}

/// SCENARIO: a corrupt cache is reported, ignored and rewritten
#[test]
fn scenario_corrupt_cache_is_rebuilt() {
    let (env, _) = hosted_env();
    env.write_app_file(".appsync/hosting-cache.toml", "this is not toml = = =");

    let (outcome, events) = import(&env, ImportStrategy::Merge);

    assert_eq!(asset_changes(&outcome), 2);
    assert!(events.saw_cache_load_failure());
    assert_eq!(events.rehashed(), Some(2));
    let text = std::fs::read_to_string(env.app_path(".appsync/hosting-cache.toml")).unwrap();
    assert!(text.contains("version = 1"));
    assert!(text.contains("/index.html"));
}

/// SCENARIO: CDN invalidation covers exactly the changed paths
#[test]
fn scenario_cdn_invalidation_lists_changed_paths() {
    let (env, remote_app) = hosted_env();

    env.use_case(ScriptedPrompter::default())
        .execute(
            &ImportOptions::new(env.app_dir.path())
                .with_hosting(true)
                .with_reset_cdn_cache(true)
                .with_assume_yes(true),
        )
        .unwrap();

    assert_eq!(
        env.remote()
            .invalidations(&remote_app.group_id, &remote_app.id)
            .unwrap(),
        vec!["/css/site.css".to_string(), "/index.html".to_string()]
    );
}
