//! Scenario: Command Line
//!
//! Journey: The same flows driven through the `appsync` binary, the way CI
//! would run them.
//!
//! Success Criteria:
//! - exit code 0 on success, 1 on any reported error
//! - `--json` produces one JSON document per line
//! - `diff` never changes anything

use appsync::domain::ports::RemoteClient;

use crate::common::*;

/// SCENARIO: non-interactive first import, then diff
#[test]
fn scenario_cli_import_then_diff() {
    let env = TestEnv::with_declaration(TODO_APP);

    let result = env.run(&["import", "--project-id", GROUP, "-y"]);
    assert!(
        result.success,
        "import should succeed.\nstderr: {}\nstdout: {}",
        result.stderr, result.stdout
    );
    assert!(result.stderr.contains("created and imported todo-"));

    let client_id = env.instance().client_id;
    assert!(env.remote().find_app_by_client_id(None, &client_id).is_ok());

    let result = env.run(&["diff"]);
    assert!(result.success, "diff failed: {}", result.combined_output());
    assert_eq!(result.stdout.trim(), "no changes");
}

/// SCENARIO: JSON mode emits NDJSON events and a final result
#[test]
fn scenario_cli_json_events() {
    let env = TestEnv::with_declaration(TODO_APP);

    let result = env.run(&["--json", "import", "--project-id", GROUP, "--yes"]);
    assert!(result.success, "{}", result.combined_output());

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("every line is JSON"))
        .collect();
    let names: Vec<&str> = events
        .iter()
        .filter_map(|e| e["event"].as_str())
        .collect();
    assert_eq!(names.first(), Some(&"stage"));
    assert!(names.contains(&"app_created"));
    assert!(names.contains(&"config_pushed"));
    assert_eq!(names.last(), Some(&"result"));
    assert_eq!(events.last().unwrap()["outcome"], "imported");
}

/// SCENARIO: errors exit with 1 and a readable message
#[test]
fn scenario_cli_errors_exit_one() {
    let env = TestEnv::with_declaration("{ not json");

    let result = env.run(&["import", "--project-id", GROUP, "-y"]);
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("malformed declaration"));

    let result = env.run(&["diff"]);
    assert_eq!(result.exit_code, 1);
}

/// SCENARIO: bad arguments are errors like any other
#[test]
fn scenario_cli_bad_arguments_exit_one() {
    let env = TestEnv::with_declaration(TODO_APP);

    let result = env.run(&["import", "--strategy", "overwrite", "-y"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("overwrite"));

    let result = env.run(&["import", "--no-such-flag"]);
    assert_eq!(result.exit_code, 1);

    let result = env.run(&["--help"]);
    assert_eq!(result.exit_code, 0);
    assert!(result.stdout.contains("import"));
}

/// SCENARIO: diff on a directory that was never imported
#[test]
fn scenario_cli_diff_requires_linked_directory() {
    let env = TestEnv::with_declaration(TODO_APP);

    let result = env.run(&["diff"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("run `appsync import` to create it"));
}

/// SCENARIO: an explicit path that does not exist is rejected
#[test]
fn scenario_cli_missing_path() {
    let env = TestEnv::new();

    let result = env.run(&["import", "--path", "no/such/dir", "-y"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("directory does not exist"));
}
