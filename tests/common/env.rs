//! Test environment builder for isolated AppSync testing.
//!
//! Provides `TestEnv` - a temp app directory plus a temp file-backed remote,
//! with helpers to run the CLI or the import use case against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use tempfile::TempDir;

use appsync::domain::entities::{Application, InstanceData};
use appsync::domain::ports::{RemoteApp, RemoteClient};
use appsync::infrastructure::declaration::{APP_FILE, INSTANCE_FILE};
use appsync::infrastructure::FsRemoteClient;
use appsync::presentation::factory::{
    create_import_use_case_with_prompter, ConcreteImportUseCase,
};
use appsync::ImportStrategy;

use super::prompter::ScriptedPrompter;

/// Project every test app lives in
pub const GROUP: &str = "group-1";

/// Result of running an AppSync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Local app directory
    pub app_dir: TempDir,
    /// Root of the file-backed remote
    pub remote_root: TempDir,
    /// Stand-in for HOME / XDG dirs so user config never leaks in
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            app_dir: TempDir::new().expect("Failed to create app dir"),
            remote_root: TempDir::new().expect("Failed to create remote root"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
        }
    }

    /// An app directory holding `app_json` and no instance data
    pub fn with_declaration(app_json: &str) -> Self {
        let env = Self::new();
        env.write_app_file(APP_FILE, app_json);
        env
    }

    pub fn app_path(&self, relative: &str) -> PathBuf {
        self.app_dir.path().join(relative)
    }

    pub fn remote(&self) -> FsRemoteClient {
        FsRemoteClient::new(self.remote_root.path())
    }

    pub fn use_case(&self, prompter: ScriptedPrompter) -> ConcreteImportUseCase {
        create_import_use_case_with_prompter(self.remote_root.path(), Arc::new(prompter))
    }

    /// Write a file into the app directory
    pub fn write_app_file(&self, relative: &str, content: &str) {
        let path = self.app_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn remove_app_file(&self, relative: &str) {
        std::fs::remove_file(self.app_path(relative)).expect("Failed to remove file");
    }

    /// The declaration currently on disk
    pub fn local_app(&self) -> Application {
        let text = std::fs::read_to_string(self.app_path(APP_FILE)).expect("Failed to read app");
        serde_json::from_str(&text).expect("Failed to parse app")
    }

    pub fn instance(&self) -> InstanceData {
        let text =
            std::fs::read_to_string(self.app_path(INSTANCE_FILE)).expect("Failed to read instance");
        serde_json::from_str(&text).expect("Failed to parse instance")
    }

    /// Create a deployed app holding `deployed` and link the app directory to it
    pub fn deploy_and_link(&self, deployed: &Application) -> RemoteApp {
        let remote = self.remote();
        let app = remote
            .create_app(GROUP, &deployed.name, "US-VA", "GLOBAL")
            .expect("Failed to create app");
        remote
            .push(GROUP, &app.id, deployed, ImportStrategy::Replace)
            .expect("Failed to push");
        let instance = InstanceData {
            client_id: app.client_id.clone(),
            name: app.name.clone(),
            ..Default::default()
        };
        self.write_app_file(
            INSTANCE_FILE,
            &serde_json::to_string_pretty(&instance).expect("Failed to encode instance"),
        );
        app
    }

    pub fn deployed(&self, app: &RemoteApp) -> Application {
        self.remote()
            .export(&app.group_id, &app.id)
            .expect("Failed to export")
    }

    /// Run appsync CLI from the app directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.app_dir.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_appsync"))
            .current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("XDG_DATA_HOME", self.home_dir.path().join(".local/share"))
            .env("APPSYNC_REMOTE_ROOT", self.remote_root.path())
            .env("NO_COLOR", "1")
            .env_remove("APPSYNC_STRATEGY")
            .env_remove("APPSYNC_CACHE_PATH")
            .env_remove("APPSYNC_VERBOSITY")
            .output()
            .expect("Failed to execute appsync");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
