//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ImportStrategy;
use crate::error::{AppSyncError, AppSyncResult};

use super::types::{Config, Verbosity};

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "appsync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AppSyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AppSyncError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str.rsplit('.').next().unwrap_or_default().to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config file to read: explicit path, then `./appsync.toml`, then the user
/// config directory.
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }
    dirs::config_dir()
        .map(|dir| dir.join("appsync").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Load the effective configuration with environment overrides applied.
///
/// An explicitly named file must exist; discovered files are optional.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> AppSyncResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match locate(explicit, cwd) {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    let config = with_env_overrides(config, |key| std::env::var(key).ok())?;
    Ok((config, warnings))
}

/// Apply environment variable overrides (APPSYNC_* prefix)
pub fn with_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> AppSyncResult<Config> {
    if let Some(root) = get_env("APPSYNC_REMOTE_ROOT") {
        config.remote.root = Some(PathBuf::from(root));
    }

    // An unknown strategy is a user error, not something to paper over
    if let Some(strategy) = get_env("APPSYNC_STRATEGY") {
        config.import.strategy = strategy.parse::<ImportStrategy>()?;
    }

    if let Some(path) = get_env("APPSYNC_CACHE_PATH") {
        config.hosting.cache_path = Some(PathBuf::from(path));
    }

    if let Some(verbosity) = get_env("APPSYNC_VERBOSITY") {
        config.output.verbosity = Verbosity::parse_lenient(&verbosity);
    }

    Ok(config)
}

fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|index| index + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "remote",
    "root",
    "default_group",
    "import",
    "strategy",
    "hosting",
    "cache_path",
    "files_dir",
    "metadata_file",
    "output",
    "verbosity",
];

/// Closest known key within two edits, for "did you mean" hints.
fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .min_by_key(|(_, distance)| *distance)
        .filter(|(_, distance)| *distance <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b.len()]
}
