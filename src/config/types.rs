//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::import::{DEFAULT_FILES_DIR, DEFAULT_METADATA_FILE};
use crate::domain::value_objects::ImportStrategy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub hosting: HostingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where deployed apps live
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Root of the file-backed remote; `<data_dir>/appsync/remote` when unset
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Project proposed when a new app has to be created
    #[serde(default)]
    pub default_group: Option<String>,
}

impl RemoteConfig {
    pub fn root_or_default(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("appsync")
                .join("remote")
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub strategy: ImportStrategy,
}

/// Static hosting locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingConfig {
    /// Asset cache file; relative paths resolve against the app directory
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,

    #[serde(default = "default_metadata_file")]
    pub metadata_file: PathBuf,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            cache_path: None,
            files_dir: default_files_dir(),
            metadata_file: default_metadata_file(),
        }
    }
}

fn default_files_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FILES_DIR)
}

fn default_metadata_file() -> PathBuf {
    PathBuf::from(DEFAULT_METADATA_FILE)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Parse a level name, falling back to `Normal` for anything unknown
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }
}
